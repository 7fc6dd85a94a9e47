use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::data::Track;

/// Error type for content store operations
#[derive(Debug, Error)]
pub enum SongStoreError {
    /// No record file exists for the slug anywhere under the content root
    #[error("Content record not found for slug: {0}")]
    NotFound(String),

    #[error("Malformed front matter in {0}: {1}")]
    FrontMatter(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Front matter keys as they appear in the content files
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FrontMatter {
    title: Option<String>,
    album_id: Option<String>,
    album: Option<String>,
    duration: Option<String>,
    tags: Vec<String>,
    contributors: Vec<String>,
    lrc_lib_id: Option<u64>,
    is_verified: Option<bool>,
    synced_lyrics: Option<String>,
}

/// Hierarchical markdown content store, organized by album directories
///
/// Each record is a file named `<slug>.md` with a YAML front matter block
/// followed by the plain lyric transcript as the body.
#[derive(Debug, Clone)]
pub struct SongStore {
    root: PathBuf,
}

impl SongStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Locate `<slug>.md` anywhere under the content root
    pub fn find_record(&self, slug: &str) -> Result<PathBuf, SongStoreError> {
        let file_name = format!("{}.md", slug);

        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if entry.file_type().is_file() && entry.file_name().to_string_lossy() == file_name {
                debug!("Found record for '{}' at {}", slug, entry.path().display());
                return Ok(entry.into_path());
            }
        }

        Err(SongStoreError::NotFound(slug.to_string()))
    }

    /// Parse a single content record into a Track
    pub fn load_track(&self, path: &Path) -> Result<Track, SongStoreError> {
        let content = fs::read_to_string(path)?;
        let (header, body) = split_front_matter(&content).ok_or_else(|| {
            SongStoreError::FrontMatter(
                path.display().to_string(),
                "missing front matter block".to_string(),
            )
        })?;

        let meta: FrontMatter = serde_yaml::from_str(header).map_err(|e| {
            SongStoreError::FrontMatter(path.display().to_string(), e.to_string())
        })?;

        let slug = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let title = meta.title.unwrap_or_else(|| slug.clone());
        let body = body.trim();

        Ok(Track {
            title,
            slug,
            album_id: meta.album_id.or(meta.album),
            duration: meta.duration,
            lyrics: if body.is_empty() {
                None
            } else {
                Some(body.to_string())
            },
            tags: meta.tags,
            contributors: meta.contributors,
            lrclib_id: meta.lrc_lib_id,
            is_verified: meta.is_verified.unwrap_or(false),
            synced_lyrics: meta.synced_lyrics,
        })
    }

    /// Load a track by slug
    pub fn load_by_slug(&self, slug: &str) -> Result<Track, SongStoreError> {
        let path = self.find_record(slug)?;
        self.load_track(&path)
    }

    /// Load the full catalog in path order
    ///
    /// Records that fail to parse are logged and skipped so a single broken
    /// file does not take down a batch run.
    pub fn load_all(&self) -> Result<Vec<Track>, SongStoreError> {
        if !self.root.exists() {
            return Err(SongStoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("content root does not exist: {}", self.root.display()),
            )));
        }

        let mut tracks = Vec::new();
        for entry in WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }

            match self.load_track(entry.path()) {
                Ok(track) => tracks.push(track),
                Err(e) => warn!("Skipping unreadable record {}: {}", entry.path().display(), e),
            }
        }

        debug!("Loaded {} tracks from {}", tracks.len(), self.root.display());
        Ok(tracks)
    }

    /// Merge verification results into a record's front matter
    ///
    /// Sets `lrcLibId` and `isVerified`, and `syncedLyrics` when provided.
    /// All other front matter keys and the body are preserved unchanged.
    pub fn update_verification(
        &self,
        slug: &str,
        lrclib_id: u64,
        is_verified: bool,
        synced_lyrics: Option<&str>,
    ) -> Result<(), SongStoreError> {
        let path = self.find_record(slug)?;
        let content = fs::read_to_string(&path)?;
        let (header, body) = split_front_matter(&content).ok_or_else(|| {
            SongStoreError::FrontMatter(
                path.display().to_string(),
                "missing front matter block".to_string(),
            )
        })?;

        let mut mapping: Mapping = serde_yaml::from_str(header).map_err(|e| {
            SongStoreError::FrontMatter(path.display().to_string(), e.to_string())
        })?;

        mapping.insert(
            Value::String("lrcLibId".to_string()),
            Value::Number(lrclib_id.into()),
        );
        mapping.insert(
            Value::String("isVerified".to_string()),
            Value::Bool(is_verified),
        );
        if let Some(synced) = synced_lyrics {
            mapping.insert(
                Value::String("syncedLyrics".to_string()),
                Value::String(synced.to_string()),
            );
        }

        let yaml = serde_yaml::to_string(&mapping).map_err(|e| {
            SongStoreError::FrontMatter(path.display().to_string(), e.to_string())
        })?;

        fs::write(&path, format!("---\n{}---\n{}", yaml, body))?;
        debug!("Updated verification state for '{}'", slug);
        Ok(())
    }
}

/// Split a content file into its front matter header and body
///
/// The header is delimited by `---` lines at the very start of the file.
fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let pos = rest.find("\n---")?;
    let header = &rest[..pos + 1];
    let after = &rest[pos + 4..];
    let body = after
        .strip_prefix("\r\n")
        .or_else(|| after.strip_prefix('\n'))
        .unwrap_or(after);
    Some((header, body))
}
