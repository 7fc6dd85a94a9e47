use serde::{Deserialize, Serialize};

/// A locally authored song record parsed from a content file
///
/// The slug doubles as the content record's file name (without extension).
/// Verification updates `lrclib_id`, `is_verified` and `synced_lyrics` in
/// the backing record; everything else is authored by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Song title
    pub title: String,
    /// Stable identifier, also the record file name
    pub slug: String,
    /// Album this song belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_id: Option<String>,
    /// Duration in "MM:SS" format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Plain lyric transcript (the content body)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<String>,
    /// LRCLIB record id from a previous verification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lrclib_id: Option<u64>,
    /// Whether the transcript was verified against LRCLIB
    #[serde(default)]
    pub is_verified: bool,
    /// Time-tagged transcript, lines prefixed with [MM:SS.xx]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synced_lyrics: Option<String>,
}

impl Track {
    /// Create a new Track with only title and slug set
    pub fn new(title: &str, slug: &str) -> Self {
        Self {
            title: title.to_string(),
            slug: slug.to_string(),
            album_id: None,
            duration: None,
            lyrics: None,
            tags: Vec::new(),
            contributors: Vec::new(),
            lrclib_id: None,
            is_verified: false,
            synced_lyrics: None,
        }
    }

    /// Set the plain lyric transcript
    pub fn with_lyrics(mut self, lyrics: &str) -> Self {
        self.lyrics = Some(lyrics.to_string());
        self
    }

    /// Set the duration ("MM:SS") for better candidate matching
    pub fn with_duration(mut self, duration: &str) -> Self {
        self.duration = Some(duration.to_string());
        self
    }

    /// Set a known LRCLIB id so verification can skip the search
    pub fn with_lrclib_id(mut self, id: u64) -> Self {
        self.lrclib_id = Some(id);
        self
    }
}
