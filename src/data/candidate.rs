use serde::{Deserialize, Serialize};

/// A candidate record returned by the LRCLIB API
///
/// Field names follow the wire format (camelCase JSON). Candidates are
/// immutable once fetched; the reconciler only reads them while scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LrclibCandidate {
    /// LRCLIB numeric record id
    pub id: u64,
    #[serde(default)]
    pub track_name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album_name: String,
    /// Duration in seconds
    #[serde(default)]
    pub duration: f64,
    /// True for instrumental tracks (no lyrics)
    #[serde(default)]
    pub instrumental: bool,
    /// Plain-text lyrics, absent for instrumentals
    #[serde(default)]
    pub plain_lyrics: Option<String>,
    /// Time-tagged lyrics in LRC format, when available
    #[serde(default)]
    pub synced_lyrics: Option<String>,
}

impl LrclibCandidate {
    /// Plain lyrics text, empty for instrumentals
    pub fn plain_lyrics_text(&self) -> &str {
        self.plain_lyrics.as_deref().unwrap_or("")
    }
}
