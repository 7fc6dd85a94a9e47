use serde::{Deserialize, Serialize};

/// Outcome of scoring one local transcript against a remote candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    /// True when the confidence is strictly above the match threshold
    pub is_match: bool,
    /// Similarity score in [0, 1]
    pub confidence: f64,
    /// LRCLIB id of the scored candidate
    pub lrclib_id: Option<u64>,
    /// Plain lyrics of the candidate
    pub lyrics: Option<String>,
    /// Time-tagged lyrics of the candidate, when available
    pub synced_lyrics: Option<String>,
}

impl VerificationOutcome {
    /// The outcome when no candidate was found at all
    pub fn no_match() -> Self {
        Self {
            is_match: false,
            confidence: 0.0,
            lrclib_id: None,
            lyrics: None,
            synced_lyrics: None,
        }
    }
}

/// Per-track result of a batch run
///
/// Errors are contained at the track boundary and reported as values; the
/// batch loop never sees a panic or an Err.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackOutcome {
    /// A match was found and the content record was updated
    Verified,
    /// No candidate scored above the threshold
    NoMatch,
    /// Verification was aborted for this track
    Failed(String),
}

/// Aggregated statistics for a full catalog pass
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Number of tracks processed
    pub total: usize,
    /// Number of tracks verified and persisted
    pub verified: usize,
    /// Titles of tracks that did not verify
    pub failed: Vec<String>,
}

impl BatchSummary {
    /// Percentage of verified tracks, 0.0 for an empty catalog
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.verified as f64 / self.total as f64 * 100.0
        }
    }

    /// Render the summary as a human-readable report block
    pub fn report(&self) -> String {
        let failed_block = if self.failed.is_empty() {
            "None".to_string()
        } else {
            self.failed
                .iter()
                .map(|title| format!("- {}", title))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "Lyrics Verification Report\n\
             -------------------------\n\
             Total Tracks: {}\n\
             Verified: {}\n\
             Success Rate: {:.1}%\n\
             \n\
             Failed Tracks:\n\
             {}",
            self.total,
            self.verified,
            self.success_rate(),
            failed_block
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_match_outcome() {
        let outcome = VerificationOutcome::no_match();
        assert!(!outcome.is_match);
        assert_eq!(outcome.confidence, 0.0);
        assert!(outcome.lrclib_id.is_none());
    }

    #[test]
    fn test_report_format() {
        let summary = BatchSummary {
            total: 3,
            verified: 2,
            failed: vec!["Lost at Sea".to_string()],
        };

        let report = summary.report();
        assert!(report.contains("Total Tracks: 3"));
        assert!(report.contains("Verified: 2"));
        assert!(report.contains("Success Rate: 66.7%"));
        assert!(report.contains("- Lost at Sea"));
    }

    #[test]
    fn test_report_no_failures() {
        let summary = BatchSummary {
            total: 2,
            verified: 2,
            failed: Vec::new(),
        };

        let report = summary.report();
        assert!(report.contains("Success Rate: 100.0%"));
        assert!(report.contains("Failed Tracks:\nNone"));
    }

    #[test]
    fn test_success_rate_empty_catalog() {
        let summary = BatchSummary::default();
        assert_eq!(summary.success_rate(), 0.0);
    }
}
