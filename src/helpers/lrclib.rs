use log::{debug, error, info};
use thiserror::Error;

use crate::data::LrclibCandidate;
use crate::helpers::http_client::{self, HttpClient, HttpClientError};
use crate::helpers::ratelimit;

/// Default LRCLIB API endpoint
pub const DEFAULT_BASE_URL: &str = "https://lrclib.net/api";

/// Service name used for rate-limit registration
pub const RATELIMIT_SERVICE: &str = "lrclib";

/// Client identification header sent with every request, as the LRCLIB
/// usage guidelines ask of automated clients
const CLIENT_HEADER: (&str, &str) = (
    "Lrclib-Client",
    "lyricsync v0.1.0 (https://wookiefoot.com)",
);

/// Candidates within this many seconds of the expected duration are accepted
const DURATION_TOLERANCE_SECS: f64 = 5.0;

/// Error type for direct LRCLIB lookups
#[derive(Debug, Error)]
pub enum LrclibError {
    #[error("LRCLIB API error: {0}")]
    Api(String),

    #[error("Failed to parse LRCLIB response: {0}")]
    Parse(String),
}

/// Search parameters for a free-text LRCLIB lookup
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub album_name: Option<String>,
    /// Expected duration in seconds, used to pick between candidates
    pub duration: Option<u32>,
}

/// Client for the LRCLIB lyrics database
///
/// The HTTP transport is injected so tests can run against canned
/// responses without network access.
pub struct LrclibClient {
    http: Box<dyn HttpClient>,
    base_url: String,
}

impl LrclibClient {
    /// Create a client against the public LRCLIB endpoint
    pub fn new(http: Box<dyn HttpClient>) -> Self {
        Self::with_base_url(http, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint
    pub fn with_base_url(http: Box<dyn HttpClient>, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client with the default ureq transport
    pub fn default_client() -> Self {
        Self::new(http_client::new_http_client(10))
    }

    fn get(&self, url: &str) -> Result<String, HttpClientError> {
        ratelimit::acquire(RATELIMIT_SERVICE);
        self.http.get_with_headers(url, &[CLIENT_HEADER])
    }

    /// Fetch a single candidate by its LRCLIB id
    ///
    /// Returns `Ok(None)` when the remote reports 404; any other failure
    /// is an error carrying the status text.
    pub fn get_lyrics_by_id(&self, id: u64) -> Result<Option<LrclibCandidate>, LrclibError> {
        let url = format!("{}/get/{}", self.base_url, id);
        debug!("Fetching LRCLIB record: {}", url);

        match self.get(&url) {
            Ok(body) => serde_json::from_str::<LrclibCandidate>(&body)
                .map(Some)
                .map_err(|e| LrclibError::Parse(e.to_string())),
            Err(HttpClientError::NotFound) => {
                debug!("LRCLIB record {} not found", id);
                Ok(None)
            }
            Err(e) => Err(LrclibError::Api(e.to_string())),
        }
    }

    /// Free-text search for candidates
    ///
    /// The query concatenates track, artist and album name in that order.
    /// Returns an empty list on any error; callers must treat "no results"
    /// as a normal outcome, not a failure.
    pub fn search_lyrics(&self, params: &SearchParams) -> Vec<LrclibCandidate> {
        let mut terms: Vec<&str> = Vec::new();
        if let Some(track) = params.track_name.as_deref() {
            terms.push(track);
        }
        if let Some(artist) = params.artist_name.as_deref() {
            terms.push(artist);
        }
        if let Some(album) = params.album_name.as_deref() {
            terms.push(album);
        }

        let query = terms.join(" ");
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(&query));
        debug!("LRCLIB search request: {}", url);

        match self.get(&url) {
            Ok(body) => match serde_json::from_str::<Vec<LrclibCandidate>>(&body) {
                Ok(results) => {
                    debug!("LRCLIB search found {} results", results.len());
                    results
                }
                Err(e) => {
                    error!("Failed to parse LRCLIB search response: {}", e);
                    Vec::new()
                }
            },
            Err(e) => {
                error!("LRCLIB search failed: {}", e);
                Vec::new()
            }
        }
    }

    /// Search and pick a candidate for the given track metadata
    ///
    /// Defaults to the first search result. When an expected duration was
    /// supplied, the first candidate within the tolerance wins instead.
    /// This is a first-acceptable policy, not a closest-of-all ranking.
    pub fn get_lyrics(&self, params: &SearchParams) -> Option<LrclibCandidate> {
        let results = self.search_lyrics(params);
        if results.is_empty() {
            info!(
                "No search results for '{}'",
                params.track_name.as_deref().unwrap_or("")
            );
            return None;
        }

        let mut best_index = 0;
        if let Some(expected) = params.duration {
            for (index, candidate) in results.iter().enumerate() {
                if (candidate.duration - expected as f64).abs() <= DURATION_TOLERANCE_SECS {
                    best_index = index;
                    break;
                }
            }
        }

        let best = results.into_iter().nth(best_index);
        if let Some(candidate) = &best {
            debug!(
                "Best match: id={} track='{}' artist='{}' duration={}",
                candidate.id, candidate.track_name, candidate.artist_name, candidate.duration
            );
        }
        best
    }
}

/// Convert a "MM:SS" duration string to integer seconds
pub fn convert_duration_to_seconds(duration: &str) -> Option<u32> {
    let (minutes, seconds) = duration.split_once(':')?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    let seconds: u32 = seconds.trim().parse().ok()?;
    Some(minutes * 60 + seconds)
}

/// Convert integer seconds to a "MM:SS" string with zero-padded seconds
pub fn convert_seconds_to_minutes(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::http_client::HttpClientError;

    /// HTTP stand-in matching requests by URL substring
    #[derive(Debug, Clone, Default)]
    struct FakeHttpClient {
        responses: Vec<(String, Result<String, String>)>,
    }

    impl FakeHttpClient {
        fn with_response(mut self, url_part: &str, body: &str) -> Self {
            self.responses
                .push((url_part.to_string(), Ok(body.to_string())));
            self
        }

        fn with_not_found(mut self, url_part: &str) -> Self {
            self.responses
                .push((url_part.to_string(), Err("not found".to_string())));
            self
        }
    }

    impl HttpClient for FakeHttpClient {
        fn get_with_headers(
            &self,
            url: &str,
            headers: &[(&str, &str)],
        ) -> Result<String, HttpClientError> {
            assert!(
                headers.iter().any(|(name, _)| *name == "Lrclib-Client"),
                "every request must carry the client identification header"
            );
            for (part, response) in &self.responses {
                if url.contains(part.as_str()) {
                    return match response {
                        Ok(body) => Ok(body.clone()),
                        Err(_) => Err(HttpClientError::NotFound),
                    };
                }
            }
            Err(HttpClientError::ServerError("500 Internal Server Error".to_string()))
        }

        fn clone_box(&self) -> Box<dyn HttpClient> {
            Box::new(self.clone())
        }
    }

    fn candidate_json(id: u64, duration: f64) -> String {
        format!(
            r#"{{"id": {}, "trackName": "Song", "artistName": "Wookiefoot",
                "albumName": "Album", "duration": {}, "instrumental": false,
                "plainLyrics": "la la la", "syncedLyrics": null}}"#,
            id, duration
        )
    }

    #[test]
    fn test_get_lyrics_by_id_not_found_is_none() {
        let http = FakeHttpClient::default().with_not_found("/get/999999");
        let client = LrclibClient::with_base_url(Box::new(http), "http://fake/api");

        let result = client.get_lyrics_by_id(999999);
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_get_lyrics_by_id_success() {
        let http =
            FakeHttpClient::default().with_response("/get/42", &candidate_json(42, 200.0));
        let client = LrclibClient::with_base_url(Box::new(http), "http://fake/api");

        let candidate = client.get_lyrics_by_id(42).unwrap().unwrap();
        assert_eq!(candidate.id, 42);
        assert_eq!(candidate.plain_lyrics_text(), "la la la");
    }

    #[test]
    fn test_get_lyrics_by_id_server_error_is_err() {
        let http = FakeHttpClient::default();
        let client = LrclibClient::with_base_url(Box::new(http), "http://fake/api");

        assert!(client.get_lyrics_by_id(1).is_err());
    }

    #[test]
    fn test_search_error_yields_empty_list() {
        let http = FakeHttpClient::default();
        let client = LrclibClient::with_base_url(Box::new(http), "http://fake/api");

        let params = SearchParams {
            track_name: Some("anything".to_string()),
            ..Default::default()
        };
        assert!(client.search_lyrics(&params).is_empty());
    }

    #[test]
    fn test_search_query_is_url_encoded() {
        let body = format!("[{}]", candidate_json(1, 100.0));
        let http = FakeHttpClient::default().with_response("q=Ready%20or%20Not%20Wookiefoot", &body);
        let client = LrclibClient::with_base_url(Box::new(http), "http://fake/api");

        let params = SearchParams {
            track_name: Some("Ready or Not".to_string()),
            artist_name: Some("Wookiefoot".to_string()),
            ..Default::default()
        };
        assert_eq!(client.search_lyrics(&params).len(), 1);
    }

    #[test]
    fn test_get_lyrics_defaults_to_first_result() {
        let body = format!(
            "[{},{}]",
            candidate_json(1, 100.0),
            candidate_json(2, 200.0)
        );
        let http = FakeHttpClient::default().with_response("/search", &body);
        let client = LrclibClient::with_base_url(Box::new(http), "http://fake/api");

        let params = SearchParams {
            track_name: Some("Song".to_string()),
            ..Default::default()
        };
        assert_eq!(client.get_lyrics(&params).unwrap().id, 1);
    }

    #[test]
    fn test_get_lyrics_picks_first_within_duration_tolerance() {
        let body = format!(
            "[{},{},{}]",
            candidate_json(1, 300.0),
            candidate_json(2, 184.0),
            candidate_json(3, 180.0)
        );
        let http = FakeHttpClient::default().with_response("/search", &body);
        let client = LrclibClient::with_base_url(Box::new(http), "http://fake/api");

        let params = SearchParams {
            track_name: Some("Song".to_string()),
            duration: Some(180),
            ..Default::default()
        };
        // First acceptable, not closest: id 2 is within 5s and comes first
        assert_eq!(client.get_lyrics(&params).unwrap().id, 2);
    }

    #[test]
    fn test_get_lyrics_keeps_first_when_no_duration_matches() {
        let body = format!(
            "[{},{}]",
            candidate_json(1, 300.0),
            candidate_json(2, 400.0)
        );
        let http = FakeHttpClient::default().with_response("/search", &body);
        let client = LrclibClient::with_base_url(Box::new(http), "http://fake/api");

        let params = SearchParams {
            track_name: Some("Song".to_string()),
            duration: Some(180),
            ..Default::default()
        };
        assert_eq!(client.get_lyrics(&params).unwrap().id, 1);
    }

    #[test]
    fn test_duration_conversions() {
        assert_eq!(convert_duration_to_seconds("3:45"), Some(225));
        assert_eq!(convert_duration_to_seconds("12:07"), Some(727));
        assert_eq!(convert_duration_to_seconds("0:05"), Some(5));
        assert_eq!(convert_duration_to_seconds("345"), None);
        assert_eq!(convert_duration_to_seconds("a:b"), None);

        assert_eq!(convert_seconds_to_minutes(225), "3:45");
        assert_eq!(convert_seconds_to_minutes(727), "12:07");
        assert_eq!(convert_seconds_to_minutes(5), "0:05");
    }

    #[test]
    fn test_duration_round_trip() {
        for input in ["3:45", "12:07", "0:05", "59:59"] {
            let seconds = convert_duration_to_seconds(input).unwrap();
            assert_eq!(convert_seconds_to_minutes(seconds), input);
        }
    }
}
