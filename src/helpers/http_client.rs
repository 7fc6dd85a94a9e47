use log::{debug, error};
use std::time::Duration;
use thiserror::Error;

/// Error types that can occur when interacting with HTTP clients
#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("HTTP request error: {0}")]
    RequestError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    /// The server answered with HTTP 404
    #[error("Resource not found")]
    NotFound,
}

/// A trait for HTTP client implementations
/// This version avoids generic methods to enable dynamic dispatch
pub trait HttpClient: Send + Sync + std::fmt::Debug {
    /// Send a GET request with additional request headers
    fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<String, HttpClientError>;

    /// Send a GET request
    fn get(&self, url: &str) -> Result<String, HttpClientError> {
        self.get_with_headers(url, &[])
    }

    /// Clone the client as a boxed trait object
    fn clone_box(&self) -> Box<dyn HttpClient>;
}

impl Clone for Box<dyn HttpClient> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// An HTTP client implementation using ureq
#[derive(Clone, Debug)]
pub struct UreqHttpClient {
    timeout: Duration,
}

impl UreqHttpClient {
    /// Create a new HTTP client with the specified timeout
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for UreqHttpClient {
    /// Create a new HTTP client with default timeout (5 seconds)
    fn default() -> Self {
        Self::new(5)
    }
}

impl HttpClient for UreqHttpClient {
    fn get_with_headers(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<String, HttpClientError> {
        debug!("GET request to {}", url);

        let mut request = ureq::get(url).timeout(self.timeout);
        for (name, value) in headers {
            request = request.set(name, value);
        }

        match request.call() {
            Ok(response) => response.into_string().map_err(|e| {
                error!("Failed to read response body: {}", e);
                HttpClientError::ParseError(format!("Failed to read response body: {}", e))
            }),
            Err(ureq::Error::Status(404, _)) => Err(HttpClientError::NotFound),
            Err(ureq::Error::Status(code, response)) => {
                let status_text = response.status_text().to_string();
                error!("GET request failed with status {} {}", code, status_text);
                Err(HttpClientError::ServerError(format!(
                    "{} {}",
                    code, status_text
                )))
            }
            Err(e) => {
                error!("GET request failed: {}", e);
                Err(HttpClientError::RequestError(e.to_string()))
            }
        }
    }

    fn clone_box(&self) -> Box<dyn HttpClient> {
        Box::new(self.clone())
    }
}

/// Create a new HTTP client using the default implementation
pub fn new_http_client(timeout_secs: u64) -> Box<dyn HttpClient> {
    Box::new(UreqHttpClient::new(timeout_secs))
}
