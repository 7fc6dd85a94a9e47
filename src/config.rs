// Configuration utilities for lyricsync
//
// Configuration lives in a single JSON file. Service-specific settings sit
// under a "services" subtree, with a top-level fallback kept for older
// config files.

use log::debug;
use thiserror::Error;

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {0}: {1}")]
    Io(String, std::io::Error),

    #[error("Failed to parse configuration file {0}: {1}")]
    Parse(String, serde_json::Error),
}

/// Load a JSON configuration file
pub fn load_config(path: &str) -> Result<serde_json::Value, ConfigError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_string(), e))?;
    serde_json::from_str(&content).map_err(|e| ConfigError::Parse(path.to_string(), e))
}

/// Helper function to get service configuration with backward compatibility
///
/// This function first tries to find the service in the "services" structure,
/// then falls back to the old top-level structure for backward compatibility.
///
/// # Arguments
/// * `config` - The configuration JSON object
/// * `service_name` - The name of the service to look up (e.g., "lrclib")
///
/// # Returns
/// * `Option<&serde_json::Value>` - The service configuration if found, None otherwise
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use lyricsync::config::get_service_config;
///
/// let config = json!({
///   "services": {
///     "lrclib": { "enable": true }
///   }
/// });
///
/// if let Some(lrclib_config) = get_service_config(&config, "lrclib") {
///     assert_eq!(lrclib_config["enable"], true);
/// }
///
/// // Old structure (backward compatibility):
/// let old_config = json!({
///   "lrclib": { "enable": false }
/// });
///
/// if let Some(lrclib_config) = get_service_config(&old_config, "lrclib") {
///     assert_eq!(lrclib_config["enable"], false);
/// }
/// ```
pub fn get_service_config<'a>(
    config: &'a serde_json::Value,
    service_name: &str,
) -> Option<&'a serde_json::Value> {
    if let Some(services) = config.get("services") {
        if let Some(service_config) = services.get(service_name) {
            debug!("Found {} configuration in services section", service_name);
            return Some(service_config);
        }
    }

    // Fall back to the old top-level structure for backward compatibility
    if let Some(service_config) = config.get(service_name) {
        debug!(
            "Found {} configuration at top level (legacy structure)",
            service_name
        );
        return Some(service_config);
    }

    debug!(
        "No {} configuration found in either services section or top level",
        service_name
    );
    None
}
