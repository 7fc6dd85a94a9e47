/// Data types for tracks, remote candidates and verification results
pub mod data;

/// Helper utilities: HTTP client, LRCLIB access, matching, content store
pub mod helpers;

/// Batch reconciliation driver
pub mod reconciler;

/// Configuration utilities
pub mod config;

// Re-export the most commonly used types
pub use data::{LrclibCandidate, Track, VerificationOutcome};
pub use reconciler::Reconciler;
