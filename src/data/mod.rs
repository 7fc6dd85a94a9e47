pub mod candidate;
pub mod track;
pub mod verification;

pub use candidate::LrclibCandidate;
pub use track::Track;
pub use verification::{BatchSummary, TrackOutcome, VerificationOutcome};
