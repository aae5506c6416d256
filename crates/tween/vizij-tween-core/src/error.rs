//! Error types for the tween scheduler

use thiserror::Error;

/// Contract violations and configuration failures.
///
/// The scheduler never mutates its registry or recycles a tween when one of these
/// is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TweenError {
    /// The tween is not present in the active registry
    #[error("tween is not registered")]
    NotRegistered,

    /// The slot at `index` is empty or holds a different tween
    #[error("slot {index} does not hold the given tween (registry length {len})")]
    IndexMismatch { index: usize, len: usize },

    /// Configuration document was rejected
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl From<serde_json::Error> for TweenError {
    fn from(err: serde_json::Error) -> Self {
        TweenError::InvalidConfig {
            reason: err.to_string(),
        }
    }
}
