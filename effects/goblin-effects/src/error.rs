use thiserror::Error;

/// Error types for effect options
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EffectsError {
    /// Intersection threshold outside `[0, 1]`
    #[error("Invalid reveal threshold: {0} (expected 0.0..=1.0)")]
    InvalidThreshold(f32),

    /// Animation duration that is zero or negative
    #[error("Invalid duration for {effect}: {reason}")]
    InvalidDuration {
        effect: &'static str,
        reason: String,
    },

    /// Any other option out of range
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

/// Result type using EffectsError
pub type Result<T> = std::result::Result<T, EffectsError>;
