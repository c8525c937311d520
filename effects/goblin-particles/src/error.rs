use thiserror::Error;

/// Error types for particle field configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParticleError {
    /// A seeding range has its bounds reversed or is not finite
    #[error("Invalid range for {field}: [{min}, {max})")]
    InvalidRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    /// A frame budget range has its bounds reversed
    #[error("Invalid life span: [{min}, {max}) frames")]
    InvalidLifeSpan { min: u32, max: u32 },

    /// The twinkle bounds or step cannot produce an oscillation
    #[error("Invalid twinkle settings: {0}")]
    InvalidTwinkle(String),

    /// Any other configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type using ParticleError
pub type Result<T> = std::result::Result<T, ParticleError>;
