//! Error taxonomy for the bootstrap engine.
//!
//! Every error is local and recoverable: an operation that returns `Err`
//! leaves the sample and the accumulated bootstrap sequences untouched.

/// Errors reported by the bootstrap engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BootstrapError {
    /// A parameter is outside its valid domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An operation needing a non-empty base sample was called without one.
    #[error("no data: the base sample is empty")]
    EmptySample,

    /// A sequence is too short for the requested computation.
    #[error("insufficient data: need at least {needed} values, got {actual}")]
    InsufficientData { needed: usize, actual: usize },

    /// A distribution name did not match any supported family.
    #[error("unknown distribution: {0:?}")]
    UnknownDistribution(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            BootstrapError::EmptySample.to_string(),
            "no data: the base sample is empty"
        );
        assert_eq!(
            BootstrapError::InsufficientData {
                needed: 1,
                actual: 0
            }
            .to_string(),
            "insufficient data: need at least 1 values, got 0"
        );
        assert_eq!(
            BootstrapError::UnknownDistribution("cauchy".into()).to_string(),
            "unknown distribution: \"cauchy\""
        );
    }
}
