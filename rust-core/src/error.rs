//! Error types shared by every stage of the spectral core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectralError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid filter specification: {0}")]
    InvalidFilterSpec(String),

    #[error("Signal too short for zero-phase filtering: got {len} samples, need at least {required}")]
    SignalTooShort { len: usize, required: usize },

    #[error("FFT processing failed: {0}")]
    Transform(String),
}

pub type Result<T> = std::result::Result<T, SpectralError>;

/// Reject sample rates that are not strictly positive and finite
pub(crate) fn validate_sample_rate(sample_rate: f64) -> Result<()> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(SpectralError::InvalidParameter(format!(
            "sample_rate must be positive and finite (got {})",
            sample_rate
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_rate_validation() {
        assert!(validate_sample_rate(1000.0).is_ok());
        assert!(validate_sample_rate(0.0).is_err());
        assert!(validate_sample_rate(-48000.0).is_err());
        assert!(validate_sample_rate(f64::NAN).is_err());
        assert!(validate_sample_rate(f64::INFINITY).is_err());
    }

    #[test]
    fn test_too_short_message() {
        let err = SpectralError::SignalTooShort { len: 10, required: 28 };
        let msg = err.to_string();
        assert!(msg.contains("10"));
        assert!(msg.contains("28"));
    }
}
