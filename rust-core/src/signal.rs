//! Time-domain signal container
//! 
//! A finite chunk of real-valued samples captured at a fixed rate

use crate::error::{validate_sample_rate, Result};
use serde::Serialize;

/// Sample rate assumed by configurations that do not name one
pub const DEFAULT_SAMPLE_RATE: f64 = 2000.0;

/// Real-valued waveform chunk with its sample rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesSignal {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl TimeSeriesSignal {
    /// Create a signal, rejecting non-positive or non-finite sample rates
    /// 
    /// # Arguments
    /// * `samples` - Time-domain samples (may be empty)
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        validate_sample_rate(sample_rate)?;
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a signal by copying a borrowed slice
    pub fn from_slice(samples: &[f64], sample_rate: f64) -> Result<Self> {
        Self::new(samples.to_vec(), sample_rate)
    }

    /// Build a derived signal that keeps this signal's (already validated) rate
    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> Self {
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Nyquist frequency in Hz (half the sample rate)
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// Duration of the chunk in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Consume the signal and return its samples
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_basic() {
        let signal = TimeSeriesSignal::new(vec![0.0; 2048], 2000.0).unwrap();
        assert_eq!(signal.len(), 2048);
        assert_eq!(signal.nyquist(), 1000.0);
        assert!((signal.duration() - 1.024).abs() < 1e-12);
    }

    #[test]
    fn test_signal_rejects_bad_rate() {
        assert!(TimeSeriesSignal::new(vec![1.0], 0.0).is_err());
        assert!(TimeSeriesSignal::from_slice(&[1.0], -1.0).is_err());
    }

    #[test]
    fn test_empty_signal_is_valid() {
        let signal = TimeSeriesSignal::new(Vec::new(), 1000.0).unwrap();
        assert!(signal.is_empty());
        assert_eq!(signal.duration(), 0.0);
    }
}
