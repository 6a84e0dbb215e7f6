//! Scalar waveform metrics reported alongside spectra

use serde::{Deserialize, Serialize};

/// RMS, peak and crest factor of a raw chunk
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WaveformMetrics {
    /// Root mean square
    pub rms: f64,

    /// Largest absolute sample
    pub peak: f64,

    /// peak / rms (0 when rms is 0)
    pub crest_factor: f64,
}

impl WaveformMetrics {
    /// Compute metrics over a chunk; an empty chunk gives all zeros
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mean_square = samples.iter().map(|&x| x * x).sum::<f64>() / samples.len() as f64;
        let rms = mean_square.sqrt();
        let peak = samples.iter().fold(0.0_f64, |acc, &x| acc.max(x.abs()));
        let crest_factor = if rms > 0.0 { peak / rms } else { 0.0 };

        Self {
            rms,
            peak,
            crest_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_sine_metrics() {
        let samples: Vec<f64> = (0..1000)
            .map(|i| 2.0 * (2.0 * PI * 10.0 * i as f64 / 1000.0).sin())
            .collect();
        let metrics = WaveformMetrics::from_samples(&samples);

        assert!((metrics.rms - 2.0 / 2.0_f64.sqrt()).abs() < 1e-9);
        assert!((metrics.peak - 2.0).abs() < 1e-9);
        assert!((metrics.crest_factor - 2.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_negative_peak() {
        let metrics = WaveformMetrics::from_samples(&[0.5, -3.0, 1.0]);
        assert_eq!(metrics.peak, 3.0);
    }

    #[test]
    fn test_silent_and_empty() {
        let silent = WaveformMetrics::from_samples(&[0.0; 64]);
        assert_eq!(silent, WaveformMetrics::default());
        assert_eq!(WaveformMetrics::from_samples(&[]), WaveformMetrics::default());
    }
}
