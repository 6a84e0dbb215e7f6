//! FFT engine using realfft for real-valued signals
//! 
//! Plans are built for the exact chunk length, so any length is supported and
//! no zero-padding changes the bin spacing.

use crate::error::{Result, SpectralError};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Forward real FFT of a fixed size
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    /// 
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples, must be non-zero)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        Self { fft_size, r2c }
    }

    /// Compute the non-redundant half of the spectrum
    /// 
    /// # Arguments
    /// * `signal` - Input signal of exactly `fft_size` samples
    /// 
    /// # Returns
    /// Complex bins X[k] for k = 0..=fft_size/2, or `InvalidParameter` when
    /// the length does not match the plan
    pub fn forward(&self, signal: &[f64]) -> Result<Vec<Complex<f64>>> {
        if signal.len() != self.fft_size {
            return Err(SpectralError::InvalidParameter(format!(
                "FFT planned for {} samples received {}",
                self.fft_size,
                signal.len()
            )));
        }

        let mut input = self.r2c.make_input_vec();
        input.copy_from_slice(signal);

        let mut output = self.r2c.make_output_vec();
        self.r2c
            .process(&mut input, &mut output)
            .map_err(|e| SpectralError::Transform(e.to_string()))?;

        Ok(output)
    }

    /// Single-sided amplitude spectrum
    /// 
    /// Returns `2 * |X[k]| / N` for k in `[0, N/2)`. The Nyquist bin of
    /// even-length transforms is not included.
    pub fn single_sided_amplitude(&self, signal: &[f64]) -> Result<Vec<f64>> {
        let bins = self.forward(signal)?;
        let scale = 2.0 / self.fft_size as f64;

        Ok(bins
            .iter()
            .take(self.num_bins())
            .map(|c| c.norm() * scale)
            .collect())
    }

    /// Get FFT size
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of retained single-sided bins (floor(N/2))
    pub fn num_bins(&self) -> usize {
        self.fft_size / 2
    }

    /// Frequency axis in Hz for the retained bins
    pub fn frequency_axis(&self, sample_rate: f64) -> Vec<f64> {
        bin_frequencies(self.fft_size, sample_rate)
    }
}

/// Frequencies of the floor(N/2) single-sided bins: k * sample_rate / N
pub fn bin_frequencies(fft_size: usize, sample_rate: f64) -> Vec<f64> {
    if fft_size == 0 {
        return Vec::new();
    }
    let step = sample_rate / fft_size as f64;
    (0..fft_size / 2).map(|k| k as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_fft_dc_signal() {
        let fft = FftEngine::new(100);

        let signal = vec![1.0; 100];
        let bins = fft.forward(&signal).unwrap();

        // DC bin carries the sum of the samples
        assert!((bins[0].re - 100.0).abs() < 1e-9);
        assert!(bins[10].norm() < 1e-9);
    }

    #[test]
    fn test_fft_sine_amplitude() {
        let n = 1024;
        let fft = FftEngine::new(n);

        // Bin-centred sine, amplitude 2.5
        let signal: Vec<f64> = (0..n)
            .map(|i| 2.5 * (2.0 * PI * 64.0 * i as f64 / n as f64).sin())
            .collect();

        let amplitudes = fft.single_sided_amplitude(&signal).unwrap();
        assert_eq!(amplitudes.len(), 512);
        assert!((amplitudes[64] - 2.5).abs() < 1e-9);
        assert!(amplitudes[63] < 1e-9);
    }

    #[test]
    fn test_odd_length() {
        let fft = FftEngine::new(7);
        let amplitudes = fft.single_sided_amplitude(&[1.0; 7]).unwrap();
        assert_eq!(amplitudes.len(), 3);
        assert!((amplitudes[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let fft = FftEngine::new(8);

        for len in [0usize, 7, 9, 16] {
            let err = fft.forward(&vec![1.0; len]).unwrap_err();
            assert!(matches!(err, SpectralError::InvalidParameter(_)));
            assert!(fft.single_sided_amplitude(&vec![1.0; len]).is_err());
        }
    }

    #[test]
    fn test_frequency_axis() {
        let fft = FftEngine::new(1000);
        let freqs = fft.frequency_axis(1000.0);

        assert_eq!(freqs.len(), 500);
        assert_eq!(freqs[0], 0.0);
        assert!((freqs[50] - 50.0).abs() < 1e-12);
        assert!((freqs[499] - 499.0).abs() < 1e-9);
    }
}
