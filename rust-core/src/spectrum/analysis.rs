//! Single-sided amplitude spectrum of a waveform chunk
//! 
//! Combines windowing with the FFT engine. Amplitudes are normalized as
//! `2 * |X[k]| / N` and are not corrected for window gain.

use super::fft::FftEngine;
use super::windowing::apply_window_inplace;
use crate::error::{Result, SpectralError};
use crate::filters::windows::WindowKind;
use crate::signal::{TimeSeriesSignal, DEFAULT_SAMPLE_RATE};
use serde::{Deserialize, Deserializer, Serialize};

/// Spectrum analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectrumConfig {
    /// Window applied before the transform
    pub window: WindowKind,

    /// Sample rate of the chunks in Hz
    pub sample_rate: f64,
}

impl Default for SpectrumConfig {
    fn default() -> Self {
        Self {
            window: WindowKind::Hann,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

impl SpectrumConfig {
    /// Spectrum of raw samples taken at the configured rate
    pub fn compute(&self, samples: &[f64]) -> Result<Spectrum> {
        compute_spectrum_from_slice(samples, self.sample_rate, self.window)
    }
}

/// Frequency axis and matching amplitudes
/// 
/// Both vectors always have the same length; frequencies ascend from 0 Hz.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Spectrum {
    frequencies: Vec<f64>,
    amplitudes: Vec<f64>,
}

impl<'de> Deserialize<'de> for Spectrum {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Parts {
            frequencies: Vec<f64>,
            amplitudes: Vec<f64>,
        }

        let parts = Parts::deserialize(deserializer)?;
        Spectrum::new(parts.frequencies, parts.amplitudes).map_err(serde::de::Error::custom)
    }
}

impl Spectrum {
    /// Build a spectrum from matching frequency and amplitude vectors
    /// 
    /// # Errors
    /// `InvalidParameter` unless the lengths match, the axis starts at 0 Hz
    /// and strictly ascends, and every amplitude is finite and non-negative
    pub fn new(frequencies: Vec<f64>, amplitudes: Vec<f64>) -> Result<Self> {
        if frequencies.len() != amplitudes.len() {
            return Err(SpectralError::InvalidParameter(format!(
                "spectrum has {} frequencies but {} amplitudes",
                frequencies.len(),
                amplitudes.len()
            )));
        }
        if let Some(&first) = frequencies.first() {
            if first != 0.0 {
                return Err(SpectralError::InvalidParameter(format!(
                    "spectrum axis must start at 0 Hz, not {} Hz",
                    first
                )));
            }
        }
        if let Some(pos) = frequencies.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(SpectralError::InvalidParameter(format!(
                "spectrum axis must strictly ascend (bin {} is {} Hz after {} Hz)",
                pos + 1,
                frequencies[pos + 1],
                frequencies[pos]
            )));
        }
        if let Some((idx, &amp)) = amplitudes
            .iter()
            .enumerate()
            .find(|(_, &a)| !a.is_finite() || a < 0.0)
        {
            return Err(SpectralError::InvalidParameter(format!(
                "amplitude at bin {} must be finite and non-negative (got {})",
                idx, amp
            )));
        }

        Ok(Self {
            frequencies,
            amplitudes,
        })
    }

    /// Spectrum with no bins (result for empty chunks)
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    pub fn amplitudes(&self) -> &[f64] {
        &self.amplitudes
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Bin spacing in Hz, if the spectrum has at least two bins
    pub fn resolution(&self) -> Option<f64> {
        match self.frequencies.as_slice() {
            [f0, f1, ..] => Some(f1 - f0),
            _ => None,
        }
    }

    /// Frequency and amplitude of the largest bin
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.peak_in_band(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Largest bin whose frequency lies in `[low_hz, high_hz]`
    pub fn peak_in_band(&self, low_hz: f64, high_hz: f64) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(self.amplitudes.iter())
            .filter(|(&f, _)| f >= low_hz && f <= high_hz)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(&f, &a)| (f, a))
    }

    /// Index of the bin nearest to `freq_hz` (ties go to the higher bin)
    pub fn nearest_bin(&self, freq_hz: f64) -> Option<usize> {
        if self.is_empty() || !freq_hz.is_finite() {
            return None;
        }
        let upper = self.frequencies.partition_point(|&f| f < freq_hz);
        if upper == 0 {
            return Some(0);
        }
        if upper == self.len() {
            return Some(self.len() - 1);
        }
        let below = freq_hz - self.frequencies[upper - 1];
        let above = self.frequencies[upper] - freq_hz;
        Some(if below < above { upper - 1 } else { upper })
    }

    /// Amplitude of the bin nearest to `freq_hz`
    pub fn amplitude_at(&self, freq_hz: f64) -> Option<f64> {
        self.nearest_bin(freq_hz).map(|idx| self.amplitudes[idx])
    }

    /// Amplitudes in dB relative to `reference`
    pub fn amplitudes_db(&self, reference: f64) -> Vec<f64> {
        self.amplitudes
            .iter()
            .map(|&mag| {
                let mag_clamped = mag.max(1e-10); // Avoid log(0)
                20.0 * (mag_clamped / reference).log10()
            })
            .collect()
    }

    /// Consume the spectrum into `(frequencies, amplitudes)`
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.frequencies, self.amplitudes)
    }
}

/// Compute the windowed single-sided amplitude spectrum of a signal
/// 
/// # Arguments
/// * `signal` - Time-domain chunk
/// * `window` - Window applied before the transform (`WindowKind::None` to skip)
/// 
/// # Returns
/// Spectrum with floor(n/2) bins; an empty spectrum for n < 2
pub fn compute_spectrum(signal: &TimeSeriesSignal, window: WindowKind) -> Result<Spectrum> {
    let n = signal.len();
    if n / 2 == 0 {
        return Ok(Spectrum::empty());
    }

    let mut windowed = signal.samples().to_vec();
    apply_window_inplace(&mut windowed, window);

    let engine = FftEngine::new(n);
    let amplitudes = engine.single_sided_amplitude(&windowed)?;
    let frequencies = engine.frequency_axis(signal.sample_rate());

    Spectrum::new(frequencies, amplitudes)
}

/// Slice-level entry point: validates the sample rate, then computes the spectrum
pub fn compute_spectrum_from_slice(
    samples: &[f64],
    sample_rate: f64,
    window: WindowKind,
) -> Result<Spectrum> {
    let signal = TimeSeriesSignal::from_slice(samples, sample_rate)?;
    compute_spectrum(&signal, window)
}
