//! Envelope spectrum: optional bandpass → demodulation → spectrum
//! 
//! Bearing defects ring a structural resonance at their repeat rate. Isolating
//! the resonance and demodulating it turns the repeat rate into a plain
//! low-frequency peak of the envelope spectrum.

use super::hilbert::extract_envelope;
use crate::error::Result;
use crate::filters::design::FilterSpec;
use crate::filters::windows::WindowKind;
use crate::filters::zero_phase::BandpassFilter;
use crate::signal::{TimeSeriesSignal, DEFAULT_SAMPLE_RATE};
use crate::spectrum::analysis::{compute_spectrum, Spectrum};
use serde::{Deserialize, Serialize};

/// Envelope analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    /// Sample rate of the chunks in Hz
    pub sample_rate: f64,

    /// Band isolated before demodulation; `None` demodulates the raw chunk
    pub bandpass: Option<FilterSpec>,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            bandpass: None,
        }
    }
}

impl EnvelopeConfig {
    /// Run the pipeline over raw samples taken at the configured rate
    pub fn compute(&self, samples: &[f64]) -> Result<Spectrum> {
        let signal = TimeSeriesSignal::from_slice(samples, self.sample_rate)?;
        compute_envelope_spectrum(&signal, self.bandpass.as_ref())
    }
}

/// Compute the envelope spectrum of a signal
/// 
/// # Arguments
/// * `signal` - Raw vibration chunk
/// * `bandpass_filter` - Band to isolate first (no filter is applied when `None`)
/// 
/// # Errors
/// Filter validation (`InvalidFilterSpec`, `InvalidParameter`) and
/// `SignalTooShort` are returned unchanged. An empty chunk with a valid (or
/// absent) filter yields an empty spectrum.
pub fn compute_envelope_spectrum(
    signal: &TimeSeriesSignal,
    bandpass_filter: Option<&FilterSpec>,
) -> Result<Spectrum> {
    log::trace!(
        "envelope spectrum: {} samples at {} Hz, bandpass {:?}",
        signal.len(),
        signal.sample_rate(),
        bandpass_filter
    );

    let filtered = match bandpass_filter {
        Some(spec) => {
            let filter = BandpassFilter::design(spec, signal.sample_rate())?;
            if signal.is_empty() {
                return Ok(Spectrum::empty());
            }
            Some(filter.apply_to(signal)?)
        }
        None => None,
    };

    let envelope = extract_envelope(filtered.as_ref().unwrap_or(signal));

    // The envelope is already smooth; it is transformed unwindowed
    compute_spectrum(&envelope, WindowKind::None)
}

/// Slice-level entry point with the band given as `(low_hz, high_hz)`
pub fn compute_envelope_spectrum_from_slice(
    samples: &[f64],
    sample_rate: f64,
    bandpass_filter: Option<(f64, f64)>,
) -> Result<Spectrum> {
    let signal = TimeSeriesSignal::from_slice(samples, sample_rate)?;
    let spec = bandpass_filter.map(|(low, high)| FilterSpec::new(low, high));
    compute_envelope_spectrum(&signal, spec.as_ref())
}
