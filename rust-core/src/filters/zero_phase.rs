//! Zero-phase bandpass filtering
//! 
//! The designed cascade is run forward, then backward over the reversed
//! output, so magnitude is squared and phase cancels. Both ends are extended
//! by odd reflection and each pass starts from the step steady state scaled
//! to its first sample, which keeps edge transients out of the result.

use super::design::{design_butterworth_bandpass, FilterSpec};
use super::iir::SosCascade;
use crate::error::{Result, SpectralError};
use crate::signal::TimeSeriesSignal;

/// Designed Butterworth bandpass, ready to filter chunks at one sample rate
#[derive(Debug, Clone)]
pub struct BandpassFilter {
    spec: FilterSpec,
    sample_rate: f64,
    cascade: SosCascade,
}

impl BandpassFilter {
    /// Validate `spec` against `sample_rate` and design the filter
    pub fn design(spec: &FilterSpec, sample_rate: f64) -> Result<Self> {
        let sections = design_butterworth_bandpass(spec, sample_rate)?;
        Ok(Self {
            spec: *spec,
            sample_rate,
            cascade: SosCascade::new(sections),
        })
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn cascade(&self) -> &SosCascade {
        &self.cascade
    }

    /// Samples of odd extension added at each end
    pub fn pad_length(&self) -> usize {
        self.spec.pad_length()
    }

    /// Shortest chunk that can be filtered
    pub fn min_signal_length(&self) -> usize {
        self.pad_length() + 1
    }

    /// Zero-phase filter raw samples taken at the design sample rate
    /// 
    /// # Errors
    /// `SignalTooShort` if `samples.len() <= pad_length()`
    pub fn filtfilt(&self, samples: &[f64]) -> Result<Vec<f64>> {
        let n = samples.len();
        let padlen = self.pad_length();
        if n <= padlen {
            return Err(SpectralError::SignalTooShort {
                len: n,
                required: self.min_signal_length(),
            });
        }

        let extended = odd_extend(samples, padlen);
        let zi = self.cascade.step_initial_conditions();

        let forward = self.cascade.filter(&extended, &zi, extended[0]);
        let reversed: Vec<f64> = forward.into_iter().rev().collect();
        let backward = self.cascade.filter(&reversed, &zi, reversed[0]);

        Ok(backward.into_iter().rev().skip(padlen).take(n).collect())
    }

    /// Zero-phase filter a signal captured at the design sample rate
    pub fn apply_to(&self, signal: &TimeSeriesSignal) -> Result<TimeSeriesSignal> {
        if signal.sample_rate() != self.sample_rate {
            return Err(SpectralError::InvalidParameter(format!(
                "filter designed for {} Hz cannot process a {} Hz signal",
                self.sample_rate,
                signal.sample_rate()
            )));
        }
        let filtered = self.filtfilt(signal.samples())?;
        Ok(signal.with_samples(filtered))
    }
}

/// Zero-phase Butterworth bandpass of a signal
/// 
/// # Arguments
/// * `signal` - Input chunk
/// * `low_cutoff` - Lower edge in Hz
/// * `high_cutoff` - Upper edge in Hz
/// * `order` - Prototype order (4 is the usual choice)
pub fn apply(
    signal: &TimeSeriesSignal,
    low_cutoff: f64,
    high_cutoff: f64,
    order: usize,
) -> Result<TimeSeriesSignal> {
    let spec = FilterSpec::new(low_cutoff, high_cutoff).with_order(order);
    apply_spec(signal, &spec)
}

/// Zero-phase bandpass described by a `FilterSpec`
pub fn apply_spec(signal: &TimeSeriesSignal, spec: &FilterSpec) -> Result<TimeSeriesSignal> {
    BandpassFilter::design(spec, signal.sample_rate())?.apply_to(signal)
}

/// Reflect `padlen` samples about each endpoint: 2*x[0] - x[i], 2*x[n-1] - x[n-1-i]
fn odd_extend(samples: &[f64], padlen: usize) -> Vec<f64> {
    let n = samples.len();
    let first = samples[0];
    let last = samples[n - 1];

    let mut extended = Vec::with_capacity(n + 2 * padlen);
    extended.extend((1..=padlen).rev().map(|i| 2.0 * first - samples[i]));
    extended.extend_from_slice(samples);
    extended.extend((1..=padlen).map(|i| 2.0 * last - samples[n - 1 - i]));
    extended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::design::MAX_FILTER_ORDER;
    use std::f64::consts::PI;

    fn sine(freq_hz: f64, sample_rate: f64, n: usize) -> TimeSeriesSignal {
        let samples = (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f64 / sample_rate).sin())
            .collect();
        TimeSeriesSignal::new(samples, sample_rate).unwrap()
    }

    #[test]
    fn test_odd_extend() {
        let extended = odd_extend(&[1.0, 2.0, 4.0, 7.0], 2);
        assert_eq!(extended, vec![-2.0, 0.0, 1.0, 2.0, 4.0, 7.0, 10.0, 12.0]);
    }

    #[test]
    fn test_inverted_band_rejected() {
        let signal = sine(1000.0, 10_000.0, 512);
        let err = apply(&signal, 1200.0, 800.0, 4).unwrap_err();
        assert!(matches!(err, SpectralError::InvalidFilterSpec(_)));
    }

    #[test]
    fn test_short_signal_rejected() {
        let signal = sine(1000.0, 10_000.0, 27);
        let err = apply(&signal, 800.0, 1200.0, 4).unwrap_err();
        assert_eq!(err, SpectralError::SignalTooShort { len: 27, required: 28 });

        // One more sample is enough
        let signal = sine(1000.0, 10_000.0, 28);
        assert_eq!(apply(&signal, 800.0, 1200.0, 4).unwrap().len(), 28);
    }

    #[test]
    fn test_passband_is_preserved_without_phase_shift() {
        let signal = sine(1000.0, 10_000.0, 4000);
        let filtered = apply(&signal, 800.0, 1200.0, 4).unwrap();

        assert_eq!(filtered.len(), signal.len());
        assert_eq!(filtered.sample_rate(), signal.sample_rate());

        // Away from the edges the output tracks the input sample for sample
        for i in 1000..3000 {
            let diff = (filtered.samples()[i] - signal.samples()[i]).abs();
            assert!(diff < 0.02, "sample {} differs by {}", i, diff);
        }
    }

    #[test]
    fn test_stopband_is_removed() {
        let signal = sine(100.0, 10_000.0, 4000);
        let filtered = apply(&signal, 800.0, 1200.0, 4).unwrap();

        let max_mid = filtered.samples()[1000..3000]
            .iter()
            .fold(0.0_f64, |acc, &x| acc.max(x.abs()));
        assert!(max_mid < 1e-3, "stopband leak {}", max_mid);
    }

    #[test]
    fn test_filter_rejects_other_sample_rate() {
        let filter = BandpassFilter::design(&FilterSpec::new(800.0, 1200.0), 10_000.0).unwrap();
        let signal = sine(1000.0, 8000.0, 512);
        let err = filter.apply_to(&signal).unwrap_err();
        assert!(matches!(err, SpectralError::InvalidParameter(_)));
    }

    #[test]
    fn test_designed_filter_is_reusable() {
        let filter = BandpassFilter::design(&FilterSpec::new(800.0, 1200.0), 10_000.0).unwrap();
        assert_eq!(filter.min_signal_length(), 28);
        assert_eq!(filter.cascade().order(), 8);
        assert!(filter.cascade().is_stable());

        let signal = sine(1000.0, 10_000.0, 1024);
        let first = filter.apply_to(&signal).unwrap();
        let second = filter.apply_to(&signal).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_high_order_stays_bounded() {
        // 1 kHz at 10 kHz: samples peak at sin(72 deg)
        let signal = sine(1000.0, 10_000.0, 8000);
        let expected_peak = (0.4 * PI).sin();

        let filtered = apply(&signal, 800.0, 1200.0, MAX_FILTER_ORDER).unwrap();
        assert!(filtered.samples().iter().all(|x| x.is_finite()));

        let max_mid = filtered.samples()[3000..5000]
            .iter()
            .fold(0.0_f64, |acc, &x| acc.max(x.abs()));
        assert!((max_mid - expected_peak).abs() < 0.02, "mid max {}", max_mid);

        for order in [300, 600] {
            let err = apply(&signal, 800.0, 1200.0, order).unwrap_err();
            assert!(matches!(err, SpectralError::InvalidFilterSpec(_)));
        }
    }
}
