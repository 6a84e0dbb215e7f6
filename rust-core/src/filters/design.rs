//! Butterworth bandpass design
//! 
//! Analog Butterworth prototype → lowpass-to-bandpass transform around the
//! prewarped band edges → bilinear transform. The digital filter is returned
//! as cascaded second-order sections; a design of order N has 2N poles and
//! therefore N sections.

use super::iir::SecondOrderSection;
use crate::error::{validate_sample_rate, Result, SpectralError};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Prototype order used when the caller does not pick one
pub const DEFAULT_FILTER_ORDER: usize = 4;

/// Highest prototype order accepted; beyond it the bilinear poles crowd the
/// unit circle and the cascade loses precision
pub const MAX_FILTER_ORDER: usize = 32;

fn default_order() -> usize {
    DEFAULT_FILTER_ORDER
}

/// Bandpass filter specification in Hz
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Lower -3 dB edge in Hz
    pub low_cutoff: f64,

    /// Upper -3 dB edge in Hz
    pub high_cutoff: f64,

    /// Butterworth prototype order (the bandpass has twice as many poles)
    #[serde(default = "default_order")]
    pub order: usize,
}

impl FilterSpec {
    /// Bandpass spec with the default order of 4
    pub fn new(low_cutoff: f64, high_cutoff: f64) -> Self {
        Self {
            low_cutoff,
            high_cutoff,
            order: DEFAULT_FILTER_ORDER,
        }
    }

    /// Same band with a different prototype order
    pub fn with_order(self, order: usize) -> Self {
        Self { order, ..self }
    }

    /// Cutoffs normalized to the Nyquist frequency, after validation
    /// 
    /// # Errors
    /// * `InvalidParameter` for a bad sample rate
    /// * `InvalidFilterSpec` if `order` is outside `1..=MAX_FILTER_ORDER`,
    ///   `low >= high`, or either edge falls outside `(0, Nyquist)`
    pub fn normalized_cutoffs(&self, sample_rate: f64) -> Result<(f64, f64)> {
        validate_sample_rate(sample_rate)?;

        if self.order == 0 {
            return Err(SpectralError::InvalidFilterSpec(
                "filter order must be at least 1".to_string(),
            ));
        }
        if self.order > MAX_FILTER_ORDER {
            return Err(SpectralError::InvalidFilterSpec(format!(
                "filter order {} exceeds the maximum of {}",
                self.order, MAX_FILTER_ORDER
            )));
        }
        if !self.low_cutoff.is_finite() || !self.high_cutoff.is_finite() {
            return Err(SpectralError::InvalidFilterSpec(format!(
                "cutoffs must be finite (got {} Hz, {} Hz)",
                self.low_cutoff, self.high_cutoff
            )));
        }
        if self.low_cutoff >= self.high_cutoff {
            return Err(SpectralError::InvalidFilterSpec(format!(
                "low_cutoff ({} Hz) must be below high_cutoff ({} Hz)",
                self.low_cutoff, self.high_cutoff
            )));
        }

        let nyquist = sample_rate / 2.0;
        let low = self.low_cutoff / nyquist;
        let high = self.high_cutoff / nyquist;

        let edges = [
            ("low_cutoff", low, self.low_cutoff),
            ("high_cutoff", high, self.high_cutoff),
        ];
        for (name, value, hz) in edges {
            if value <= 0.0 || value >= 1.0 {
                return Err(SpectralError::InvalidFilterSpec(format!(
                    "{} ({} Hz) must lie strictly between 0 and Nyquist ({} Hz)",
                    name, hz, nyquist
                )));
            }
        }

        Ok((low, high))
    }

    /// Edge-extension length used by zero-phase filtering: 3 * (2N + 1)
    pub fn pad_length(&self) -> usize {
        3 * (2 * self.order + 1)
    }
}

/// Design a digital Butterworth bandpass as second-order sections
/// 
/// # Arguments
/// * `spec` - Band edges in Hz and prototype order
/// * `sample_rate` - Sample rate in Hz
/// 
/// # Returns
/// `spec.order` sections sharing the overall gain equally
/// 
/// # Errors
/// `InvalidFilterSpec` if the spec is invalid or the finished cascade has a
/// non-finite coefficient or a pole on or outside the unit circle
pub fn design_butterworth_bandpass(
    spec: &FilterSpec,
    sample_rate: f64,
) -> Result<Vec<SecondOrderSection>> {
    let (low, high) = spec.normalized_cutoffs(sample_rate)?;
    let order = spec.order;

    // Bilinear transform with fs = 2 (frequencies normalized to Nyquist)
    let fs2 = 4.0;
    let warped_low = fs2 * (PI * low / 2.0).tan();
    let warped_high = fs2 * (PI * high / 2.0).tan();
    let bandwidth = warped_high - warped_low;
    let center = (warped_low * warped_high).sqrt();

    // Lowpass prototype poles on the left half of the unit circle
    let prototype: Vec<Complex64> = (0..order)
        .map(|k| {
            let m = 2.0 * k as f64 + 1.0 - order as f64;
            -Complex64::from_polar(1.0, PI * m / (2.0 * order as f64))
        })
        .collect();

    // Lowpass → bandpass: each prototype pole splits into two
    let mut analog_poles = Vec::with_capacity(2 * order);
    for &p in &prototype {
        let scaled = p * (bandwidth / 2.0);
        let disc = (scaled * scaled - center * center).sqrt();
        analog_poles.push(scaled + disc);
        analog_poles.push(scaled - disc);
    }

    // The bandpass adds `order` zeros at s = 0 with gain bandwidth^order.
    // Bilinear maps those zeros to z = +1 and the excess to z = -1. The
    // overall gain (4 * bandwidth)^order / prod(4 - p) is positive and is
    // accumulated in log form so high orders neither overflow nor underflow.
    let log_gain = order as f64 * (fs2 * bandwidth).ln()
        - analog_poles
            .iter()
            .map(|&p| (Complex64::new(fs2, 0.0) - p).norm().ln())
            .sum::<f64>();
    let section_gain = (log_gain / order as f64).exp();

    let digital_poles: Vec<Complex64> = analog_poles
        .iter()
        .map(|&p| (Complex64::new(fs2, 0.0) + p) / (Complex64::new(fs2, 0.0) - p))
        .collect();

    let mut sections = pair_poles(&digital_poles)?;
    if sections.len() != order {
        return Err(SpectralError::InvalidFilterSpec(format!(
            "design produced {} sections for order {}",
            sections.len(),
            order
        )));
    }

    // Poles nearest the unit circle go last
    sections.sort_by(|a, b| a.pole_radius().total_cmp(&b.pole_radius()));
    for section in &mut sections {
        section.scale_numerator(section_gain);
    }

    let finite = sections.iter().all(|s| {
        s.numerator().iter().chain(s.denominator().iter()).all(|c| c.is_finite())
    });
    if !finite || !sections.iter().all(|s| s.is_stable()) {
        return Err(SpectralError::InvalidFilterSpec(format!(
            "order-{} design for [{}, {}] Hz is numerically unstable",
            order, spec.low_cutoff, spec.high_cutoff
        )));
    }

    log::debug!(
        "designed order-{} Butterworth bandpass [{:.4}, {:.4}]·Nyquist as {} sections",
        order,
        low,
        high,
        sections.len()
    );

    Ok(sections)
}

/// Group digital poles into sections with zeros at z = +1 and z = -1
fn pair_poles(poles: &[Complex64]) -> Result<Vec<SecondOrderSection>> {
    const IMAG_EPS: f64 = 1e-12;

    let mut sections = Vec::with_capacity(poles.len() / 2);
    let mut real_poles = Vec::new();

    for &p in poles {
        if p.im > IMAG_EPS {
            sections.push(SecondOrderSection::from_conjugate_poles(p));
        } else if p.im.abs() <= IMAG_EPS {
            real_poles.push(p.re);
        }
    }

    if real_poles.len() % 2 != 0 {
        return Err(SpectralError::InvalidFilterSpec(
            "unpaired real pole in bandpass design".to_string(),
        ));
    }
    real_poles.sort_by(|a, b| a.total_cmp(b));
    for pair in real_poles.chunks_exact(2) {
        sections.push(SecondOrderSection::from_real_poles(pair[0], pair[1]));
    }

    Ok(sections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_magnitude(sections: &[SecondOrderSection], freq_hz: f64, sample_rate: f64) -> f64 {
        let omega = 2.0 * PI * freq_hz / sample_rate;
        sections
            .iter()
            .map(|s| s.response(omega))
            .fold(Complex64::new(1.0, 0.0), |acc, h| acc * h)
            .norm()
    }

    #[test]
    fn test_spec_validation() {
        let fs = 10_000.0;

        assert!(FilterSpec::new(800.0, 1200.0).normalized_cutoffs(fs).is_ok());

        for spec in [
            FilterSpec::new(1200.0, 800.0),
            FilterSpec::new(1000.0, 1000.0),
            FilterSpec::new(0.0, 1200.0),
            FilterSpec::new(-10.0, 1200.0),
            FilterSpec::new(800.0, 5000.0),
            FilterSpec::new(800.0, 6000.0),
            FilterSpec::new(f64::NAN, 1200.0),
            FilterSpec::new(800.0, 1200.0).with_order(0),
            FilterSpec::new(800.0, 1200.0).with_order(MAX_FILTER_ORDER + 1),
            FilterSpec::new(800.0, 1200.0).with_order(300),
        ] {
            let err = spec.normalized_cutoffs(fs).unwrap_err();
            assert!(
                matches!(err, SpectralError::InvalidFilterSpec(_)),
                "{:?} gave {:?}",
                spec,
                err
            );
        }
    }

    #[test]
    fn test_bad_sample_rate() {
        let err = FilterSpec::new(10.0, 20.0).normalized_cutoffs(0.0).unwrap_err();
        assert!(matches!(err, SpectralError::InvalidParameter(_)));
    }

    #[test]
    fn test_normalization() {
        let (low, high) = FilterSpec::new(800.0, 1200.0).normalized_cutoffs(4000.0).unwrap();
        assert!((low - 0.4).abs() < 1e-12);
        assert!((high - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_pad_length() {
        assert_eq!(FilterSpec::new(1.0, 2.0).pad_length(), 27);
        assert_eq!(FilterSpec::new(1.0, 2.0).with_order(2).pad_length(), 15);
    }

    #[test]
    fn test_bandpass_response() {
        let fs = 10_000.0;
        let spec = FilterSpec::new(800.0, 1200.0);
        let sections = design_butterworth_bandpass(&spec, fs).unwrap();

        assert_eq!(sections.len(), 4);
        assert!(sections.iter().all(|s| s.is_stable()));

        // -3 dB exactly at the edges thanks to prewarping
        let edge = 1.0 / 2.0_f64.sqrt();
        assert!((response_magnitude(&sections, 800.0, fs) - edge).abs() < 1e-6);
        assert!((response_magnitude(&sections, 1200.0, fs) - edge).abs() < 1e-6);

        // Flat passband, deep stopbands
        assert!((response_magnitude(&sections, 980.0, fs) - 1.0).abs() < 1e-3);
        assert!(response_magnitude(&sections, 0.0, fs) < 1e-9);
        assert!(response_magnitude(&sections, 5000.0, fs) < 1e-9);
        assert!(response_magnitude(&sections, 200.0, fs) < 1e-4);
    }

    #[test]
    fn test_odd_and_wide_designs() {
        // Wide band relative to its centre forces real analog poles
        let fs = 10_000.0;
        for spec in [
            FilterSpec::new(100.0, 3000.0).with_order(3),
            FilterSpec::new(50.0, 4000.0).with_order(5),
            FilterSpec::new(2000.0, 2100.0).with_order(1),
        ] {
            let sections = design_butterworth_bandpass(&spec, fs).unwrap();
            assert_eq!(sections.len(), spec.order);
            assert!(sections.iter().all(|s| s.is_stable()));

            let edge = 1.0 / 2.0_f64.sqrt();
            assert!((response_magnitude(&sections, spec.low_cutoff, fs) - edge).abs() < 1e-6);
            assert!((response_magnitude(&sections, spec.high_cutoff, fs) - edge).abs() < 1e-6);
        }
    }

    #[test]
    fn test_max_order_design() {
        let fs = 10_000.0;
        let spec = FilterSpec::new(800.0, 1200.0).with_order(MAX_FILTER_ORDER);
        let sections = design_butterworth_bandpass(&spec, fs).unwrap();

        assert_eq!(sections.len(), MAX_FILTER_ORDER);
        assert!(sections.iter().all(|s| s.is_stable()));
        assert!(sections
            .iter()
            .all(|s| s.numerator().iter().chain(s.denominator().iter()).all(|c| c.is_finite())));

        // Gain is shared, so no single section carries an extreme scale
        let scale = sections[0].numerator()[0];
        assert!(sections.iter().all(|s| (s.numerator()[0] - scale).abs() < 1e-12));

        assert!((response_magnitude(&sections, 1000.0, fs) - 1.0).abs() < 1e-3);
        assert!(response_magnitude(&sections, 500.0, fs) < 1e-6);
    }

    #[test]
    fn test_excessive_order_rejected() {
        for order in [MAX_FILTER_ORDER + 1, 300, 600] {
            let spec = FilterSpec::new(800.0, 1200.0).with_order(order);
            let err = design_butterworth_bandpass(&spec, 10_000.0).unwrap_err();
            assert!(matches!(err, SpectralError::InvalidFilterSpec(_)));
        }
    }
}
