//! Cascaded second-order sections
//! 
//! Each section is run in Direct Form II Transposed. The cascade itself holds
//! only coefficients; filter state lives in the call that processes a buffer,
//! so one designed cascade can be shared across threads.

use num_complex::Complex64;

/// One biquad: H(z) = (b0 + b1*z^-1 + b2*z^-2) / (1 + a1*z^-1 + a2*z^-2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrderSection {
    /// Numerator coefficients [b0, b1, b2]
    b: [f64; 3],
    /// Denominator coefficients [a1, a2] (a0 is normalized to 1)
    a: [f64; 2],
}

impl SecondOrderSection {
    pub fn new(b: [f64; 3], a: [f64; 2]) -> Self {
        Self { b, a }
    }

    /// Bandpass section: zeros at z = ±1, poles at `p` and its conjugate
    pub fn from_conjugate_poles(p: Complex64) -> Self {
        Self::new([1.0, 0.0, -1.0], [-2.0 * p.re, p.norm_sqr()])
    }

    /// Bandpass section: zeros at z = ±1, two real poles
    pub fn from_real_poles(p1: f64, p2: f64) -> Self {
        Self::new([1.0, 0.0, -1.0], [-(p1 + p2), p1 * p2])
    }

    pub fn numerator(&self) -> &[f64; 3] {
        &self.b
    }

    pub fn denominator(&self) -> &[f64; 2] {
        &self.a
    }

    pub(crate) fn scale_numerator(&mut self, gain: f64) {
        for coeff in self.b.iter_mut() {
            *coeff *= gain;
        }
    }

    /// Largest pole magnitude of the section
    pub fn pole_radius(&self) -> f64 {
        let [a1, a2] = self.a;
        let disc = a1 * a1 - 4.0 * a2;
        if disc < 0.0 {
            a2.abs().sqrt()
        } else {
            let root = disc.sqrt();
            ((-a1 + root) / 2.0).abs().max(((-a1 - root) / 2.0).abs())
        }
    }

    /// Stability triangle: |a2| < 1 and |a1| < 1 + a2
    pub fn is_stable(&self) -> bool {
        self.a[1].abs() < 1.0 && self.a[0].abs() < 1.0 + self.a[1]
    }

    /// Gain at z = 1
    pub fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (1.0 + self.a[0] + self.a[1])
    }

    /// State reached after a long run of unit input (step steady state)
    pub fn step_state(&self) -> [f64; 2] {
        let y = self.dc_gain();
        let z1 = self.b[2] - self.a[1] * y;
        let z0 = self.b[1] - self.a[0] * y + z1;
        [z0, z1]
    }

    /// Complex response at normalized angular frequency `omega` (rad/sample)
    pub fn response(&self, omega: f64) -> Complex64 {
        let z_inv = Complex64::from_polar(1.0, -omega);
        let z_inv2 = z_inv * z_inv;

        let num = self.b[0] + self.b[1] * z_inv + self.b[2] * z_inv2;
        let den = 1.0 + self.a[0] * z_inv + self.a[1] * z_inv2;
        num / den
    }

    #[inline]
    fn process(&self, input: f64, state: &mut [f64; 2]) -> f64 {
        let output = self.b[0] * input + state[0];
        state[0] = self.b[1] * input - self.a[0] * output + state[1];
        state[1] = self.b[2] * input - self.a[1] * output;
        output
    }
}

/// IIR filter as a cascade of second-order sections
#[derive(Debug, Clone, PartialEq)]
pub struct SosCascade {
    sections: Vec<SecondOrderSection>,
}

impl SosCascade {
    pub fn new(sections: Vec<SecondOrderSection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[SecondOrderSection] {
        &self.sections
    }

    /// Number of poles of the full transfer function
    pub fn order(&self) -> usize {
        self.sections.len() * 2
    }

    pub fn is_stable(&self) -> bool {
        self.sections.iter().all(|s| s.is_stable())
    }

    /// Per-section states for a unit-step steady state
    /// 
    /// Each section's state is scaled by the DC gain of the sections ahead of
    /// it. Multiply by the first input sample to start a run without a
    /// start-up transient.
    pub fn step_initial_conditions(&self) -> Vec<[f64; 2]> {
        let mut scale = 1.0;
        self.sections
            .iter()
            .map(|section| {
                let [z0, z1] = section.step_state();
                let state = [z0 * scale, z1 * scale];
                scale *= section.dc_gain();
                state
            })
            .collect()
    }

    /// Filter a buffer, starting from `initial * x0` state in every section
    /// 
    /// # Arguments
    /// * `input` - Samples to filter
    /// * `initial` - Per-section initial conditions (zeros if empty)
    /// * `x0` - Scale applied to the initial conditions
    pub fn filter(&self, input: &[f64], initial: &[[f64; 2]], x0: f64) -> Vec<f64> {
        let mut states: Vec<[f64; 2]> = (0..self.sections.len())
            .map(|i| {
                initial
                    .get(i)
                    .map(|&[z0, z1]| [z0 * x0, z1 * x0])
                    .unwrap_or([0.0; 2])
            })
            .collect();

        input
            .iter()
            .map(|&x| {
                self.sections
                    .iter()
                    .zip(states.iter_mut())
                    .fold(x, |acc, (section, state)| section.process(acc, state))
            })
            .collect()
    }

    /// Complex frequency response at `freq_hz`
    pub fn frequency_response(&self, freq_hz: f64, sample_rate: f64) -> Complex64 {
        let omega = 2.0 * std::f64::consts::PI * freq_hz / sample_rate;
        self.sections
            .iter()
            .fold(Complex64::new(1.0, 0.0), |acc, s| acc * s.response(omega))
    }

    /// Magnitude response in dB at `freq_hz`
    pub fn magnitude_response_db(&self, freq_hz: f64, sample_rate: f64) -> f64 {
        20.0 * self.frequency_response(freq_hz, sample_rate).norm().max(1e-300).log10()
    }
}
