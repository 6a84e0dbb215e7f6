//! Window functions for spectral analysis
//! 
//! Windows are generated in their periodic (DFT-even) form, which is the
//! convention for windowing a block before an FFT.

use crate::error::SpectralError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Window applied to a chunk before the Fourier transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    /// No windowing (rectangular)
    None,

    /// Hann window: w[n] = 0.5 - 0.5*cos(2πn/N)
    /// Sidelobe attenuation: ~31 dB
    Hann,

    /// Hamming window: w[n] = 0.54 - 0.46*cos(2πn/N)
    /// Sidelobe attenuation: ~43 dB
    Hamming,

    /// Blackman window: w[n] = 0.42 - 0.5*cos(2πn/N) + 0.08*cos(4πn/N)
    /// Sidelobe attenuation: ~58 dB
    Blackman,

    /// 4-term Blackman-Harris window
    /// Sidelobe attenuation: ~92 dB
    BlackmanHarris,

    /// 5-term flat top window, used where peak amplitude accuracy matters
    FlatTop,
}

impl WindowKind {
    /// Every supported window, in declaration order
    pub const ALL: [WindowKind; 6] = [
        WindowKind::None,
        WindowKind::Hann,
        WindowKind::Hamming,
        WindowKind::Blackman,
        WindowKind::BlackmanHarris,
        WindowKind::FlatTop,
    ];

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        match self {
            WindowKind::None => "none",
            WindowKind::Hann => "hann",
            WindowKind::Hamming => "hamming",
            WindowKind::Blackman => "blackman",
            WindowKind::BlackmanHarris => "blackman_harris",
            WindowKind::FlatTop => "flat_top",
        }
    }

    /// Generalized cosine-sum coefficients a_k, where
    /// w[n] = Σ (-1)^k * a_k * cos(2πkn/N)
    fn cosine_coefficients(&self) -> &'static [f64] {
        match self {
            WindowKind::None => &[1.0],
            WindowKind::Hann => &[0.5, 0.5],
            WindowKind::Hamming => &[0.54, 0.46],
            WindowKind::Blackman => &[0.42, 0.50, 0.08],
            WindowKind::BlackmanHarris => &[0.35875, 0.48829, 0.14128, 0.01168],
            WindowKind::FlatTop => &[
                0.215_578_95,
                0.416_631_58,
                0.277_263_158,
                0.083_578_947,
                0.006_947_368,
            ],
        }
    }

    /// Mean of the window coefficients (coherent gain)
    /// 
    /// A windowed sinusoid's spectral peak is scaled by this factor. The
    /// spectrum engine does not divide it out; callers needing calibrated
    /// amplitudes can.
    pub fn coherent_gain(&self, length: usize) -> f64 {
        if length == 0 {
            return 0.0;
        }
        let window = generate_window(*self, length);
        window.iter().sum::<f64>() / length as f64
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WindowKind {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "rectangular" | "boxcar" => Ok(WindowKind::None),
            "hann" | "hanning" => Ok(WindowKind::Hann),
            "hamming" => Ok(WindowKind::Hamming),
            "blackman" => Ok(WindowKind::Blackman),
            "blackman_harris" | "blackmanharris" => Ok(WindowKind::BlackmanHarris),
            "flat_top" | "flattop" => Ok(WindowKind::FlatTop),
            other => Err(SpectralError::InvalidParameter(format!(
                "unknown window kind '{}'",
                other
            ))),
        }
    }
}

/// Generate periodic window coefficients
/// 
/// # Arguments
/// * `kind` - Window function
/// * `length` - Number of samples (N)
/// 
/// # Returns
/// Vector of window coefficients w[n] for n = 0..N-1
pub fn generate_window(kind: WindowKind, length: usize) -> Vec<f64> {
    // Degenerate lengths have no taper to apply
    if length <= 1 || kind == WindowKind::None {
        return vec![1.0; length];
    }

    let coeffs = kind.cosine_coefficients();
    let n_total = length as f64;

    (0..length)
        .map(|n| {
            let base = 2.0 * PI * n as f64 / n_total;
            coeffs
                .iter()
                .enumerate()
                .map(|(k, &a)| {
                    let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                    sign * a * (base * k as f64).cos()
                })
                .sum()
        })
        .collect()
}
