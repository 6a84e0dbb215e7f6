//! Spectral analysis with FFT

pub mod fft;
pub mod windowing;
pub mod analysis;

pub use fft::FftEngine;
pub use windowing::{apply_window, apply_window_inplace};
pub use analysis::{Spectrum, SpectrumConfig, compute_spectrum, compute_spectrum_from_slice};
