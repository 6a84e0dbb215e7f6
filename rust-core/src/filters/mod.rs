//! Window functions and zero-phase IIR bandpass filtering

pub mod windows;
pub mod design;
pub mod iir;
pub mod zero_phase;

pub use windows::{WindowKind, generate_window};
pub use design::{FilterSpec, DEFAULT_FILTER_ORDER, MAX_FILTER_ORDER, design_butterworth_bandpass};
pub use iir::{SecondOrderSection, SosCascade};
pub use zero_phase::{BandpassFilter, apply, apply_spec};
