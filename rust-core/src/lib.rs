//! Vibration Spectral Core - Machinery Fault Spectra
//! 
//! Windowed amplitude spectra and bandpass/Hilbert envelope spectra of
//! finite accelerometer chunks, with optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod error;
pub mod signal;
pub mod filters;
pub mod spectrum;
pub mod envelope;
pub mod metrics;
pub mod synth;
pub mod batch;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use error::{Result, SpectralError};
pub use signal::{TimeSeriesSignal, DEFAULT_SAMPLE_RATE};
pub use filters::{BandpassFilter, FilterSpec, WindowKind};
pub use spectrum::{Spectrum, SpectrumConfig, compute_spectrum, compute_spectrum_from_slice};
pub use envelope::{EnvelopeConfig, compute_envelope_spectrum, compute_envelope_spectrum_from_slice, extract_envelope};
pub use metrics::WaveformMetrics;
pub use synth::{MachineCondition, SynthesisConfig, synthesize_waveform};
pub use batch::{SpectrumBatch, compute_envelope_spectra, compute_spectra};
