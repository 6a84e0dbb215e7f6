//! Envelope demodulation and the envelope spectrum pipeline

pub mod hilbert;
pub mod pipeline;

pub use hilbert::{analytic_signal, extract_envelope};
pub use pipeline::{EnvelopeConfig, compute_envelope_spectrum, compute_envelope_spectrum_from_slice};
