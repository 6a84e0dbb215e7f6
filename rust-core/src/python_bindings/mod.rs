//! PyO3 bindings for Python integration

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use crate::error::SpectralError;

mod filter_bindings;
mod spectrum_bindings;
mod envelope_bindings;

impl From<SpectralError> for PyErr {
    fn from(err: SpectralError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn vibration_spectral(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(spectrum_bindings::py_compute_spectrum, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::py_compute_spectra, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::py_waveform_metrics, m)?)?;
    m.add_function(wrap_pyfunction!(spectrum_bindings::py_synthesize_waveform, m)?)?;

    m.add_function(wrap_pyfunction!(envelope_bindings::py_compute_envelope_spectrum, m)?)?;
    m.add_function(wrap_pyfunction!(envelope_bindings::py_compute_envelope_spectra, m)?)?;
    m.add_function(wrap_pyfunction!(envelope_bindings::py_extract_envelope, m)?)?;

    m.add_function(wrap_pyfunction!(filter_bindings::py_bandpass, m)?)?;
    m.add_class::<filter_bindings::PyBandpassFilter>()?;

    Ok(())
}
