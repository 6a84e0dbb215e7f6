//! Python bindings for envelope analysis

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use crate::batch;
use crate::envelope::{hilbert, pipeline};
use crate::filters::FilterSpec;
use crate::signal::TimeSeriesSignal;

/// Envelope spectrum of a chunk
/// 
/// Args:
///     signal: Time-domain samples as numpy array
///     sample_rate: Sample rate in Hz
///     bandpass_filter: Optional (low_hz, high_hz) band isolated first
/// 
/// Returns:
///     (frequencies, amplitudes) as numpy arrays
#[pyfunction]
#[pyo3(name = "compute_envelope_spectrum", signature = (signal, sample_rate, bandpass_filter=None))]
pub(crate) fn py_compute_envelope_spectrum<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    sample_rate: f64,
    bandpass_filter: Option<(f64, f64)>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let samples = signal
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let spectrum =
        pipeline::compute_envelope_spectrum_from_slice(samples, sample_rate, bandpass_filter)?;
    let (frequencies, amplitudes) = spectrum.into_parts();

    Ok((PyArray1::from_vec(py, frequencies), PyArray1::from_vec(py, amplitudes)))
}

/// Envelope spectra of a 2-D array with one chunk per row
#[pyfunction]
#[pyo3(name = "compute_envelope_spectra", signature = (chunks, sample_rate, bandpass_filter=None))]
pub(crate) fn py_compute_envelope_spectra<'py>(
    py: Python<'py>,
    chunks: PyReadonlyArray2<f64>,
    sample_rate: f64,
    bandpass_filter: Option<(f64, f64)>,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray2<f64>)> {
    let spec = bandpass_filter.map(|(low, high)| FilterSpec::new(low, high));
    let result = batch::compute_envelope_spectra(chunks.as_array(), sample_rate, spec.as_ref())?;

    Ok((
        PyArray1::from_vec(py, result.frequencies),
        PyArray2::from_owned_array(py, result.amplitudes),
    ))
}

/// Mean-removed Hilbert envelope of a chunk
#[pyfunction]
#[pyo3(name = "extract_envelope")]
pub(crate) fn py_extract_envelope<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    sample_rate: f64,
) -> PyResult<&'py PyArray1<f64>> {
    let samples = signal
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let signal = TimeSeriesSignal::from_slice(samples, sample_rate)?;
    let envelope = hilbert::extract_envelope(&signal);

    Ok(PyArray1::from_vec(py, envelope.into_samples()))
}
