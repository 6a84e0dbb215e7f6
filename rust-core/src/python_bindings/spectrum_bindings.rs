//! Python bindings for spectrum analysis

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyArray2, PyReadonlyArray1, PyReadonlyArray2};
use crate::batch;
use crate::filters::WindowKind;
use crate::metrics::WaveformMetrics;
use crate::spectrum::analysis;
use crate::synth::{self, MachineCondition, SynthesisConfig};

/// Compute the single-sided amplitude spectrum of a chunk
/// 
/// Args:
///     signal: Time-domain samples as numpy array
///     sample_rate: Sample rate in Hz
///     window: One of "none", "hann", "hamming", "blackman",
///         "blackman_harris", "flat_top" (default: "hann")
/// 
/// Returns:
///     (frequencies, amplitudes) as numpy arrays
#[pyfunction]
#[pyo3(name = "compute_spectrum", signature = (signal, sample_rate, window="hann"))]
pub(crate) fn py_compute_spectrum<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    sample_rate: f64,
    window: &str,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray1<f64>)> {
    let samples = signal
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let window: WindowKind = window.parse()?;

    let spectrum = analysis::compute_spectrum_from_slice(samples, sample_rate, window)?;
    let (frequencies, amplitudes) = spectrum.into_parts();

    Ok((PyArray1::from_vec(py, frequencies), PyArray1::from_vec(py, amplitudes)))
}

/// Spectra of a 2-D array with one chunk per row
/// 
/// Returns:
///     (frequencies, amplitudes) where amplitudes has one row per chunk
#[pyfunction]
#[pyo3(name = "compute_spectra", signature = (chunks, sample_rate, window="hann"))]
pub(crate) fn py_compute_spectra<'py>(
    py: Python<'py>,
    chunks: PyReadonlyArray2<f64>,
    sample_rate: f64,
    window: &str,
) -> PyResult<(&'py PyArray1<f64>, &'py PyArray2<f64>)> {
    let window: WindowKind = window.parse()?;
    let result = batch::compute_spectra(chunks.as_array(), sample_rate, window)?;

    Ok((
        PyArray1::from_vec(py, result.frequencies),
        PyArray2::from_owned_array(py, result.amplitudes),
    ))
}

/// RMS, peak and crest factor of a chunk
/// 
/// Returns:
///     (rms, peak, crest_factor)
#[pyfunction]
#[pyo3(name = "waveform_metrics")]
pub(crate) fn py_waveform_metrics(signal: PyReadonlyArray1<f64>) -> PyResult<(f64, f64, f64)> {
    let samples = signal
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let metrics = WaveformMetrics::from_samples(samples);
    Ok((metrics.rms, metrics.peak, metrics.crest_factor))
}

/// Generate a noise-free chunk for a machine condition
/// 
/// Args:
///     condition: "healthy", "imbalance", "misalignment" or "bearing_fault"
///     sample_rate: Sample rate in Hz (default: 2000)
///     num_samples: Chunk length (default: 2048)
#[pyfunction]
#[pyo3(name = "synthesize_waveform", signature = (condition, sample_rate=2000.0, num_samples=2048))]
pub(crate) fn py_synthesize_waveform<'py>(
    py: Python<'py>,
    condition: &str,
    sample_rate: f64,
    num_samples: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let config = SynthesisConfig {
        sample_rate,
        num_samples,
        ..SynthesisConfig::default()
    };
    let condition: MachineCondition = condition.parse()?;
    let signal = synth::synthesize_waveform(condition, &config)?;
    Ok(PyArray1::from_vec(py, signal.into_samples()))
}
