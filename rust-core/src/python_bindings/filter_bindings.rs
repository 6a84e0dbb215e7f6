//! Python bindings for zero-phase bandpass filtering

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use numpy::{PyArray1, PyArray2, PyReadonlyArray1};
use ndarray::Array2;
use crate::filters::{BandpassFilter, FilterSpec};

/// Designed Butterworth bandpass exposed to Python
#[pyclass(name = "BandpassFilter")]
pub struct PyBandpassFilter {
    filter: BandpassFilter,
}

#[pymethods]
impl PyBandpassFilter {
    /// Design a zero-phase Butterworth bandpass
    /// 
    /// Args:
    ///     low_cutoff: Lower edge in Hz
    ///     high_cutoff: Upper edge in Hz
    ///     sample_rate: Sample rate in Hz
    ///     order: Prototype order (default: 4)
    #[new]
    #[pyo3(signature = (low_cutoff, high_cutoff, sample_rate, order=4))]
    fn new(low_cutoff: f64, high_cutoff: f64, sample_rate: f64, order: usize) -> PyResult<Self> {
        let spec = FilterSpec::new(low_cutoff, high_cutoff).with_order(order);
        Ok(Self {
            filter: BandpassFilter::design(&spec, sample_rate)?,
        })
    }

    /// Filter a chunk forward and backward
    /// 
    /// Args:
    ///     signal: Input samples as numpy array
    /// 
    /// Returns:
    ///     Filtered output as numpy array (same length)
    fn apply<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let input = signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let output = self.filter.filtfilt(input)?;

        Ok(PyArray1::from_vec(py, output))
    }

    /// Second-order sections as an (n_sections, 6) array [b0, b1, b2, 1, a1, a2]
    fn get_sos<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray2<f64>> {
        let sections = self.filter.cascade().sections();
        let sos = Array2::from_shape_fn((sections.len(), 6), |(i, j)| {
            let section = &sections[i];
            match j {
                0..=2 => section.numerator()[j],
                3 => 1.0,
                _ => section.denominator()[j - 4],
            }
        });
        Ok(PyArray2::from_owned_array(py, sos))
    }

    /// Magnitude response in dB at a frequency in Hz
    fn magnitude_response_db(&self, freq_hz: f64) -> f64 {
        self.filter
            .cascade()
            .magnitude_response_db(freq_hz, self.filter.sample_rate())
    }

    /// Shortest chunk the filter accepts
    fn min_signal_length(&self) -> usize {
        self.filter.min_signal_length()
    }

    /// Number of second-order sections
    fn num_sections(&self) -> usize {
        self.filter.cascade().sections().len()
    }
}

/// One-shot zero-phase bandpass of a chunk
#[pyfunction]
#[pyo3(name = "bandpass", signature = (signal, sample_rate, low_cutoff, high_cutoff, order=4))]
pub(crate) fn py_bandpass<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    sample_rate: f64,
    low_cutoff: f64,
    high_cutoff: f64,
    order: usize,
) -> PyResult<&'py PyArray1<f64>> {
    let input = signal
        .as_slice()
        .map_err(|e| PyValueError::new_err(e.to_string()))?;

    let spec = FilterSpec::new(low_cutoff, high_cutoff).with_order(order);
    let output = BandpassFilter::design(&spec, sample_rate)?.filtfilt(input)?;

    Ok(PyArray1::from_vec(py, output))
}
