//! Matrix front end: one chunk per row
//! 
//! Rows are independent chunks of equal length sharing a sample rate (for
//! example one row per machine). The first failing row aborts the batch.

use crate::error::{validate_sample_rate, Result};
use crate::filters::design::FilterSpec;
use crate::filters::windows::WindowKind;
use crate::filters::zero_phase::BandpassFilter;
use crate::envelope::hilbert::extract_envelope;
use crate::signal::TimeSeriesSignal;
use crate::spectrum::analysis::{compute_spectrum, Spectrum};
use crate::spectrum::fft::bin_frequencies;
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Spectra of every row, sharing one frequency axis
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumBatch {
    /// Frequency axis in Hz (floor(columns/2) entries)
    pub frequencies: Vec<f64>,

    /// Amplitudes, one row per input chunk
    pub amplitudes: Array2<f64>,
}

impl SpectrumBatch {
    /// Spectrum of a single row
    pub fn row(&self, index: usize) -> Option<Spectrum> {
        if index >= self.amplitudes.nrows() {
            return None;
        }
        Spectrum::new(self.frequencies.clone(), self.amplitudes.row(index).to_vec()).ok()
    }
}

/// Windowed amplitude spectrum of every row
pub fn compute_spectra(
    chunks: ArrayView2<f64>,
    sample_rate: f64,
    window: WindowKind,
) -> Result<SpectrumBatch> {
    map_rows(chunks, sample_rate, |signal| compute_spectrum(signal, window))
}

/// Envelope spectrum of every row
/// 
/// The bandpass, if any, is designed once and reused for all rows.
pub fn compute_envelope_spectra(
    chunks: ArrayView2<f64>,
    sample_rate: f64,
    bandpass_filter: Option<&FilterSpec>,
) -> Result<SpectrumBatch> {
    let filter = bandpass_filter
        .map(|spec| BandpassFilter::design(spec, sample_rate))
        .transpose()?;

    map_rows(chunks, sample_rate, |signal| {
        let envelope = match (&filter, signal.is_empty()) {
            (Some(filter), false) => extract_envelope(&filter.apply_to(signal)?),
            _ => extract_envelope(signal),
        };
        compute_spectrum(&envelope, WindowKind::None)
    })
}

fn map_rows<F>(chunks: ArrayView2<f64>, sample_rate: f64, analyze: F) -> Result<SpectrumBatch>
where
    F: Fn(&TimeSeriesSignal) -> Result<Spectrum>,
{
    validate_sample_rate(sample_rate)?;

    let columns = chunks.ncols();
    let frequencies = bin_frequencies(columns, sample_rate);
    let mut amplitudes = Array2::zeros((chunks.nrows(), frequencies.len()));

    for (row, mut out) in chunks.rows().into_iter().zip(amplitudes.rows_mut()) {
        let signal = TimeSeriesSignal::new(row.to_vec(), sample_rate)?;
        let spectrum = analyze(&signal)?;
        out.assign(&ArrayView1::from(spectrum.amplitudes()));
    }

    log::debug!(
        "analyzed {} chunks of {} samples into {} bins",
        chunks.nrows(),
        columns,
        frequencies.len()
    );

    Ok(SpectrumBatch {
        frequencies,
        amplitudes,
    })
}
