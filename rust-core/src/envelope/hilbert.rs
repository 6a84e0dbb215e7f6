//! Analytic-signal envelope demodulation
//! 
//! The analytic signal is built with the FFT method: keep DC (and the Nyquist
//! bin for even lengths), double the positive frequencies, zero the negative
//! ones, and transform back. Its magnitude is the instantaneous amplitude.

use crate::signal::TimeSeriesSignal;
use num_complex::Complex64;
use rustfft::FftPlanner;

/// Analytic signal: real part is the input, imaginary part its Hilbert transform
pub fn analytic_signal(samples: &[f64]) -> Vec<Complex64> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);

    let mut buffer: Vec<Complex64> = samples.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    fft.process(&mut buffer);

    let half = n / 2;
    for (k, bin) in buffer.iter_mut().enumerate() {
        let weight = if k == 0 || (n % 2 == 0 && k == half) {
            1.0
        } else if k <= (n - 1) / 2 {
            2.0
        } else {
            0.0
        };
        *bin *= weight;
    }

    ifft.process(&mut buffer);

    // rustfft leaves the inverse unnormalized
    let scale = 1.0 / n as f64;
    for value in buffer.iter_mut() {
        *value *= scale;
    }

    buffer
}

/// Magnitude of the analytic signal at every sample
pub fn instantaneous_amplitude(samples: &[f64]) -> Vec<f64> {
    analytic_signal(samples).iter().map(|c| c.norm()).collect()
}

/// Envelope of a signal with its mean removed
/// 
/// The result has the same length and sample rate as the input. Removing the
/// mean keeps the envelope's DC level out of its spectrum.
pub fn extract_envelope(signal: &TimeSeriesSignal) -> TimeSeriesSignal {
    let mut envelope = instantaneous_amplitude(signal.samples());

    if !envelope.is_empty() {
        let mean = envelope.iter().sum::<f64>() / envelope.len() as f64;
        for value in envelope.iter_mut() {
            *value -= mean;
        }
    }

    signal.with_samples(envelope)
}
