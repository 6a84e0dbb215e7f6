//! Windowing applied to time-domain chunks before the FFT

use crate::filters::windows::{generate_window, WindowKind};

/// Apply window to signal
/// 
/// # Arguments
/// * `signal` - Input signal
/// * `kind` - Window to apply
/// 
/// # Returns
/// Windowed copy of the signal (an unmodified copy for `WindowKind::None`)
pub fn apply_window(signal: &[f64], kind: WindowKind) -> Vec<f64> {
    let mut windowed = signal.to_vec();
    apply_window_inplace(&mut windowed, kind);
    windowed
}

/// Apply window in-place (no-op for `WindowKind::None`)
pub fn apply_window_inplace(signal: &mut [f64], kind: WindowKind) {
    if kind == WindowKind::None {
        return;
    }

    let window = generate_window(kind, signal.len());

    for (s, w) in signal.iter_mut().zip(window.iter()) {
        *s *= w;
    }
}
