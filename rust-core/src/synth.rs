//! Deterministic machine-condition waveforms
//! 
//! Noise-free test chunks shaped like rotating-machinery vibration: a shaft
//! (1x) tone plus the signature each fault adds on top of it.

use crate::error::{validate_sample_rate, Result, SpectralError};
use crate::signal::{TimeSeriesSignal, DEFAULT_SAMPLE_RATE};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

/// Machine state to synthesize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MachineCondition {
    Healthy,
    /// Strong 1x component
    Imbalance,
    /// Strong 2x component
    Misalignment,
    /// Amplitude-modulated high-frequency tone
    BearingFault,
}

impl MachineCondition {
    pub const ALL: [MachineCondition; 4] = [
        MachineCondition::Healthy,
        MachineCondition::Imbalance,
        MachineCondition::Misalignment,
        MachineCondition::BearingFault,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MachineCondition::Healthy => "healthy",
            MachineCondition::Imbalance => "imbalance",
            MachineCondition::Misalignment => "misalignment",
            MachineCondition::BearingFault => "bearing_fault",
        }
    }
}

impl fmt::Display for MachineCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MachineCondition {
    type Err = SpectralError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        MachineCondition::ALL
            .into_iter()
            .find(|c| c.name() == name)
            .ok_or_else(|| SpectralError::InvalidParameter(format!("unknown machine condition '{}'", s)))
    }
}

/// Waveform synthesis parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Samples per chunk
    pub num_samples: usize,

    /// Shaft rotation (1x) frequency in Hz, 30 Hz = 1800 RPM
    pub shaft_frequency: f64,

    /// Bearing resonance carrier in Hz
    pub bearing_frequency: f64,

    /// Defect repeat rate modulating the bearing carrier, in Hz
    pub modulation_frequency: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            num_samples: 2048,
            shaft_frequency: 30.0,
            bearing_frequency: 120.0,
            modulation_frequency: 5.0,
        }
    }
}

/// Generate one chunk for the given machine condition
pub fn synthesize_waveform(
    condition: MachineCondition,
    config: &SynthesisConfig,
) -> Result<TimeSeriesSignal> {
    validate_sample_rate(config.sample_rate)?;

    let tone = |freq: f64, t: f64| (2.0 * PI * freq * t).sin();
    let f1x = config.shaft_frequency;

    let samples = (0..config.num_samples)
        .map(|i| {
            let t = i as f64 / config.sample_rate;
            let base = 0.5 * tone(f1x, t);

            let fault = match condition {
                MachineCondition::Healthy => 0.0,
                MachineCondition::Imbalance => 1.5 * tone(f1x, t),
                MachineCondition::Misalignment => 0.8 * tone(2.0 * f1x, t),
                MachineCondition::BearingFault => {
                    0.3 * tone(config.bearing_frequency, t)
                        * (1.0 + 0.5 * tone(config.modulation_frequency, t))
                }
            };

            base + fault
        })
        .collect();

    TimeSeriesSignal::new(samples, config.sample_rate)
}
