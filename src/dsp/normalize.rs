//! Peak normalization

use crate::engine::signal::peak;

/// Default peak target for normalized output
pub const DEFAULT_TARGET_PEAK: f32 = 0.95;

/// Scale `signal` so its peak absolute value equals `target_peak`
///
/// Silent input is returned unchanged.
pub fn normalize_peak(mut signal: Vec<f32>, target_peak: f32) -> Vec<f32> {
    let max_val = peak(&signal);
    if max_val > 0.0 {
        let gain = target_peak / max_val;
        for sample in &mut signal {
            *sample *= gain;
        }
    }
    signal
}

/// Clamp every sample to `[-1.0, 1.0]`
pub fn clip(signal: &mut [f32]) {
    for sample in signal {
        *sample = sample.clamp(-1.0, 1.0);
    }
}
