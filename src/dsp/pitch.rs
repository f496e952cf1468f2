//! Pitch shifting by stretch-then-resample

use crate::dsp::resample::resample_linear;
use crate::engine::signal::fix_length;
use crate::error::{ClipError, Result};
use crate::stretch::TimeStretcher;

const SEMITONES_PER_OCTAVE: f32 = 12.0;

/// Shift pitch by `n_steps` semitones, keeping the duration
///
/// The signal is time-stretched by `rate = 2^(-n_steps / 12)` and then
/// resampled by the same ratio, which restores the original length.
pub fn pitch_shift(
    signal: &[f32],
    n_steps: f32,
    stretcher: &dyn TimeStretcher,
) -> Result<Vec<f32>> {
    if !n_steps.is_finite() {
        return Err(ClipError::invalid_param("pitch_steps", n_steps, "a finite number"));
    }
    if n_steps == 0.0 {
        return Ok(signal.to_vec());
    }

    let rate = 2.0_f64.powf(-(n_steps / SEMITONES_PER_OCTAVE) as f64);
    let stretched = stretcher.stretch(signal, rate)?;
    let shifted = resample_linear(&stretched, rate);

    Ok(fix_length(shifted, signal.len()))
}
