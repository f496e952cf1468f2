//! Single-tap echo "reverb"
//!
//! One delayed, decayed copy of the input is added on top of the dry signal.
//! The decayed tail that would run past the end of the input is dropped so
//! the output keeps the input's length.

use crate::error::{ClipError, Result};

/// Delay at full room size, in seconds
const MAX_DELAY_SECS: f64 = 0.05;

/// Echo gain at full room size
const MAX_DECAY: f32 = 0.3;

/// Room size used by the comprehensive pipeline
pub const DEFAULT_ROOM_SIZE: f32 = 0.3;

/// Echo delay in samples for a room size
pub fn delay_samples(sample_rate: u32, room_size: f32) -> usize {
    (MAX_DELAY_SECS * sample_rate as f64 * room_size as f64).round() as usize
}

/// Apply a truncating single echo
///
/// `delay = round(0.05 * sample_rate * room_size)`, `decay = 0.3 * room_size`.
pub fn reverb(signal: &[f32], sample_rate: u32, room_size: f32) -> Result<Vec<f32>> {
    if !(0.0..=1.0).contains(&room_size) {
        return Err(ClipError::invalid_param("room_size", room_size, "0.0 to 1.0"));
    }

    let delay = delay_samples(sample_rate, room_size);
    let decay = MAX_DECAY * room_size;

    let mut out = signal.to_vec();
    if delay < signal.len() {
        for (wet, &dry) in out[delay..].iter_mut().zip(signal) {
            *wet += dry * decay;
        }
    }

    Ok(out)
}
