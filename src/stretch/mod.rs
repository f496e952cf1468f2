//! Time stretching
//!
//! Stretching changes duration without changing pitch. Everything in the
//! crate talks to the engine through the narrow `TimeStretcher` trait, so the
//! phase vocoder can be swapped for another implementation.

mod phase_vocoder;

pub use phase_vocoder::PhaseVocoder;

use crate::error::{ClipError, Result};

/// Pitch-preserving duration change
pub trait TimeStretcher: Send + Sync {
    /// Stretch `signal` by `rate`
    ///
    /// Returns `round(len / rate)` samples: `rate > 1` shortens, `rate < 1`
    /// lengthens. Fails on a non-positive rate or an empty signal.
    fn stretch(&self, signal: &[f32], rate: f64) -> Result<Vec<f32>>;

    /// Engine name for logging
    fn name(&self) -> &'static str;
}

/// Reject rates that are not finite and strictly positive
pub fn validate_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ClipError::invalid_param("rate", rate, "> 0"));
    }
    Ok(())
}

/// Output length of a stretch: `round(len / rate)`, at least one sample
pub fn stretched_len(len: usize, rate: f64) -> usize {
    ((len as f64 / rate).round() as usize).max(1)
}
