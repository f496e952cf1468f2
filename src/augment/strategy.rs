//! Length-matching strategies
//!
//! Each strategy turns a clip of any length into exactly
//! `config.target_length()` samples. A clip that is already long enough is
//! cut from the start, whatever the strategy.

use log::{debug, warn};
use rand::Rng;

use crate::config::AugmentationConfig;
use crate::dsp::{crossfade_seams, gaussian_noise, repeats_to_cover, tile};
use crate::engine::signal::fix_length;
use crate::engine::Signal;
use crate::error::Result;
use crate::stretch::TimeStretcher;

/// Fixed slow-down used by `stretch_and_repeat` (70% speed)
pub const STRETCH_AND_REPEAT_RATE: f64 = 0.7;

/// Check the clip is usable and handle the already-long case
///
/// Returns `Some(truncated)` when no extension is needed.
fn prepare(signal: &Signal, config: &AugmentationConfig) -> Result<Option<Signal>> {
    signal.ensure_not_empty()?;
    signal.ensure_rate(config.sample_rate)?;

    let target = config.target_length();
    if signal.len() >= target {
        if signal.len() > target {
            warn!(
                "input is {} samples, longer than target {}; truncating",
                signal.len(),
                target
            );
        }
        return Ok(Some(signal.with_samples(signal.as_slice()[..target].to_vec())));
    }
    Ok(None)
}

/// Tile the clip whole and fade in every seam
pub fn repeat(signal: &Signal, config: &AugmentationConfig) -> Result<Signal> {
    if let Some(done) = prepare(signal, config)? {
        return Ok(done);
    }

    let target = config.target_length();
    let count = repeats_to_cover(target, signal.len());
    let mut repeated = tile(signal.as_slice(), count)?;
    crossfade_seams(&mut repeated, signal.len(), config.fade_length());

    debug!("repeat: {} copies of {} samples", count, signal.len());
    Ok(signal.with_samples(fix_length(repeated, target)))
}

/// Time-stretch once so the clip spans the target exactly
pub fn stretch(
    signal: &Signal,
    config: &AugmentationConfig,
    stretcher: &dyn TimeStretcher,
) -> Result<Signal> {
    if let Some(done) = prepare(signal, config)? {
        return Ok(done);
    }

    let target = config.target_length();
    let rate = signal.len() as f64 / target as f64;
    let stretched = stretcher.stretch(signal.as_slice(), rate)?;

    debug!("stretch: rate {:.4} via {}", rate, stretcher.name());
    Ok(signal.with_samples(fix_length(stretched, target)))
}

/// Slow the clip to 70% speed, then tile without crossfades
pub fn stretch_and_repeat(
    signal: &Signal,
    config: &AugmentationConfig,
    stretcher: &dyn TimeStretcher,
) -> Result<Signal> {
    if let Some(done) = prepare(signal, config)? {
        return Ok(done);
    }

    let target = config.target_length();
    let stretched = stretcher.stretch(signal.as_slice(), STRETCH_AND_REPEAT_RATE)?;
    let extended = if stretched.len() < target {
        tile(&stretched, repeats_to_cover(target, stretched.len()))?
    } else {
        stretched
    };

    debug!("stretch_and_repeat: {} stretched samples", extended.len());
    Ok(signal.with_samples(fix_length(extended, target)))
}

/// Center the clip between two runs of silence
///
/// With `config.silence_dither > 0` the padding carries low-level Gaussian
/// noise instead of digital silence. The clip itself is copied verbatim.
pub fn silence_pad<R: Rng + ?Sized>(
    signal: &Signal,
    config: &AugmentationConfig,
    rng: &mut R,
) -> Result<Signal> {
    if let Some(done) = prepare(signal, config)? {
        return Ok(done);
    }

    let target = config.target_length();
    let needed = target - signal.len();
    let before = needed / 2;
    let after = needed - before;

    let mut padded = gaussian_noise(before, config.silence_dither, rng)?;
    padded.extend_from_slice(signal.as_slice());
    padded.extend(gaussian_noise(after, config.silence_dither, rng)?);

    debug!("silence_pad: {} before, {} after", before, after);
    Ok(signal.with_samples(padded))
}
