//! Comprehensive augmentation pipeline and method dispatch
//!
//! The comprehensive chain is fixed:
//! stretch -> tile -> seam fades -> white noise -> echo -> length fix -> normalize.
//! Only its parameters vary, and every random draw comes from the `Rng`
//! handed in by the caller.

use std::borrow::Cow;
use std::ops::Range;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::augment::strategy;
use crate::config::{AugmentationConfig, Method};
use crate::dsp::{
    add_white_noise, crossfade_seams, normalize_peak, pitch_shift, repeats_to_cover, reverb, tile,
    DEFAULT_ROOM_SIZE, DEFAULT_TARGET_PEAK,
};
use crate::engine::signal::fix_length;
use crate::engine::Signal;
use crate::error::{ClipError, Result};
use crate::stretch::TimeStretcher;

/// Stretch rate of the single-shot comprehensive run
pub const FIXED_STRETCH_RATE: f64 = 0.8;

/// Range of randomized stretch rates
pub const STRETCH_RATE_RANGE: Range<f64> = 0.75..0.85;

/// Tunable parameters of one comprehensive run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComprehensiveParams {
    /// Time-stretch rate (< 1 slows the clip down)
    pub stretch_rate: f64,
    /// White-noise standard deviation
    pub noise_level: f32,
    /// Echo room size in [0, 1]
    pub room_size: f32,
}

impl ComprehensiveParams {
    /// Deterministic parameters: rate 0.8, room 0.3
    pub fn fixed(noise_level: f32) -> Self {
        Self {
            stretch_rate: FIXED_STRETCH_RATE,
            noise_level,
            room_size: DEFAULT_ROOM_SIZE,
        }
    }

    /// Draw the stretch rate from `STRETCH_RATE_RANGE`
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, noise_level: f32) -> Self {
        Self {
            stretch_rate: rng.gen_range(STRETCH_RATE_RANGE),
            ..Self::fixed(noise_level)
        }
    }

    fn validate(&self) -> Result<()> {
        crate::stretch::validate_rate(self.stretch_rate)?;
        if !self.noise_level.is_finite() || self.noise_level < 0.0 {
            return Err(ClipError::invalid_param("noise_level", self.noise_level, ">= 0"));
        }
        Ok(())
    }
}

/// Run the full comprehensive chain on one clip
pub fn comprehensive<R: Rng + ?Sized>(
    signal: &Signal,
    config: &AugmentationConfig,
    params: &ComprehensiveParams,
    stretcher: &dyn TimeStretcher,
    rng: &mut R,
) -> Result<Signal> {
    params.validate()?;
    signal.ensure_not_empty()?;
    signal.ensure_rate(config.sample_rate)?;

    let target = config.target_length();

    let stretched = stretcher.stretch(signal.as_slice(), params.stretch_rate)?;
    debug!(
        "comprehensive: stretched {} -> {} samples (rate {:.3})",
        signal.len(),
        stretched.len(),
        params.stretch_rate
    );

    let count = repeats_to_cover(target, stretched.len());
    let mut repeated = fix_length(tile(&stretched, count)?, target);
    crossfade_seams(&mut repeated, stretched.len(), config.fade_length());

    let noisy = add_white_noise(&repeated, params.noise_level, rng)?;
    let reverbed = reverb(&noisy, config.sample_rate, params.room_size)?;
    debug!(
        "comprehensive: {} copies, noise {:.4}, room {:.2}",
        count, params.noise_level, params.room_size
    );

    let exact = fix_length(reverbed, target);
    Ok(signal.with_samples(normalize_peak(exact, DEFAULT_TARGET_PEAK)))
}

/// Build the random source for a config
///
/// A configured seed gives a reproducible generator; otherwise it is seeded
/// from OS entropy.
pub fn rng_for(config: &AugmentationConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Apply the configured pitch shift ahead of length matching
///
/// Borrows the input unchanged when `pitch_steps` is zero.
pub fn pitch_prestep<'a>(
    signal: &'a Signal,
    config: &AugmentationConfig,
    stretcher: &dyn TimeStretcher,
) -> Result<Cow<'a, Signal>> {
    signal.ensure_not_empty()?;
    signal.ensure_rate(config.sample_rate)?;

    if config.pitch_steps == 0.0 {
        return Ok(Cow::Borrowed(signal));
    }

    let shifted = pitch_shift(signal.as_slice(), config.pitch_steps, stretcher)?;
    debug!("pitch shifted by {} semitones", config.pitch_steps);
    Ok(Cow::Owned(signal.with_samples(shifted)))
}

/// Extend `signal` to the configured duration with the configured method
///
/// Comprehensive runs use fixed parameters unless the config carries a seed,
/// in which case the stretch rate is drawn from `rng`.
pub fn extend<R: Rng + ?Sized>(
    signal: &Signal,
    config: &AugmentationConfig,
    stretcher: &dyn TimeStretcher,
    rng: &mut R,
) -> Result<Signal> {
    config.validate()?;
    let source = pitch_prestep(signal, config, stretcher)?;
    let source: &Signal = &source;

    let out = match config.method {
        Method::Repeat => strategy::repeat(source, config)?,
        Method::Stretch => strategy::stretch(source, config, stretcher)?,
        Method::StretchAndRepeat => strategy::stretch_and_repeat(source, config, stretcher)?,
        Method::SilencePad => strategy::silence_pad(source, config, rng)?,
        Method::Comprehensive => {
            let params = match config.seed {
                Some(_) => ComprehensiveParams::sample(rng, config.noise_level),
                None => ComprehensiveParams::fixed(config.noise_level),
            };
            comprehensive(source, config, &params, stretcher, rng)?
        }
    };

    debug_assert_eq!(out.len(), config.target_length());
    Ok(out)
}
