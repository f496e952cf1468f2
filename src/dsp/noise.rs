//! Noise injection
//!
//! All random draws go through a caller-supplied `Rng` so results are
//! reproducible from a seed.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::dsp::tile::{repeats_to_cover, tile};
use crate::engine::Signal;
use crate::error::{ClipError, Result};

/// Default white-noise standard deviation
pub const DEFAULT_NOISE_LEVEL: f32 = 0.005;

/// Zero-mean Gaussian with standard deviation `level`
fn gaussian(level: f32) -> Result<Normal<f32>> {
    Normal::new(0.0, level).map_err(|_| ClipError::invalid_param("noise_level", level, ">= 0"))
}

/// `len` independent draws from N(0, level)
pub fn gaussian_noise<R: Rng + ?Sized>(len: usize, level: f32, rng: &mut R) -> Result<Vec<f32>> {
    if level.is_nan() || level < 0.0 {
        return Err(ClipError::invalid_param("noise_level", level, ">= 0"));
    }
    if level == 0.0 {
        return Ok(vec![0.0; len]);
    }

    let normal = gaussian(level)?;
    Ok((0..len).map(|_| normal.sample(rng)).collect())
}

/// Add N(0, level) to every sample
pub fn add_white_noise<R: Rng + ?Sized>(
    signal: &[f32],
    level: f32,
    rng: &mut R,
) -> Result<Vec<f32>> {
    let noise = gaussian_noise(signal.len(), level, rng)?;
    Ok(signal.iter().zip(noise).map(|(s, n)| s + n).collect())
}

/// Mix a recorded noise bed under `signal`
///
/// A noise bed shorter than the signal is tiled whole, then everything is cut
/// to the signal's length and scaled by `level`.
pub fn add_background_noise(signal: &[f32], noise: &[f32], level: f32) -> Result<Vec<f32>> {
    if level.is_nan() || level < 0.0 {
        return Err(ClipError::config(format!(
            "background noise level must be >= 0, got {}",
            level
        )));
    }
    if noise.is_empty() {
        return Err(ClipError::EmptySignal);
    }

    let bed = if noise.len() < signal.len() {
        tile(noise, repeats_to_cover(signal.len(), noise.len()))?
    } else {
        noise.to_vec()
    };

    Ok(signal
        .iter()
        .zip(&bed)
        .map(|(s, n)| s + n * level)
        .collect())
}

/// Rate-checked `add_background_noise` over whole signals
pub fn mix_background(signal: &Signal, noise: &Signal, level: f32) -> Result<Signal> {
    noise.ensure_rate(signal.sample_rate)?;
    let mixed = add_background_noise(signal.as_slice(), noise.as_slice(), level)?;
    Ok(signal.with_samples(mixed))
}
