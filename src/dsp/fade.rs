//! Linear fade ramps and seam smoothing

use crate::dsp::tile::tile;
use crate::error::Result;

/// Default fade length used to smooth repetition seams (50ms)
pub const DEFAULT_FADE_SECS: f64 = 0.05;

/// Number of samples covered by a fade of `secs` seconds
///
/// Truncates toward zero, so 50ms at 22050 Hz is 1102 samples.
pub fn fade_samples(secs: f64, sample_rate: u32) -> usize {
    (secs * sample_rate as f64).max(0.0) as usize
}

/// Evenly spaced ramp from `start` to `end` inclusive, `n` points
fn linspace(start: f32, end: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f32;
            (0..n).map(|i| start + step * i as f32).collect()
        }
    }
}

/// Pair of linear ramps used to smooth boundaries
#[derive(Debug, Clone, PartialEq)]
pub struct FadeWindow {
    /// Ramp from 0.0 to 1.0
    pub fade_in: Vec<f32>,
    /// Ramp from 1.0 to 0.0
    pub fade_out: Vec<f32>,
}

impl FadeWindow {
    /// Build ramps of `length` samples
    pub fn new(length: usize) -> Self {
        Self {
            fade_in: linspace(0.0, 1.0, length),
            fade_out: linspace(1.0, 0.0, length),
        }
    }

    /// Ramp length in samples
    pub fn len(&self) -> usize {
        self.fade_in.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fade_in.is_empty()
    }

    /// Multiply the head of `buffer` by the fade-in ramp
    pub fn apply_in(&self, buffer: &mut [f32]) {
        for (sample, gain) in buffer.iter_mut().zip(&self.fade_in) {
            *sample *= gain;
        }
    }

    /// Multiply the tail of `buffer` by the fade-out ramp
    pub fn apply_out(&self, buffer: &mut [f32]) {
        let start = buffer.len().saturating_sub(self.len());
        for (sample, gain) in buffer[start..].iter_mut().zip(&self.fade_out) {
            *sample *= gain;
        }
    }
}

/// Fade in every repetition seam of a tiled buffer
///
/// Seams sit at `k * seam_period` for k = 1, 2, ... while the whole ramp fits
/// (`k * seam_period + fade_length <= buffer.len()`). The segment before the
/// first seam is never touched.
pub fn crossfade_seams(buffer: &mut [f32], seam_period: usize, fade_length: usize) {
    if seam_period == 0 || fade_length == 0 {
        return;
    }

    let window = FadeWindow::new(fade_length);
    let mut seam = seam_period;
    while seam + fade_length <= buffer.len() {
        window.apply_in(&mut buffer[seam..seam + fade_length]);
        seam += seam_period;
    }
}

/// Tile `count` copies and fade the head in and the tail out
///
/// The edge fades are skipped when the tiled buffer is not longer than both
/// ramps together.
pub fn repeat_and_fade(signal: &[f32], count: usize, fade_length: usize) -> Result<Vec<f32>> {
    let mut repeated = tile(signal, count)?;

    if repeated.len() > fade_length * 2 {
        let window = FadeWindow::new(fade_length);
        window.apply_in(&mut repeated);
        window.apply_out(&mut repeated);
    }

    Ok(repeated)
}
