//! STFT phase vocoder
//!
//! Analysis frames are read at fractional positions `0, rate, 2*rate, ...`,
//! magnitudes are interpolated between neighbouring frames and phases are
//! accumulated from the measured per-bin frequency. Resynthesis uses the same
//! hop, so the frame count (and with it the duration) scales by `1 / rate`.

use std::f32::consts::PI;
use std::sync::Arc;

use log::debug;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::{stretched_len, validate_rate, TimeStretcher};
use crate::engine::signal::fix_length;
use crate::error::{ClipError, Result};

const TWO_PI: f32 = 2.0 * PI;

/// Default analysis/synthesis frame size
pub const DEFAULT_FFT_SIZE: usize = 2048;

/// Default hop between frames
pub const DEFAULT_HOP: usize = 512;

/// Window-sum floor below which overlap-add output is left unnormalized
const WINDOW_SUM_EPSILON: f32 = 1e-6;

/// Wrap a phase into [-PI, PI)
#[inline]
fn wrap_phase(phase: f32) -> f32 {
    phase - TWO_PI * ((phase + PI) / TWO_PI).floor()
}

/// Periodic Hann window
fn hann(size: usize) -> Vec<f32> {
    (0..size)
        .map(|n| 0.5 - 0.5 * (TWO_PI * n as f32 / size as f32).cos())
        .collect()
}

/// Phase-vocoder time stretcher
#[derive(Clone)]
pub struct PhaseVocoder {
    fft_size: usize,
    hop: usize,
    window: Vec<f32>,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
}

impl std::fmt::Debug for PhaseVocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseVocoder")
            .field("fft_size", &self.fft_size)
            .field("hop", &self.hop)
            .finish()
    }
}

impl Default for PhaseVocoder {
    fn default() -> Self {
        Self::build(DEFAULT_FFT_SIZE, DEFAULT_HOP)
    }
}

impl PhaseVocoder {
    /// Create a vocoder with a custom frame size and hop
    ///
    /// `fft_size` must be even and at least 4; `hop` must lie in
    /// `1..=fft_size / 2` so that frames overlap.
    pub fn new(fft_size: usize, hop: usize) -> Result<Self> {
        if fft_size < 4 || fft_size % 2 != 0 {
            return Err(ClipError::invalid_param(
                "fft_size",
                fft_size,
                "an even number >= 4",
            ));
        }
        if hop == 0 || hop > fft_size / 2 {
            return Err(ClipError::invalid_param(
                "hop",
                hop,
                format!("1 to {}", fft_size / 2),
            ));
        }
        Ok(Self::build(fft_size, hop))
    }

    fn build(fft_size: usize, hop: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            fft_size,
            hop,
            window: hann(fft_size),
            forward: planner.plan_fft_forward(fft_size),
            inverse: planner.plan_fft_inverse(fft_size),
        }
    }

    fn num_bins(&self) -> usize {
        self.fft_size / 2 + 1
    }

    /// Centered short-time Fourier transform (positive-frequency bins only)
    fn stft(&self, signal: &[f32]) -> Vec<Vec<Complex<f32>>> {
        let pad = self.fft_size / 2;
        let mut padded = vec![0.0_f32; pad];
        padded.extend_from_slice(signal);
        padded.resize(padded.len() + pad, 0.0);

        let num_frames = 1 + (padded.len() - self.fft_size) / self.hop;
        let mut buffer = vec![Complex::new(0.0, 0.0); self.fft_size];

        (0..num_frames)
            .map(|frame| {
                let start = frame * self.hop;
                let input = &padded[start..start + self.fft_size];
                for ((bin, &sample), &win) in buffer.iter_mut().zip(input).zip(&self.window) {
                    *bin = Complex::new(sample * win, 0.0);
                }
                self.forward.process(&mut buffer);
                buffer[..self.num_bins()].to_vec()
            })
            .collect()
    }

    /// Resample the frame sequence at `rate` and overlap-add the result
    ///
    /// Frames are synthesized and added one at a time. Synthesis stops once
    /// the first `target_len` samples past the centering pad are covered.
    fn resynthesize(&self, frames: &[Vec<Complex<f32>>], rate: f64, target_len: usize) -> Vec<f32> {
        let num_bins = self.num_bins();
        let pad = self.fft_size / 2;
        let zeros = vec![Complex::new(0.0, 0.0); num_bins];
        let max_frames = (target_len + pad).div_ceil(self.hop) + 1;

        // Expected phase advance per hop for each bin
        let omega: Vec<f32> = (0..num_bins)
            .map(|bin| TWO_PI * bin as f32 * self.hop as f32 / self.fft_size as f32)
            .collect();

        let mut phase_acc: Vec<f32> = frames[0].iter().map(|c| c.arg()).collect();
        let mut output: Vec<f32> = Vec::new();
        let mut window_sum: Vec<f32> = Vec::new();
        let mut buffer = vec![Complex::new(0.0, 0.0); self.fft_size];
        let norm = 1.0 / self.fft_size as f32;

        let mut step = 0.0_f64;
        let mut frame_idx = 0;
        while step < frames.len() as f64 && frame_idx < max_frames {
            let idx = step.floor() as usize;
            let alpha = (step - idx as f64) as f32;
            let current = &frames[idx];
            let next = frames.get(idx + 1).unwrap_or(&zeros);

            for bin in 0..num_bins {
                let mag = (1.0 - alpha) * current[bin].norm() + alpha * next[bin].norm();
                buffer[bin] = Complex::from_polar(mag, phase_acc[bin]);
            }
            // Mirror negative frequencies
            for bin in 1..num_bins - 1 {
                buffer[self.fft_size - bin] = buffer[bin].conj();
            }
            self.inverse.process(&mut buffer);

            let start = frame_idx * self.hop;
            let end = start + self.fft_size;
            if output.len() < end {
                output.resize(end, 0.0);
                window_sum.resize(end, 0.0);
            }
            for (i, &win) in self.window.iter().enumerate() {
                output[start + i] += buffer[i].re * norm * win;
                window_sum[start + i] += win * win;
            }

            for bin in 0..num_bins {
                let delta = next[bin].arg() - current[bin].arg() - omega[bin];
                phase_acc[bin] = wrap_phase(phase_acc[bin] + omega[bin] + wrap_phase(delta));
            }

            step += rate;
            frame_idx += 1;
        }

        for (sample, &sum) in output.iter_mut().zip(&window_sum) {
            if sum > WINDOW_SUM_EPSILON {
                *sample /= sum;
            }
        }

        debug!(
            "phase vocoder: {} -> {} frames, rate {:.4}",
            frames.len(),
            frame_idx,
            rate
        );

        output.drain(..pad.min(output.len()));
        output
    }
}

impl TimeStretcher for PhaseVocoder {
    fn stretch(&self, signal: &[f32], rate: f64) -> Result<Vec<f32>> {
        validate_rate(rate)?;
        if signal.is_empty() {
            return Err(ClipError::EmptySignal);
        }

        let target_len = stretched_len(signal.len(), rate);
        let frames = self.stft(signal);

        Ok(fix_length(self.resynthesize(&frames, rate, target_len), target_len))
    }

    fn name(&self) -> &'static str {
        "phase-vocoder"
    }
}
