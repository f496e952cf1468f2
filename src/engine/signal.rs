//! Mono signal type
//!
//! A `Signal` is a fully loaded mono sample buffer together with the rate it
//! was sampled at. All stages of one pipeline call share that rate.

use crate::error::{ClipError, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default processing sample rate (22.05kHz)
pub const DEFAULT_SAMPLE_RATE: u32 = 22050;

// ============================================================================
// Helper Functions
// ============================================================================

/// Peak absolute sample value of a slice (0.0 for empty input)
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|&s| s.abs()).fold(0.0_f32, f32::max)
}

/// Root mean square of a slice (0.0 for empty input)
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }

    let sum_squares: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_squares / samples.len() as f64).sqrt() as f32
}

/// Population variance of a slice (0.0 for empty input)
pub fn variance(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let n = samples.len() as f64;
    let mean: f64 = samples.iter().map(|&s| s as f64).sum::<f64>() / n;
    samples
        .iter()
        .map(|&s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / n
}

/// Pad with zeros or truncate so the buffer holds exactly `len` samples
pub fn fix_length(mut samples: Vec<f32>, len: usize) -> Vec<f32> {
    samples.resize(len, 0.0);
    samples
}

// ============================================================================
// Signal
// ============================================================================

/// Mono audio signal
///
/// # Example
/// ```
/// use clipstretch::engine::Signal;
///
/// let signal = Signal::new(vec![0.0; 22050], 22050);
/// assert_eq!(signal.len(), 22050);
/// assert!((signal.duration_secs() - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Sample data
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Signal {
    /// Wrap an owned sample buffer
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Create a signal of `num_samples` zeros
    pub fn silence(num_samples: usize, sample_rate: u32) -> Self {
        Self::new(vec![0.0; num_samples], sample_rate)
    }

    /// Create a sine tone, mostly useful for tests and benchmarks
    pub fn sine(frequency: f32, duration_secs: f64, amplitude: f32, sample_rate: u32) -> Self {
        let num_samples = (duration_secs * sample_rate as f64).round() as usize;
        let angular_freq = 2.0 * std::f64::consts::PI * frequency as f64 / sample_rate as f64;

        let samples = (0..num_samples)
            .map(|i| amplitude * (angular_freq * i as f64).sin() as f32)
            .collect();

        Self::new(samples, sample_rate)
    }

    /// Get the number of samples
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the signal has no samples
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Borrow the samples
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    /// Consume the signal, returning the sample buffer
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Peak absolute level (linear)
    pub fn peak(&self) -> f32 {
        peak(&self.samples)
    }

    /// RMS level (linear)
    pub fn rms(&self) -> f32 {
        rms(&self.samples)
    }

    /// Fail with `EmptySignal` when there is nothing to process
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ClipError::EmptySignal);
        }
        Ok(())
    }

    /// Fail when this signal was sampled at a different rate
    pub fn ensure_rate(&self, expected: u32) -> Result<()> {
        if self.sample_rate != expected {
            return Err(ClipError::SampleRateMismatch {
                expected,
                actual: self.sample_rate,
            });
        }
        Ok(())
    }

    /// Replace the samples, keeping the sample rate
    pub fn with_samples(&self, samples: Vec<f32>) -> Self {
        Self::new(samples, self.sample_rate)
    }
}
