//! Linear-interpolation resampling
//!
//! Shared by the WAV loader (rate conversion) and pitch shifting.

/// Resample by `ratio` (target_rate / source_rate) using linear interpolation
///
/// Output length is `ceil(len * ratio)`. Returns an empty buffer for empty
/// input or a non-positive ratio.
pub fn resample_linear(samples: &[f32], ratio: f64) -> Vec<f32> {
    if samples.is_empty() || ratio.is_nan() || ratio <= 0.0 {
        return Vec::new();
    }

    let source_len = samples.len();
    let target_len = ((source_len as f64) * ratio).ceil() as usize;
    let mut output = Vec::with_capacity(target_len);

    for i in 0..target_len {
        // Map output index to source position
        let src_pos = i as f64 / ratio;
        let src_idx = src_pos.floor() as usize;
        let frac = (src_pos - src_idx as f64) as f32;

        let sample = if src_idx + 1 < source_len {
            samples[src_idx] * (1.0 - frac) + samples[src_idx + 1] * frac
        } else if src_idx < source_len {
            samples[src_idx]
        } else {
            0.0
        };

        output.push(sample);
    }

    output
}

/// Convert between two sample rates
pub fn resample_rate(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if source_rate == target_rate {
        return samples.to_vec();
    }
    resample_linear(samples, target_rate as f64 / source_rate as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_linear_upsample() {
        let samples = vec![0.0, 1.0, 0.0];
        let resampled = resample_linear(&samples, 2.0);

        assert_eq!(resampled.len(), 6);
        // src pos 0.5 sits halfway between 0.0 and 1.0
        assert!((resampled[1] - 0.5).abs() < 0.01);
        assert!((resampled[2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_resample_linear_downsample() {
        let samples = vec![0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5];
        let resampled = resample_linear(&samples, 0.5);
        assert_eq!(resampled, vec![0.0, 1.0, 0.0, -1.0]);
    }

    #[test]
    fn test_resample_rate_identity() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(resample_rate(&samples, 22050, 22050), samples);
    }

    #[test]
    fn test_resample_rate_length() {
        let samples = vec![0.0; 44100];
        assert_eq!(resample_rate(&samples, 44100, 22050).len(), 22050);
    }

    #[test]
    fn test_resample_degenerate() {
        assert!(resample_linear(&[], 2.0).is_empty());
        assert!(resample_linear(&[1.0], 0.0).is_empty());
    }
}
