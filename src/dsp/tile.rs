//! Tiling and silence padding

use crate::error::{ClipError, Result};

/// Concatenate `count` whole copies of `signal`
pub fn tile(signal: &[f32], count: usize) -> Result<Vec<f32>> {
    if count == 0 {
        return Err(ClipError::invalid_param("count", count, ">= 1"));
    }

    let mut out = Vec::with_capacity(signal.len() * count);
    for _ in 0..count {
        out.extend_from_slice(signal);
    }
    Ok(out)
}

/// Number of whole copies needed to cover `target_len` samples
///
/// `ceil(target_len / period)`, never less than one.
pub fn repeats_to_cover(target_len: usize, period: usize) -> usize {
    if period == 0 {
        return 1;
    }
    target_len.div_ceil(period).max(1)
}

/// Surround `signal` with runs of zeros
pub fn pad_zeros(signal: &[f32], before: usize, after: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(before + signal.len() + after);
    out.resize(before, 0.0);
    out.extend_from_slice(signal);
    out.resize(before + signal.len() + after, 0.0);
    out
}

/// Add `before_secs` of silence in front and `after_secs` behind
pub fn pad_with_silence(
    signal: &[f32],
    sample_rate: u32,
    before_secs: f64,
    after_secs: f64,
) -> Result<Vec<f32>> {
    for (param, secs) in [("before_secs", before_secs), ("after_secs", after_secs)] {
        if secs.is_nan() || secs < 0.0 {
            return Err(ClipError::invalid_param(param, secs, ">= 0"));
        }
    }

    let before = (before_secs * sample_rate as f64) as usize;
    let after = (after_secs * sample_rate as f64) as usize;
    Ok(pad_zeros(signal, before, after))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_tile() {
        assert_eq!(tile(&[1.0, 2.0], 3).unwrap(), vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
        assert_eq!(tile(&[1.0, 2.0], 1).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_tile_zero_count_rejected() {
        let err = tile(&[1.0], 0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test_case(10, 5 => 2 ; "exact")]
    #[test_case(11, 5 => 3 ; "remainder")]
    #[test_case(3, 5 => 1 ; "shorter")]
    #[test_case(0, 5 => 1 ; "empty target")]
    fn test_repeats_to_cover(target: usize, period: usize) -> usize {
        repeats_to_cover(target, period)
    }

    #[test]
    fn test_pad_zeros() {
        assert_eq!(pad_zeros(&[1.0, 2.0], 1, 2), vec![0.0, 1.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_pad_with_silence() {
        let out = pad_with_silence(&[1.0], 10, 0.5, 0.2).unwrap();
        assert_eq!(out, vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
        assert!(pad_with_silence(&[1.0], 10, -0.1, 0.0).is_err());
    }
}
