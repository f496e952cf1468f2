//! Integration Tests
//!
//! End-to-end tests for the clipstretch extension pipeline.

use std::path::Path;

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;
use test_case::test_case;

use clipstretch::augment::{extend, generate_variants, rng_for};
use clipstretch::config::{AugmentationConfig, Method};
use clipstretch::engine::{load_audio, save_audio};
use clipstretch::stretch::PhaseVocoder;
use clipstretch::{ClipError, Signal};

/// Helper to create a short spoken-length test tone
fn create_clip(duration_secs: f64) -> Signal {
    Signal::sine(220.0, duration_secs, 0.6, 22050)
}

fn write_clip(path: &Path, duration_secs: f64, sample_rate: u32) {
    save_audio(&Signal::sine(220.0, duration_secs, 0.6, sample_rate), path).unwrap();
}

// === Full Pipeline Tests ===

#[test_case(Method::Repeat)]
#[test_case(Method::Stretch)]
#[test_case(Method::StretchAndRepeat)]
#[test_case(Method::SilencePad)]
#[test_case(Method::Comprehensive)]
fn test_file_round_trip_hits_target(method: Method) {
    let dir = tempdir().unwrap();
    let input = dir.path().join("utterance.wav");
    let output = dir.path().join("extended.wav");
    write_clip(&input, 0.5, 22050);

    let config = AugmentationConfig::new(2.0, 22050, method, 0.005)
        .unwrap()
        .with_seed(Some(11));
    let source = load_audio(&input, config.sample_rate).unwrap();
    let mut rng = rng_for(&config);
    let extended = extend(&source, &config, &PhaseVocoder::default(), &mut rng).unwrap();
    let report = save_audio(&extended, &output).unwrap();

    assert_eq!(report.num_samples, 44100);
    assert_relative_eq!(report.duration_secs, 2.0);

    let reloaded = load_audio(&output, 22050).unwrap();
    assert_eq!(reloaded.len(), 44100);
    assert!(reloaded.samples.iter().all(|s| s.abs() <= 1.0));
}

#[test]
fn test_input_resampled_to_processing_rate() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hi_rate.wav");
    write_clip(&input, 0.5, 44100);

    let config = AugmentationConfig::new(1.0, 22050, Method::Repeat, 0.0).unwrap();
    let source = load_audio(&input, config.sample_rate).unwrap();
    assert_eq!(source.sample_rate, 22050);
    assert_eq!(source.len(), 11025);

    let out = extend(&source, &config, &PhaseVocoder::default(), &mut rng_for(&config)).unwrap();
    assert_eq!(out.len(), 22050);
}

#[test]
fn test_silence_pad_keeps_clip_centered() {
    let clip = create_clip(0.5);
    let config = AugmentationConfig::new(1.5, 22050, Method::SilencePad, 0.0).unwrap();
    let out = extend(&clip, &config, &PhaseVocoder::default(), &mut rng_for(&config)).unwrap();

    let pad = (33075 - 11025) / 2;
    assert_eq!(out.len(), 33075);
    assert!(out.samples[..pad].iter().all(|&s| s == 0.0));
    assert_eq!(&out.samples[pad..pad + 11025], clip.as_slice());
    assert!(out.samples[pad + 11025..].iter().all(|&s| s == 0.0));
}

#[test]
fn test_long_input_is_truncated() {
    let clip = create_clip(3.0);
    let config = AugmentationConfig::new(1.0, 22050, Method::Stretch, 0.005).unwrap();
    let out = extend(&clip, &config, &PhaseVocoder::default(), &mut rng_for(&config)).unwrap();

    assert_eq!(out.samples, clip.samples[..22050].to_vec());
}

#[test]
fn test_comprehensive_output_is_normalized() {
    let config = AugmentationConfig::new(3.0, 22050, Method::Comprehensive, 0.005).unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    let out = extend(&create_clip(0.4), &config, &PhaseVocoder::default(), &mut rng).unwrap();

    assert_eq!(out.len(), 66150);
    assert_relative_eq!(out.peak(), 0.95, epsilon = 1e-5);
}

// === Variant Tests ===

#[test]
fn test_variants_are_reproducible() {
    let clip = create_clip(0.4);
    let config = AugmentationConfig::new(1.5, 22050, Method::Comprehensive, 0.005).unwrap();
    let vocoder = PhaseVocoder::default();

    let a = generate_variants(&clip, &config, &vocoder, 1234, 3).unwrap();
    let b = generate_variants(&clip, &config, &vocoder, 1234, 3).unwrap();
    let c = generate_variants(&clip, &config, &vocoder, 4321, 3).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert!(a.iter().all(|v| v.len() == 33075));
}

// === Error Handling Tests ===

#[test]
fn test_empty_clip_rejected() {
    let config = AugmentationConfig::default();
    let err = extend(
        &Signal::new(Vec::new(), 22050),
        &config,
        &PhaseVocoder::default(),
        &mut rng_for(&config),
    )
    .unwrap_err();
    assert!(matches!(err, ClipError::EmptySignal));
}

#[test]
fn test_rate_mismatch_rejected() {
    let config = AugmentationConfig::default();
    let clip = Signal::sine(220.0, 0.5, 0.5, 16000);
    let err = extend(&clip, &config, &PhaseVocoder::default(), &mut rng_for(&config)).unwrap_err();
    assert!(matches!(
        err,
        ClipError::SampleRateMismatch {
            expected: 22050,
            actual: 16000
        }
    ));
}

#[test]
fn test_unknown_method_in_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"method": "granular"}"#).unwrap();

    let err = AugmentationConfig::from_json_file(&path).unwrap_err();
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}
