//! CLI Command Implementations
//!
//! Every command loads at the configured rate, runs the core, peak-normalizes
//! and saves. Output files are only created after processing succeeds.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::augment::{extend as extend_signal, generate_variants, rng_for};
use crate::config::{AugmentationConfig, Method};
use crate::dsp::{normalize_peak, DEFAULT_TARGET_PEAK};
use crate::engine::{find_wav_files, load_audio, save_audio, SaveReport, Signal};
use crate::error::{ClipError, Result};
use crate::stretch::PhaseVocoder;

/// Extend one file with the configured method.
pub fn extend(
    input: &Path,
    output: Option<&Path>,
    config: &AugmentationConfig,
) -> Result<SaveReport> {
    info!(
        "Extending {} to {}s with {}",
        input.display(),
        config.target_duration_secs,
        config.method
    );

    let source = load_audio(input, config.sample_rate)?;
    let vocoder = PhaseVocoder::default();
    let mut rng = rng_for(config);
    let extended = extend_signal(&source, config, &vocoder, &mut rng)?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => sibling_path(input, "_extended"),
    };
    let report = save_normalized(extended, &output)?;

    println!(
        "Extended: {} ({:.2}s -> {:.2}s)",
        report.path.display(),
        source.duration_secs(),
        report.duration_secs
    );
    Ok(report)
}

/// Write `count` seeded comprehensive variants of one file into `out_dir`.
pub fn variants(
    input: &Path,
    out_dir: &Path,
    count: usize,
    config: &AugmentationConfig,
) -> Result<Vec<SaveReport>> {
    let source = load_audio(input, config.sample_rate)?;
    let base_seed = base_seed(config);
    fs::create_dir_all(out_dir)?;

    let stem = file_stem(input);
    let reports = write_variants(&source, config, base_seed, count, out_dir, &stem)?;

    println!("Variants: {} written to {} (seed {})", reports.len(), out_dir.display(), base_seed);
    Ok(reports)
}

/// Render every method plus `variant_count` variants for a file or a
/// directory of files.
///
/// A directory is walked recursively. A clip that fails is reported and
/// skipped; the batch fails only when no clip succeeds.
pub fn batch(
    input: &Path,
    out_dir: &Path,
    variant_count: usize,
    config: &AugmentationConfig,
) -> Result<Vec<SaveReport>> {
    let files = if input.is_dir() {
        find_wav_files(input)?
    } else {
        vec![input.to_path_buf()]
    };
    if files.is_empty() {
        return Err(ClipError::FileNotFound {
            path: format!("{}/**/*.wav", input.display()),
            source: None,
        });
    }

    fs::create_dir_all(out_dir)?;
    info!("Batch: {} file(s) -> {}", files.len(), out_dir.display());

    let base_seed = base_seed(config);
    let mut reports = Vec::new();
    let mut failures = Vec::new();

    for file in &files {
        match batch_one(file, out_dir, variant_count, config, base_seed) {
            Ok(mut written) => reports.append(&mut written),
            Err(e) => {
                warn!("Skipping {}: {}", file.display(), e);
                failures.push((file.clone(), e));
            }
        }
    }

    println!("Batch complete: {} file(s) written", reports.len());
    if !failures.is_empty() {
        println!("Failed: {}", failures.len());
        for (file, e) in &failures {
            println!("  {}: {}", file.display(), e);
        }
    }

    match (reports.is_empty(), failures.into_iter().next()) {
        (true, Some((_, e))) => Err(e),
        _ => Ok(reports),
    }
}

fn batch_one(
    file: &Path,
    out_dir: &Path,
    variant_count: usize,
    config: &AugmentationConfig,
    base_seed: u64,
) -> Result<Vec<SaveReport>> {
    let source = load_audio(file, config.sample_rate)?;
    let vocoder = PhaseVocoder::default();
    let stem = file_stem(file);
    let mut reports = Vec::with_capacity(Method::ALL.len() + variant_count);

    for method in Method::ALL {
        let method_config = config.with_method(method);
        let mut rng = rng_for(&method_config);
        let extended = extend_signal(&source, &method_config, &vocoder, &mut rng)?;
        let path = out_dir.join(format!("{}_extended_{}.wav", stem, method));
        reports.push(save_normalized(extended, &path)?);
    }

    let mut written = write_variants(&source, config, base_seed, variant_count, out_dir, &stem)?;
    reports.append(&mut written);

    info!("{}: {} outputs", file.display(), reports.len());
    Ok(reports)
}

fn write_variants(
    source: &Signal,
    config: &AugmentationConfig,
    base_seed: u64,
    count: usize,
    out_dir: &Path,
    stem: &str,
) -> Result<Vec<SaveReport>> {
    let vocoder = PhaseVocoder::default();
    let variants = generate_variants(source, config, &vocoder, base_seed, count)?;

    variants
        .into_iter()
        .enumerate()
        .map(|(i, variant)| {
            let path = out_dir.join(format!("{}_extended_variant_{}.wav", stem, i + 1));
            save_normalized(variant, &path)
        })
        .collect()
}

fn save_normalized(signal: Signal, path: &Path) -> Result<SaveReport> {
    let sample_rate = signal.sample_rate;
    let normalized = Signal::new(
        normalize_peak(signal.into_samples(), DEFAULT_TARGET_PEAK),
        sample_rate,
    );
    save_audio(&normalized, path)
}

/// Configured seed, or a fresh one that is logged so the run can be repeated
fn base_seed(config: &AugmentationConfig) -> u64 {
    config.seed.unwrap_or_else(|| {
        let seed = rand::random();
        info!("No seed configured, using {}", seed);
        seed
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "clip".to_string())
}

/// `dir/name.wav` -> `dir/name<suffix>.wav`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    path.with_file_name(format!("{}{}.wav", file_stem(path), suffix))
}
