//! WAV file I/O for clipstretch
//!
//! Loading decodes any PCM or float WAV, downmixes it to mono and resamples
//! it to the processing rate. Saving clips to [-1, 1] and writes mono 32-bit
//! float WAV.
//!
//! Sample rate conversion uses linear interpolation.

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::debug;
use walkdir::WalkDir;

use crate::dsp::{clip, resample_rate};
use crate::engine::signal::Signal;
use crate::error::{ClipError, Result};

/// Outcome of a successful save
#[derive(Debug, Clone, PartialEq)]
pub struct SaveReport {
    /// Where the file was written
    pub path: PathBuf,
    /// Number of samples written
    pub num_samples: usize,
    /// Duration of the written audio in seconds
    pub duration_secs: f64,
}

/// Load a WAV file as a mono signal at `target_rate`
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `InvalidAudio` - If the file is not a valid WAV file
/// * `UnsupportedFormat` - If the bit depth cannot be decoded
/// * `EmptySignal` - If the file holds no samples
pub fn load_audio(path: &Path, target_rate: u32) -> Result<Signal> {
    if target_rate == 0 {
        return Err(ClipError::invalid_param("sample_rate", target_rate, "> 0 Hz"));
    }

    if !path.exists() {
        return Err(ClipError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    let reader = WavReader::open(path).map_err(|e| ClipError::InvalidAudio {
        reason: format!("Failed to open WAV file: {}", e),
        source: Some(Box::new(e)),
    })?;

    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;
    let interleaved = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;
    let mono = downmix(&interleaved, channels);

    if mono.is_empty() {
        return Err(ClipError::EmptySignal);
    }

    debug!(
        "loaded {}: {} ch, {} Hz, {}-bit {:?}, {} frames",
        path.display(),
        channels,
        spec.sample_rate,
        spec.bits_per_sample,
        spec.sample_format,
        mono.len()
    );

    let samples = resample_rate(&mono, spec.sample_rate, target_rate);
    Ok(Signal::new(samples, target_rate))
}

/// Write a signal as mono 32-bit float WAV
///
/// Samples are clipped to [-1.0, 1.0] first. The signal is only written once
/// it is complete, so a failed run never leaves a partial file behind from
/// the core.
pub fn save_audio(signal: &Signal, path: &Path) -> Result<SaveReport> {
    if signal.sample_rate == 0 {
        return Err(ClipError::invalid_param("sample_rate", 0, "> 0 Hz"));
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };

    let mut clipped = signal.samples.clone();
    clip(&mut clipped);

    let mut writer = WavWriter::create(path, spec).map_err(write_error)?;
    for sample in &clipped {
        writer.write_sample(*sample).map_err(write_error)?;
    }
    writer.finalize().map_err(write_error)?;

    let report = SaveReport {
        path: path.to_path_buf(),
        num_samples: clipped.len(),
        duration_secs: signal.duration_secs(),
    };
    debug!(
        "saved {} ({} samples, {:.2}s)",
        report.path.display(),
        report.num_samples,
        report.duration_secs
    );
    Ok(report)
}

/// All `.wav` files under `dir`, sorted by path
pub fn find_wav_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(ClipError::FileNotFound {
            path: dir.display().to_string(),
            source: None,
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|e| ClipError::Io(e.into()))?;
        let is_wav = entry
            .path()
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("wav"))
            .unwrap_or(false);
        if entry.file_type().is_file() && is_wav {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

// ============================================================================
// Internal helper functions
// ============================================================================

/// Map a hound write failure onto an I/O error
fn write_error(e: hound::Error) -> ClipError {
    match e {
        hound::Error::IoError(io) => ClipError::Io(io),
        other => ClipError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            other.to_string(),
        )),
    }
}

/// Read samples from WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    let read_error = |bits: &str, e: hound::Error| ClipError::InvalidAudio {
        reason: format!("Failed to read {} samples: {}", bits, e),
        source: Some(Box::new(e)),
    };

    match sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(|e| read_error("float", e)),
        SampleFormat::Int => match bits_per_sample {
            8 => reader
                .samples::<i8>()
                .map(|s| s.map(|v| v as f32 / 128.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| read_error("8-bit", e)),
            16 => reader
                .samples::<i16>()
                .map(|s| s.map(|v| v as f32 / 32768.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| read_error("16-bit", e)),
            // 24-bit stored as i32 in hound
            24 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 8388608.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| read_error("24-bit", e)),
            32 => reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / 2147483648.0))
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| read_error("32-bit int", e)),
            _ => Err(ClipError::UnsupportedFormat {
                format: format!("{}-bit integer audio", bits_per_sample),
            }),
        },
    }
}

/// Average interleaved frames down to one channel
fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }

    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
