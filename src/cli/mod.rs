//! CLI Module
//!
//! Command-line interface for clipstretch.

pub mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::augment::DEFAULT_VARIANT_COUNT;
use crate::config::{AugmentationConfig, Method};
use crate::error::Result;

/// Extend short utterances to a fixed duration for training data
#[derive(Parser, Debug)]
#[command(name = "clipstretch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that builds an `AugmentationConfig`
///
/// Flags that are given override values loaded from `--config`.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Target duration in seconds
    #[arg(short, long)]
    pub duration: Option<f64>,

    /// Processing sample rate in Hz
    #[arg(short = 'r', long)]
    pub sample_rate: Option<u32>,

    /// repeat | stretch | stretch_and_repeat | silence_pad | comprehensive
    #[arg(short, long)]
    pub method: Option<String>,

    /// White-noise level (standard deviation)
    #[arg(short, long)]
    pub noise_level: Option<f32>,

    /// Pitch shift in semitones applied before extension
    #[arg(long, allow_hyphen_values = true)]
    pub pitch_steps: Option<f32>,

    /// Noise level filling silence padding (0 = exact silence)
    #[arg(long)]
    pub silence_dither: Option<f32>,

    /// Seed for randomized parameters
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl ConfigArgs {
    /// Merge file values, defaults and flags into a validated config
    pub fn resolve(&self) -> Result<AugmentationConfig> {
        let mut config = match &self.config {
            Some(path) => AugmentationConfig::from_json_file(path)?,
            None => AugmentationConfig::default(),
        };

        if let Some(duration) = self.duration {
            config.target_duration_secs = duration;
        }
        if let Some(sample_rate) = self.sample_rate {
            config.sample_rate = sample_rate;
        }
        if let Some(method) = &self.method {
            config.method = method.parse::<Method>()?;
        }
        if let Some(noise_level) = self.noise_level {
            config.noise_level = noise_level;
        }
        if let Some(pitch_steps) = self.pitch_steps {
            config.pitch_steps = pitch_steps;
        }
        if let Some(silence_dither) = self.silence_dither {
            config.silence_dither = silence_dither;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extend one clip with one method
    #[command(name = "extend")]
    Extend {
        /// Input WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output WAV file (default: <input>_extended.wav)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Generate seeded comprehensive variants of one clip
    #[command(name = "variants")]
    Variants {
        /// Input WAV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Number of variants
        #[arg(long, default_value_t = DEFAULT_VARIANT_COUNT)]
        count: usize,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Render every method plus variants for a clip or a directory of clips
    #[command(name = "batch")]
    Batch {
        /// Input WAV file or directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Number of variants per clip
        #[arg(long, default_value_t = DEFAULT_VARIANT_COUNT)]
        variants: usize,

        #[command(flatten)]
        config: ConfigArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_extend() {
        let cli = Cli::try_parse_from([
            "clipstretch",
            "extend",
            "-i",
            "in.wav",
            "--duration",
            "3",
            "--method",
            "silence-pad",
            "--pitch-steps",
            "-2",
        ])
        .unwrap();

        match cli.command {
            Commands::Extend { input, output, config } => {
                assert_eq!(input, PathBuf::from("in.wav"));
                assert!(output.is_none());
                let resolved = config.resolve().unwrap();
                assert_eq!(resolved.method, Method::SilencePad);
                assert_eq!(resolved.target_length(), 66150);
                assert_eq!(resolved.pitch_steps, -2.0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_resolve_unknown_method() {
        let args = ConfigArgs {
            method: Some("granular".to_string()),
            ..ConfigArgs::default()
        };
        assert_eq!(args.resolve().unwrap_err().error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_resolve_invalid_duration() {
        let args = ConfigArgs {
            duration: Some(0.0),
            ..ConfigArgs::default()
        };
        assert_eq!(args.resolve().unwrap_err().error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_variants_default_count() {
        let cli =
            Cli::try_parse_from(["clipstretch", "variants", "-i", "a.wav", "-o", "out"]).unwrap();
        match cli.command {
            Commands::Variants { count, .. } => assert_eq!(count, DEFAULT_VARIANT_COUNT),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
