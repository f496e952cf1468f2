//! Augmentation configuration
//!
//! An `AugmentationConfig` is validated once at construction and is
//! immutable afterwards. It can come from CLI flags or a JSON file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dsp::{fade_samples, DEFAULT_FADE_SECS, DEFAULT_NOISE_LEVEL};
use crate::engine::signal::DEFAULT_SAMPLE_RATE;
use crate::error::{ClipError, Result};

/// Default target duration in seconds
pub const DEFAULT_TARGET_DURATION_SECS: f64 = 5.0;

/// Length-matching method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Tile the clip with faded seams
    #[serde(alias = "simple")]
    Repeat,
    /// One time-stretch to the exact target duration
    Stretch,
    /// Slow down to 70% speed, then tile
    StretchAndRepeat,
    /// Center the clip in silence
    #[serde(alias = "pad_silence")]
    SilencePad,
    /// Stretch, tile, add noise and echo, normalize
    #[default]
    Comprehensive,
}

impl Method {
    /// All methods, in output order for batch runs
    pub const ALL: [Method; 5] = [
        Method::Repeat,
        Method::Stretch,
        Method::StretchAndRepeat,
        Method::SilencePad,
        Method::Comprehensive,
    ];

    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Repeat => "repeat",
            Method::Stretch => "stretch",
            Method::StretchAndRepeat => "stretch_and_repeat",
            Method::SilencePad => "silence_pad",
            Method::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ClipError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "repeat" | "simple" => Ok(Method::Repeat),
            "stretch" => Ok(Method::Stretch),
            "stretch_and_repeat" => Ok(Method::StretchAndRepeat),
            "silence_pad" | "pad_silence" => Ok(Method::SilencePad),
            "comprehensive" => Ok(Method::Comprehensive),
            _ => Err(ClipError::config(format!("unknown method '{}'", s))),
        }
    }
}

/// Settings for one extension run
///
/// # Example
/// ```
/// use clipstretch::config::{AugmentationConfig, Method};
///
/// let config = AugmentationConfig::new(2.0, 22050, Method::Repeat, 0.005).unwrap();
/// assert_eq!(config.target_length(), 44100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AugmentationConfig {
    /// Output duration in seconds (> 0)
    pub target_duration_secs: f64,
    /// Processing sample rate in Hz (> 0)
    pub sample_rate: u32,
    /// Length-matching method
    pub method: Method,
    /// White-noise standard deviation (>= 0)
    pub noise_level: f32,
    /// Seam fade length in seconds (>= 0)
    pub fade_secs: f64,
    /// Pitch shift applied before length matching, in semitones
    pub pitch_steps: f32,
    /// Std-dev of the noise filling SilencePad padding; 0 keeps exact silence
    pub silence_dither: f32,
    /// Seed for randomized parameters; `None` uses fixed parameters
    pub seed: Option<u64>,
}

impl Default for AugmentationConfig {
    fn default() -> Self {
        Self {
            target_duration_secs: DEFAULT_TARGET_DURATION_SECS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            method: Method::default(),
            noise_level: DEFAULT_NOISE_LEVEL,
            fade_secs: DEFAULT_FADE_SECS,
            pitch_steps: 0.0,
            silence_dither: 0.0,
            seed: None,
        }
    }
}

impl AugmentationConfig {
    /// Create and validate a config with default extras
    pub fn new(
        target_duration_secs: f64,
        sample_rate: u32,
        method: Method,
        noise_level: f32,
    ) -> Result<Self> {
        let config = Self {
            target_duration_secs,
            sample_rate,
            method,
            noise_level,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a JSON file
    ///
    /// Missing fields take their defaults; unknown fields are rejected.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ClipError::FileNotFound {
                path: path.display().to_string(),
                source: None,
            });
        }

        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text).map_err(|e| {
            ClipError::config(format!("invalid config file {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric field against its allowed range
    pub fn validate(&self) -> Result<()> {
        if !self.target_duration_secs.is_finite() || self.target_duration_secs <= 0.0 {
            return Err(ClipError::invalid_param(
                "target_duration",
                self.target_duration_secs,
                "> 0 seconds",
            ));
        }
        if self.sample_rate == 0 {
            return Err(ClipError::invalid_param("sample_rate", self.sample_rate, "> 0 Hz"));
        }
        if !self.noise_level.is_finite() || self.noise_level < 0.0 {
            return Err(ClipError::invalid_param("noise_level", self.noise_level, ">= 0"));
        }
        if !self.fade_secs.is_finite() || self.fade_secs < 0.0 {
            return Err(ClipError::invalid_param("fade_secs", self.fade_secs, ">= 0 seconds"));
        }
        if !self.pitch_steps.is_finite() {
            return Err(ClipError::invalid_param(
                "pitch_steps",
                self.pitch_steps,
                "a finite number of semitones",
            ));
        }
        if !self.silence_dither.is_finite() || self.silence_dither < 0.0 {
            return Err(ClipError::invalid_param(
                "silence_dither",
                self.silence_dither,
                ">= 0",
            ));
        }
        if self.target_length() == 0 {
            return Err(ClipError::invalid_param(
                "target_duration",
                self.target_duration_secs,
                "at least one sample long",
            ));
        }
        Ok(())
    }

    /// Output length in samples: `round(target_duration * sample_rate)`
    pub fn target_length(&self) -> usize {
        (self.target_duration_secs * self.sample_rate as f64).round() as usize
    }

    /// Seam fade length in samples
    pub fn fade_length(&self) -> usize {
        fade_samples(self.fade_secs, self.sample_rate)
    }

    /// Same config with a different method
    pub fn with_method(&self, method: Method) -> Self {
        Self {
            method,
            ..self.clone()
        }
    }

    /// Same config with a seed for randomized parameters
    pub fn with_seed(&self, seed: Option<u64>) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use test_case::test_case;

    #[test_case("repeat" => Method::Repeat)]
    #[test_case("simple" => Method::Repeat)]
    #[test_case("Stretch" => Method::Stretch)]
    #[test_case("stretch-and-repeat" => Method::StretchAndRepeat)]
    #[test_case("pad_silence" => Method::SilencePad)]
    #[test_case(" comprehensive " => Method::Comprehensive)]
    fn test_method_parse(name: &str) -> Method {
        name.parse().unwrap()
    }

    #[test]
    fn test_unknown_method_is_config_error() {
        let err = "echo".parse::<Method>().unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_method_display_roundtrips() {
        for method in Method::ALL {
            assert_eq!(method.to_string().parse::<Method>().unwrap(), method);
        }
    }

    #[test]
    fn test_target_length_rounds() {
        let config = AugmentationConfig::new(2.0, 22050, Method::Repeat, 0.0).unwrap();
        assert_eq!(config.target_length(), 44100);

        // 0.00005 * 22050 = 1.1025
        let config = AugmentationConfig::new(0.00005, 22050, Method::Repeat, 0.0).unwrap();
        assert_eq!(config.target_length(), 1);
    }

    #[test]
    fn test_default_fade_length() {
        let config = AugmentationConfig::default();
        assert_eq!(config.fade_length(), 1102);
        assert_eq!(config.target_length(), 110250);
    }

    #[test_case(0.0, 22050, 0.0 ; "zero duration")]
    #[test_case(-1.0, 22050, 0.0 ; "negative duration")]
    #[test_case(1.0, 0, 0.0 ; "zero sample rate")]
    #[test_case(1.0, 22050, -0.01 ; "negative noise")]
    #[test_case(1e-9, 22050, 0.0 ; "shorter than one sample")]
    fn test_invalid_config(duration: f64, sample_rate: u32, noise: f32) {
        let err =
            AugmentationConfig::new(duration, sample_rate, Method::Repeat, noise).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_from_json_file_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"target_duration_secs": 3.0, "method": "silence_pad", "seed": 42}}"#
        )
        .unwrap();

        let config = AugmentationConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.method, Method::SilencePad);
        assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.target_length(), 66150);
    }

    #[test_case("simple" => Method::Repeat)]
    #[test_case("pad_silence" => Method::SilencePad)]
    #[test_case("stretch_and_repeat" => Method::StretchAndRepeat)]
    fn test_from_json_file_method_names(name: &str) -> Method {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"method": "{}"}}"#, name).unwrap();

        AugmentationConfig::from_json_file(file.path()).unwrap().method
    }

    #[test]
    fn test_from_json_file_unknown_method() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"method": "granular"}}"#).unwrap();

        let err = AugmentationConfig::from_json_file(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
    }

    #[test]
    fn test_from_json_file_validates() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"noise_level": -0.5}}"#).unwrap();

        let err = AugmentationConfig::from_json_file(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = AugmentationConfig::from_json_file(Path::new("/nonexistent/config.json"))
            .unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }
}
