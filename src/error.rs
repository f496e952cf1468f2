//! Error handling for clipstretch
//!
//! Every error is fatal to the current invocation. Nothing is written to disk
//! until a full-length buffer has been produced.

use thiserror::Error;

/// Result type alias for clipstretch operations
pub type Result<T> = std::result::Result<T, ClipError>;

/// Main error type for clipstretch operations
#[derive(Error, Debug)]
pub enum ClipError {
    // Configuration Errors
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("Invalid parameter '{param}': got {value}, expected {expected}")]
    InvalidParameter {
        param: String,
        value: String,
        expected: String,
    },

    // Signal Errors
    #[error("Signal contains no samples")]
    EmptySignal,

    #[error("Sample rate mismatch: expected {expected} Hz, got {actual} Hz")]
    SampleRateMismatch { expected: u32, actual: u32 },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Invalid audio file: {reason}")]
    InvalidAudio {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClipError {
    /// Shorthand for an `InvalidParameter` error
    pub fn invalid_param(
        param: impl Into<String>,
        value: impl ToString,
        expected: impl Into<String>,
    ) -> Self {
        ClipError::InvalidParameter {
            param: param.into(),
            value: value.to_string(),
            expected: expected.into(),
        }
    }

    /// Shorthand for a `Config` error
    pub fn config(reason: impl Into<String>) -> Self {
        ClipError::Config {
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            ClipError::Config { .. } => "CONFIG_ERROR",
            ClipError::InvalidParameter { .. } => "INVALID_PARAMETER",
            ClipError::EmptySignal => "EMPTY_SIGNAL",
            ClipError::SampleRateMismatch { .. } => "INVALID_PARAMETER",
            ClipError::FileNotFound { .. } => "FILE_NOT_FOUND",
            ClipError::InvalidAudio { .. } => "INVALID_AUDIO",
            ClipError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ClipError::Io(_) => "IO_ERROR",
            ClipError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether the error came from the I/O adapter rather than the core
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            ClipError::FileNotFound { .. }
                | ClipError::InvalidAudio { .. }
                | ClipError::UnsupportedFormat { .. }
                | ClipError::Io(_)
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            ClipError::Config { .. } => vec![
                "Valid methods: repeat, stretch, stretch_and_repeat, silence_pad, comprehensive",
                "Check the field names in the JSON config file",
            ],
            ClipError::InvalidParameter { .. } | ClipError::SampleRateMismatch { .. } => vec![
                "Duration, sample rate and stretch rate must be greater than zero",
                "Noise level must not be negative",
            ],
            ClipError::EmptySignal => vec![
                "The input clip has no samples - re-export it from the source",
            ],
            ClipError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            ClipError::InvalidAudio { .. } => vec![
                "Try converting the file to WAV format first",
                "The file may be corrupted - try re-exporting from source",
            ],
            ClipError::UnsupportedFormat { .. } => vec![
                "Convert to 8/16/24/32-bit PCM or 32-bit float WAV",
            ],
            _ => vec![],
        }
    }
}
