//! Audio Engine Module
//!
//! The signal type and the WAV adapter around the core:
//! - Mono signal buffers and level analysis
//! - File I/O operations

pub mod io;
pub mod signal;

pub use io::{find_wav_files, load_audio, save_audio, SaveReport};
pub use signal::{Signal, DEFAULT_SAMPLE_RATE};
