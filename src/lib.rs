//! clipstretch - extend short utterances to a fixed duration
//!
//! Takes a short recorded clip and renders it at an exact target length for
//! model training, in several alternative ways:
//! - Repeat: tile the clip with faded seams
//! - Stretch: one pitch-preserving time-stretch to the target
//! - Stretch and repeat: slow down, then tile
//! - Silence pad: center the clip in silence
//! - Comprehensive: stretch, tile, noise, echo and peak normalization,
//!   optionally as a batch of seeded variants
//!
//! # Architecture
//!
//! - `engine`: the `Signal` type and WAV load/save (the I/O adapter)
//! - `dsp`: elementary signal primitives
//! - `stretch`: the `TimeStretcher` trait and a phase-vocoder engine
//! - `augment`: length-matching strategies and the comprehensive pipeline
//! - `config`: `AugmentationConfig` and `Method`
//! - `cli`: command-line front end

pub mod augment;
pub mod cli;
pub mod config;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod stretch;

pub use config::{AugmentationConfig, Method};
pub use engine::Signal;
pub use error::{ClipError, Result};
