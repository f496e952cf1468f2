//! Length matching and augmentation
//!
//! Strategies produce a clip of exactly the configured length; the
//! comprehensive pipeline layers stretch, repetition, noise and echo on top.

pub mod pipeline;
pub mod strategy;
pub mod variants;

pub use pipeline::{comprehensive, extend, pitch_prestep, rng_for, ComprehensiveParams};
pub use strategy::{repeat, silence_pad, stretch, stretch_and_repeat};
pub use variants::{derive_seed, generate_variant, generate_variants, DEFAULT_VARIANT_COUNT};
