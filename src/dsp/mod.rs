//! Signal primitives
//!
//! Elementary transforms the length-matching strategies and the
//! augmentation pipeline are built from. Every primitive works on sample
//! slices and returns a new buffer, except `crossfade_seams` which modifies
//! a buffer the caller already owns.

pub mod fade;
pub mod noise;
pub mod normalize;
pub mod pitch;
pub mod resample;
pub mod reverb;
pub mod tile;

pub use fade::{crossfade_seams, fade_samples, repeat_and_fade, FadeWindow, DEFAULT_FADE_SECS};
pub use noise::{
    add_background_noise, add_white_noise, gaussian_noise, mix_background, DEFAULT_NOISE_LEVEL,
};
pub use normalize::{clip, normalize_peak, DEFAULT_TARGET_PEAK};
pub use pitch::pitch_shift;
pub use resample::{resample_linear, resample_rate};
pub use reverb::{reverb, DEFAULT_ROOM_SIZE};
pub use tile::{pad_with_silence, pad_zeros, repeats_to_cover, tile};
