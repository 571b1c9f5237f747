//! Pure PCM/WAV codec shared by the speech endpoints.
//!
//! The remote speech API hands back raw signed 16-bit little-endian PCM as a
//! base64 string; this crate turns that payload into a normalized
//! [`SampleBuffer`] and re-frames it as a standard RIFF/WAVE file for
//! playback or download. Everything here is a synchronous, allocation-only
//! transformation: no I/O, no shared state, safe to run concurrently on
//! separate buffers.

mod error;
mod pcm;
mod wav;

pub use error::DecodeError;
pub use pcm::{decode_base64, decode_base64_pcm, decode_pcm, SampleBuffer};
pub use wav::{encode_wav, encode_wav_base64};

/// Sample rate the remote speech API delivers by convention.
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;

/// The remote speech API produces mono audio.
pub const DEFAULT_CHANNEL_COUNT: usize = 1;
