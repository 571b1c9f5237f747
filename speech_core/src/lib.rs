//! Remote speech synthesis: the closed voice/emotion/language model and a
//! client for the generative speech API. The client returns the raw base64
//! PCM payload untouched; framing it as WAV is `audio_core`'s job.

mod client;
mod params;

pub use client::{SpeechClient, DEFAULT_MODEL, PREVIEW_TEXT};
pub use params::{Emotion, Language, Voice, VoiceGroup};
