use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use lru::LruCache;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::params::{Emotion, Voice};

const GENERATE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Model the speech requests go to unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Fixed phrase spoken when previewing a voice.
pub const PREVIEW_TEXT: &str = "Hello, you can hear my voice now.";

const PREVIEW_CACHE_SIZE: usize = 16;
const PREVIEW_TTL: Duration = Duration::from_secs(3600);

/// Request body for the generateContent speech call.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig<'a> {
    #[serde(rename = "responseModalities")]
    response_modalities: [&'static str; 1],
    #[serde(rename = "speechConfig")]
    speech_config: SpeechConfig<'a>,
}

#[derive(Serialize)]
struct SpeechConfig<'a> {
    #[serde(rename = "voiceConfig")]
    voice_config: VoiceConfig<'a>,
}

#[derive(Serialize)]
struct VoiceConfig<'a> {
    #[serde(rename = "prebuiltVoiceConfig")]
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Serialize)]
struct PrebuiltVoiceConfig<'a> {
    #[serde(rename = "voiceName")]
    voice_name: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
struct InlineData {
    data: String,
}

struct CachedPreview {
    pcm_base64: String,
    cached_at: Instant,
}

/// Blocking client for the remote speech API. The server drives it from
/// `spawn_blocking`; one instance is shared across requests.
pub struct SpeechClient {
    http: Client,
    api_key: String,
    model: String,
    preview_cache: Mutex<LruCache<Voice, CachedPreview>>,
    preview_ttl: Duration,
}

impl SpeechClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let cache_size = NonZeroUsize::new(PREVIEW_CACHE_SIZE)
            .unwrap_or(NonZeroUsize::MIN);
        // The blocking Client owns a private runtime; building it from an
        // async context panics, so construction runs on its own thread.
        let http = std::thread::spawn(Client::new)
            .join()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            preview_cache: Mutex::new(LruCache::new(cache_size)),
            preview_ttl: PREVIEW_TTL,
        }
    }

    /// Read API key from `GEMINI_API_KEY`, model from `SPEECH_MODEL`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .context("GEMINI_API_KEY must be set in the environment")?;
        let model = std::env::var("SPEECH_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        Ok(Self::new(api_key, model))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Synthesize `text` with the given voice and emotion. Returns the
    /// base64 PCM payload exactly as the API delivered it.
    pub fn generate(&self, text: &str, voice: Voice, emotion: Emotion) -> Result<String> {
        let prompt = build_prompt(text, emotion);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: voice.prebuilt_name(),
                        },
                    },
                },
            },
        };

        let url = format!("{GENERATE_BASE_URL}/{}:generateContent", self.model);
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .context("speech API request failed")?
            .error_for_status()
            .context("speech API returned an error status")?
            .json::<GenerateResponse>()
            .context("speech API response was not valid JSON")?;

        extract_audio(response).context("no audio data received from speech API")
    }

    /// Preview a voice with the fixed phrase, served from a per-voice LRU
    /// cache while the entry is fresh.
    pub fn preview(&self, voice: Voice) -> Result<String> {
        {
            let mut cache = self
                .preview_cache
                .lock()
                .map_err(|_| anyhow::anyhow!("preview cache lock poisoned"))?;
            if let Some(hit) = cache.get(&voice) {
                if hit.cached_at.elapsed() < self.preview_ttl {
                    return Ok(hit.pcm_base64.clone());
                }
            }
        }

        let pcm_base64 = self.generate(PREVIEW_TEXT, voice, Emotion::Calm)?;

        let mut cache = self
            .preview_cache
            .lock()
            .map_err(|_| anyhow::anyhow!("preview cache lock poisoned"))?;
        cache.put(
            voice,
            CachedPreview {
                pcm_base64: pcm_base64.clone(),
                cached_at: Instant::now(),
            },
        );
        Ok(pcm_base64)
    }
}

fn build_prompt(text: &str, emotion: Emotion) -> String {
    format!("Say {}: {}", emotion.token(), text)
}

fn extract_audio(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| {
            content
                .parts
                .into_iter()
                .find_map(|part| part.inline_data)
        })
        .map(|inline| inline.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_emotion_adverb() {
        assert_eq!(
            build_prompt("Good morning", Emotion::Happy),
            "Say cheerfully: Good morning"
        );
        assert_eq!(build_prompt("x", Emotion::Calm), "Say calmly: x");
    }

    #[test]
    fn request_body_matches_wire_format() {
        let prompt = build_prompt("Hi", Emotion::Serious);
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: Voice::Whisper.prebuilt_name(),
                        },
                    },
                },
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Say seriously: Hi");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "AUDIO");
        assert_eq!(
            json["generationConfig"]["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]
                ["voiceName"],
            "Zephyr"
        );
    }

    #[test]
    fn audio_payload_is_extracted_from_response() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "ignored" },
                        { "inlineData": { "data": "AAD/fw==" } }
                    ]
                }
            }]
        });
        let response: GenerateResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(extract_audio(response).as_deref(), Some("AAD/fw=="));
    }

    #[test]
    fn missing_audio_yields_none() {
        let empty: GenerateResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(extract_audio(empty).is_none());

        let text_only: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "hello" }] } }]
        }))
        .unwrap();
        assert!(extract_audio(text_only).is_none());
    }
}
