use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use audio_core::SampleBuffer;
use speech_core::{Emotion, Language, SpeechClient, Voice, VoiceGroup};

use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::validation::{parse_emotion, parse_language, parse_voice, validate_text};

#[derive(Clone)]
pub struct AppState {
    pub speech: Arc<SpeechClient>,
    pub request_count: Arc<AtomicU64>,
    pub config: ServerConfig,
}

#[derive(Deserialize)]
pub struct SpeakRequest {
    text: String,
    voice: String,
    emotion: String,
    language: Option<String>,
}

#[derive(Serialize)]
pub struct SpeakResponse {
    audio_base64: String,
    duration_ms: u64,
    sample_rate: u32,
}

#[derive(Deserialize)]
pub struct PreviewRequest {
    voice: String,
}

#[derive(Serialize)]
pub struct VoiceInfo {
    id: &'static str,
    label: &'static str,
    group: VoiceGroup,
}

#[derive(Serialize)]
pub struct EmotionInfo {
    id: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
pub struct LanguageInfo {
    id: &'static str,
    label: &'static str,
}

/// Routes shared by the root and `/api` mounts. Middleware (trace, rate
/// limit, timeout, CORS, request ids) is layered on in `main`.
pub fn build_router(state: AppState) -> Router {
    let public_api = Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/voices", get(list_voices))
        .route("/emotions", get(list_emotions))
        .route("/languages", get(list_languages))
        .route("/speak", post(speak_endpoint))
        .route("/speak/preview", post(preview_endpoint))
        .route("/speak/download", post(download_endpoint));

    // Metrics endpoint - consider adding authentication in production
    let metrics_api = Router::new().route("/metrics", get(metrics_endpoint));

    let api = Router::new().merge(public_api).merge(metrics_api);

    Router::new()
        .merge(api.clone()) // root paths
        .nest("/api", api) // /api prefix
        .with_state(state)
}

pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_voices() -> Json<Vec<VoiceInfo>> {
    Json(
        Voice::ALL
            .into_iter()
            .map(|v| VoiceInfo {
                id: v.id(),
                label: v.label(),
                group: v.group(),
            })
            .collect(),
    )
}

pub async fn list_emotions() -> Json<Vec<EmotionInfo>> {
    Json(
        Emotion::ALL
            .into_iter()
            .map(|e| EmotionInfo {
                id: e.id(),
                label: e.label(),
            })
            .collect(),
    )
}

pub async fn list_languages() -> Json<Vec<LanguageInfo>> {
    Json(
        Language::ALL
            .into_iter()
            .map(|l| LanguageInfo {
                id: l.code(),
                label: l.label(),
            })
            .collect(),
    )
}

pub async fn speak_endpoint(
    State(state): State<AppState>,
    Json(req): Json<SpeakRequest>,
) -> Result<Json<SpeakResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_text(&req.text)?;
    let voice = parse_voice(&req.voice)?;
    let emotion = parse_emotion(&req.emotion)?;
    // Language is a UI selection; the remote prompt does not consume it,
    // but a bad code is still a client error.
    if let Some(ref code) = req.language {
        parse_language(code)?;
    }

    let buffer = synthesize_buffer(&state, req.text, voice, emotion).await?;

    Ok(Json(SpeakResponse {
        audio_base64: audio_core::encode_wav_base64(&buffer),
        duration_ms: buffer.duration_ms(),
        sample_rate: buffer.sample_rate(),
    }))
}

pub async fn preview_endpoint(
    State(state): State<AppState>,
    Json(req): Json<PreviewRequest>,
) -> Result<Json<SpeakResponse>, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    let voice = parse_voice(&req.voice)?;

    let speech = state.speech.clone();
    let pcm_base64 = run_speech_call(&state, move || speech.preview(voice)).await?;
    let buffer = decode_payload(&state, &pcm_base64)?;

    Ok(Json(SpeakResponse {
        audio_base64: audio_core::encode_wav_base64(&buffer),
        duration_ms: buffer.duration_ms(),
        sample_rate: buffer.sample_rate(),
    }))
}

pub async fn download_endpoint(
    State(state): State<AppState>,
    Json(req): Json<SpeakRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.request_count.fetch_add(1, Ordering::Relaxed);
    validate_text(&req.text)?;
    let voice = parse_voice(&req.voice)?;
    let emotion = parse_emotion(&req.emotion)?;
    if let Some(ref code) = req.language {
        parse_language(code)?;
    }

    let buffer = synthesize_buffer(&state, req.text, voice, emotion).await?;
    let wav = audio_core::encode_wav(&buffer);

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/wav"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"myaistudio_audio.wav\""),
    );
    Ok((headers, wav))
}

/// Remote synthesis followed by the decode step, as one buffer.
async fn synthesize_buffer(
    state: &AppState,
    text: String,
    voice: Voice,
    emotion: Emotion,
) -> Result<SampleBuffer, ApiError> {
    let speech = state.speech.clone();
    let pcm_base64 =
        run_speech_call(state, move || speech.generate(&text, voice, emotion)).await?;
    decode_payload(state, &pcm_base64)
}

/// Run a blocking speech-API call off the async runtime, bounded by the
/// configured timeout.
async fn run_speech_call<F>(state: &AppState, call: F) -> Result<String, ApiError>
where
    F: FnOnce() -> anyhow::Result<String> + Send + 'static,
{
    let result = tokio::time::timeout(
        state.config.speech_timeout(),
        tokio::task::spawn_blocking(call),
    )
    .await;

    match result {
        Ok(Ok(Ok(payload))) => Ok(payload),
        Ok(Ok(Err(e))) => Err(ApiError::SpeechError(e)),
        Ok(Err(join_err)) => {
            error!("Task join error: {join_err}");
            Err(ApiError::InternalError(format!(
                "Task join error: {join_err}"
            )))
        }
        Err(_) => {
            let timeout_secs = state.config.speech_timeout().as_secs();
            error!("Speech request timed out after {} seconds", timeout_secs);
            Err(ApiError::SpeechError(anyhow::anyhow!(
                "Request timed out after {} seconds. Please try again with a shorter text.",
                timeout_secs
            )))
        }
    }
}

/// Base64 payload -> normalized mono samples at the configured rate.
fn decode_payload(state: &AppState, pcm_base64: &str) -> Result<SampleBuffer, ApiError> {
    let buffer = audio_core::decode_base64_pcm(
        pcm_base64,
        state.config.sample_rate,
        audio_core::DEFAULT_CHANNEL_COUNT,
    )?;
    Ok(buffer)
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub cpu_usage_percent: f32,
    pub memory_used_mb: u64,
    pub memory_total_mb: u64,
    pub memory_usage_percent: f32,
    pub request_count: u64,
    pub uptime_seconds: u64,
    pub system_load: Option<f64>,
}

pub static START_TIME: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();

pub async fn metrics_endpoint(State(state): State<AppState>) -> Json<MetricsResponse> {
    let mut system = sysinfo::System::new();
    system.refresh_cpu();
    system.refresh_memory();

    // Average CPU usage across all cores
    let cpu_usage = system.global_cpu_info().cpu_usage();

    let memory_used = system.used_memory();
    let memory_total = system.total_memory();
    let memory_usage_percent = if memory_total > 0 {
        (memory_used as f64 / memory_total as f64 * 100.0) as f32
    } else {
        0.0
    };

    let request_count = state.request_count.load(Ordering::Relaxed);

    let uptime = START_TIME
        .get()
        .map(|start| start.elapsed().as_secs())
        .unwrap_or(0);

    // System load (Unix-like systems only)
    let system_load = {
        #[cfg(unix)]
        {
            use std::fs;
            if let Ok(loadavg) = fs::read_to_string("/proc/loadavg") {
                loadavg
                    .split_whitespace()
                    .next()
                    .and_then(|s| s.parse::<f64>().ok())
            } else {
                None
            }
        }
        #[cfg(not(unix))]
        None
    };

    Json(MetricsResponse {
        cpu_usage_percent: cpu_usage,
        memory_used_mb: memory_used / 1024 / 1024,
        memory_total_mb: memory_total / 1024 / 1024,
        memory_usage_percent,
        request_count,
        uptime_seconds: uptime,
        system_load,
    })
}
