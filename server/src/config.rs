// Configuration constants for the server

use std::time::Duration;

#[derive(Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub rate_limit_per_minute: u32,
    pub speech_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub cors_allowed_origins: Option<Vec<String>>,
    /// Sample rate of the raw PCM the remote speech API delivers.
    pub sample_rate: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8086,
            rate_limit_per_minute: 60,
            speech_timeout_secs: 120,
            request_timeout_secs: 60,
            cors_allowed_origins: None,
            sample_rate: audio_core::DEFAULT_SAMPLE_RATE,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8086);

        let rate_limit_per_minute = std::env::var("RATE_LIMIT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let speech_timeout_secs = std::env::var("SPEECH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(120);

        let request_timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect()
            });

        let sample_rate = std::env::var("SPEECH_SAMPLE_RATE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(audio_core::DEFAULT_SAMPLE_RATE);

        Self {
            port,
            rate_limit_per_minute,
            speech_timeout_secs,
            request_timeout_secs,
            cors_allowed_origins,
            sample_rate,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn speech_timeout(&self) -> Duration {
        Duration::from_secs(self.speech_timeout_secs)
    }
}
