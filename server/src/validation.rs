use speech_core::{Emotion, Language, Voice};

use crate::error::ApiError;

/// Maximum text length for speech requests
const MAX_TEXT_LENGTH: usize = 5000;

/// Validate the text to synthesize
pub fn validate_text(text: &str) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::InvalidInput("Text cannot be empty".to_string()));
    }
    if text.len() > MAX_TEXT_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "Text too long (max {} characters)",
            MAX_TEXT_LENGTH
        )));
    }
    Ok(())
}

/// Resolve a voice id; the set is closed, free-form names are rejected
pub fn parse_voice(id: &str) -> Result<Voice, ApiError> {
    Voice::from_id(id).ok_or_else(|| {
        ApiError::InvalidInput(format!("Unknown voice '{}'. Use /voices to list.", id))
    })
}

/// Resolve an emotion id
pub fn parse_emotion(id: &str) -> Result<Emotion, ApiError> {
    Emotion::from_id(id).ok_or_else(|| {
        ApiError::InvalidInput(format!("Unknown emotion '{}'. Use /emotions to list.", id))
    })
}

/// Resolve a language code (e.g. "en", "de")
pub fn parse_language(code: &str) -> Result<Language, ApiError> {
    Language::from_code(code).ok_or_else(|| {
        ApiError::InvalidInput(format!(
            "Unknown language code '{}'. Use /languages to list.",
            code
        ))
    })
}
