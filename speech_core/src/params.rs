use serde::{Deserialize, Serialize};

/// Selectable voices. Each maps to an opaque token understood by the
/// remote speech API; the UI never sends free-form voice names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Voice {
    AdultFemaleFormal,
    AdultMaleFormal,
    AdultFemaleFriendly,
    AdultMaleFriendly,
    Neutral,
    Deep,
    Whisper,
}

/// Listing group a voice is shown under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceGroup {
    Standard,
    Character,
}

impl Voice {
    pub const ALL: [Voice; 7] = [
        Voice::AdultFemaleFormal,
        Voice::AdultMaleFormal,
        Voice::AdultFemaleFriendly,
        Voice::AdultMaleFriendly,
        Voice::Neutral,
        Voice::Deep,
        Voice::Whisper,
    ];

    /// Token handed to the remote API. Variant suffixes (`_neutral`,
    /// `_whisper`) select a delivery style of the same base voice.
    pub fn token(self) -> &'static str {
        match self {
            Voice::AdultFemaleFormal => "Kore",
            Voice::AdultMaleFormal => "Puck",
            Voice::AdultFemaleFriendly => "Zephyr",
            Voice::AdultMaleFriendly => "Charon",
            Voice::Neutral => "Zephyr_neutral",
            Voice::Deep => "Fenrir",
            Voice::Whisper => "Zephyr_whisper",
        }
    }

    /// Base voice name the API's prebuilt voice config expects, with any
    /// `_variant` suffix stripped.
    pub fn prebuilt_name(self) -> &'static str {
        let token = self.token();
        match token.find('_') {
            Some(i) => &token[..i],
            None => token,
        }
    }

    /// Identifier used on the HTTP API.
    pub fn id(self) -> &'static str {
        match self {
            Voice::AdultFemaleFormal => "adult_female_formal",
            Voice::AdultMaleFormal => "adult_male_formal",
            Voice::AdultFemaleFriendly => "adult_female_friendly",
            Voice::AdultMaleFriendly => "adult_male_friendly",
            Voice::Neutral => "neutral",
            Voice::Deep => "deep",
            Voice::Whisper => "whisper",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Voice::AdultFemaleFormal => "Female (Formal)",
            Voice::AdultMaleFormal => "Male (Formal)",
            Voice::AdultFemaleFriendly => "Female (Friendly)",
            Voice::AdultMaleFriendly => "Male (Friendly)",
            Voice::Neutral => "Neutral",
            Voice::Deep => "Deep",
            Voice::Whisper => "Whisper",
        }
    }

    pub fn group(self) -> VoiceGroup {
        match self {
            Voice::Deep | Voice::Whisper => VoiceGroup::Character,
            _ => VoiceGroup::Standard,
        }
    }

    pub fn from_id(id: &str) -> Option<Voice> {
        Voice::ALL.into_iter().find(|v| v.id() == id)
    }
}

/// Emotion modifier prepended to the synthesis prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Calm,
    Happy,
    Sad,
    Serious,
}

impl Emotion {
    pub const ALL: [Emotion; 4] = [Emotion::Calm, Emotion::Happy, Emotion::Sad, Emotion::Serious];

    /// Adverb spliced into the prompt, e.g. "Say cheerfully: ...".
    pub fn token(self) -> &'static str {
        match self {
            Emotion::Calm => "calmly",
            Emotion::Happy => "cheerfully",
            Emotion::Sad => "sadly",
            Emotion::Serious => "seriously",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Emotion::Calm => "calm",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Serious => "serious",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Calm => "Calm",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Serious => "Serious",
        }
    }

    pub fn from_id(id: &str) -> Option<Emotion> {
        Emotion::ALL.into_iter().find(|e| e.id() == id)
    }
}

/// Languages offered in the UI. The synthesis prompt itself is language
/// agnostic; this only drives the selection list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    English,
    Spanish,
    Hindi,
    Arabic,
    Urdu,
    Persian,
    French,
    German,
    Japanese,
    Korean,
    Portuguese,
    Russian,
    Chinese,
}

impl Language {
    pub const ALL: [Language; 13] = [
        Language::English,
        Language::Spanish,
        Language::Hindi,
        Language::Arabic,
        Language::Urdu,
        Language::Persian,
        Language::French,
        Language::German,
        Language::Japanese,
        Language::Korean,
        Language::Portuguese,
        Language::Russian,
        Language::Chinese,
    ];

    /// ISO 639-1 code, also the wire id.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::Hindi => "hi",
            Language::Arabic => "ar",
            Language::Urdu => "ur",
            Language::Persian => "fa",
            Language::French => "fr",
            Language::German => "de",
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Portuguese => "pt",
            Language::Russian => "ru",
            Language::Chinese => "zh",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Hindi => "Hindi",
            Language::Arabic => "Arabic",
            Language::Urdu => "Urdu",
            Language::Persian => "Persian",
            Language::French => "French",
            Language::German => "German",
            Language::Japanese => "Japanese",
            Language::Korean => "Korean",
            Language::Portuguese => "Portuguese",
            Language::Russian => "Russian",
            Language::Chinese => "Chinese",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|l| l.code() == code)
    }
}
