//! Email tone — the four tones offered by the form and their prompt wording.

use serde::{Deserialize, Serialize};

/// Wording used when the requested tone is not one of the four offered.
pub const FALLBACK_TONE_DESCRIPTION: &str = "professional and well-structured";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailTone {
    #[default]
    Professional,
    Enthusiastic,
    Concise,
    Conversational,
}

impl EmailTone {
    pub const ALL: [EmailTone; 4] = [
        EmailTone::Professional,
        EmailTone::Enthusiastic,
        EmailTone::Concise,
        EmailTone::Conversational,
    ];

    /// Form value, e.g. `"professional"`.
    pub fn as_str(self) -> &'static str {
        match self {
            EmailTone::Professional => "professional",
            EmailTone::Enthusiastic => "enthusiastic",
            EmailTone::Concise => "concise",
            EmailTone::Conversational => "conversational",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EmailTone::Professional => "formal and polished",
            EmailTone::Enthusiastic => "energetic and passionate",
            EmailTone::Concise => "brief but comprehensive",
            EmailTone::Conversational => "friendly and approachable",
        }
    }

    /// Case-insensitive lookup by form value.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
    }
}

/// A tone as submitted by the client: blank means the default tone, anything
/// unrecognised is kept so the prompt can fall back to neutral wording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToneChoice {
    Known(EmailTone),
    Unknown(String),
}

impl ToneChoice {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => ToneChoice::Known(EmailTone::default()),
            Some(name) => EmailTone::from_name(name)
                .map(ToneChoice::Known)
                .unwrap_or_else(|| ToneChoice::Unknown(name.to_string())),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToneChoice::Known(tone) => tone.description(),
            ToneChoice::Unknown(_) => FALLBACK_TONE_DESCRIPTION,
        }
    }
}
