use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

/// A persisted document as the backend reports it.
///
/// Timestamps are backend-issued ISO-8601 strings and are never written by
/// the client.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// In-memory, possibly-unsaved representation of a document being edited.
///
/// Has no id; the backend assigns one on the first successful create.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DocumentDraft {
    pub title: String,
    pub content: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl DocumentDraft {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            title: doc.title.clone(),
            content: doc.content.clone(),
            description: doc.description.clone(),
            tags: doc.tags.clone(),
        }
    }
}

/// Models the generation backend accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiModel {
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
}

impl AiModel {
    pub fn label(self) -> &'static str {
        match self {
            AiModel::Gpt35Turbo => "GPT-3.5 Turbo",
            AiModel::Gpt4 => "GPT-4",
        }
    }

    pub fn wire_name(self) -> &'static str {
        match self {
            AiModel::Gpt35Turbo => "gpt-3.5-turbo",
            AiModel::Gpt4 => "gpt-4",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "gpt-3.5-turbo" => Some(AiModel::Gpt35Turbo),
            "gpt-4" => Some(AiModel::Gpt4),
            _ => None,
        }
    }
}

pub const TEMPERATURE_RANGE: (f32, f32) = (0.1, 1.0);
pub const MAX_TOKENS_RANGE: (u32, u32) = (500, 4000);

/// Knobs for one generation or edit request. Not persisted; lives only for
/// the duration of a single call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub model: AiModel,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2000,
            model: AiModel::default(),
        }
    }
}

impl GenerationOptions {
    /// Forces the options into the ranges the backend accepts.
    pub fn clamped(self) -> Self {
        Self {
            temperature: self
                .temperature
                .clamp(TEMPERATURE_RANGE.0, TEMPERATURE_RANGE.1),
            max_tokens: self.max_tokens.clamp(MAX_TOKENS_RANGE.0, MAX_TOKENS_RANGE.1),
            model: self.model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_clamp_into_backend_ranges() {
        let wild = GenerationOptions {
            temperature: 7.5,
            max_tokens: 10,
            model: AiModel::Gpt4,
        };
        let clamped = wild.clamped();
        assert_eq!(clamped.temperature, 1.0);
        assert_eq!(clamped.max_tokens, 500);
        assert_eq!(clamped.model, AiModel::Gpt4);

        let low = GenerationOptions {
            temperature: 0.0,
            max_tokens: 9999,
            ..GenerationOptions::default()
        };
        let clamped = low.clamped();
        assert_eq!(clamped.temperature, 0.1);
        assert_eq!(clamped.max_tokens, 4000);
    }

    #[test]
    fn options_defaults_are_in_range() {
        let defaults = GenerationOptions::default();
        assert_eq!(defaults, defaults.clamped());
    }

    #[test]
    fn model_wire_names_round_trip() {
        for model in [AiModel::Gpt35Turbo, AiModel::Gpt4] {
            assert_eq!(AiModel::from_wire_name(model.wire_name()), Some(model));
        }
        assert_eq!(AiModel::from_wire_name("claude"), None);
    }
}
