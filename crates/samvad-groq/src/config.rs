use serde::Deserialize;

/// Groq API base URL for audio transcriptions.
pub const TRANSCRIPTION_URL: &str = "https://api.groq.com/openai/v1/audio/transcriptions";

/// Groq API base URL for chat completions.
pub const CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Default transcription model.
pub const TRANSCRIPTION_MODEL: &str = "whisper-large-v3";

/// Default chat-completion model.
pub const CHAT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// Connection settings for both endpoints.
///
/// The bearer credential is never a source literal: it arrives either from a
/// page-injected config object (deserialized into this struct) or from the
/// `SAMVAD_API_KEY` environment variable at build time. Every field has a
/// default, so a partial override only has to name the fields it changes.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub api_key: String,
    pub transcription_url: String,
    pub chat_url: String,
    pub transcription_model: String,
    pub chat_model: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            transcription_url: TRANSCRIPTION_URL.to_string(),
            chat_url: CHAT_URL.to_string(),
            transcription_model: TRANSCRIPTION_MODEL.to_string(),
            chat_model: CHAT_MODEL.to_string(),
        }
    }
}

impl ApiConfig {
    /// Configuration from build-time environment values.
    pub fn from_build_env() -> Self {
        Self {
            api_key: option_env!("SAMVAD_API_KEY").unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// `Authorization` header value for both endpoints.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_groq() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.transcription_url, TRANSCRIPTION_URL);
        assert_eq!(cfg.chat_url, CHAT_URL);
        assert_eq!(cfg.transcription_model, "whisper-large-v3");
        assert_eq!(cfg.chat_model, "meta-llama/llama-4-scout-17b-16e-instruct");
        assert!(cfg.api_key.is_empty());
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let cfg: ApiConfig = serde_json::from_str(r#"{"api_key": "gsk_test"}"#).unwrap();
        assert_eq!(cfg.api_key, "gsk_test");
        assert_eq!(cfg.transcription_url, TRANSCRIPTION_URL);
        assert_eq!(cfg.chat_model, CHAT_MODEL);
    }

    #[test]
    fn bearer_header_value() {
        let cfg = ApiConfig {
            api_key: "gsk_test".into(),
            ..Default::default()
        };
        assert_eq!(cfg.bearer(), "Bearer gsk_test");
    }
}
