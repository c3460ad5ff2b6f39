//! Chat-completion calls against the chat endpoint.

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::fetch;

/// Reply used when the response carries no assistant content.
pub const FALLBACK_REPLY: &str = "No response from AI.";

/// Modeled leniently: any missing level of `choices[0].message.content`
/// yields the fallback reply rather than a parse error.
#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<AssistantMessage>,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// JSON body for a single-turn user prompt.
pub fn request_body(model: &str, prompt: &str) -> String {
    serde_json::json!({
        "model": model,
        "messages": [{ "role": "user", "content": prompt }],
    })
    .to_string()
}

/// Extract the reply from a 2xx response body.
///
/// An absent or empty `choices[0].message.content` falls back to
/// [`FALLBACK_REPLY`]; a body that is not the expected JSON shape is an
/// error.
pub fn reply_from_json(body: &str) -> Result<String, ApiError> {
    let resp: ChatResponse =
        serde_json::from_str(body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
    Ok(resp
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
}

/// Send `prompt` as a single user message and return the assistant's reply.
pub async fn complete(cfg: &ApiConfig, prompt: &str) -> Result<String, ApiError> {
    let body = request_body(&cfg.chat_model, prompt);
    let text = fetch::post(
        &cfg.chat_url,
        &cfg.bearer(),
        &JsValue::from_str(&body),
        Some("application/json"),
    )
    .await?;
    reply_from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let body = request_body("test-model", "summarize this");
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value["model"], "test-model");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "summarize this");
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn parses_reply_content() {
        let body = r#"{"choices": [{"message": {"content": "A summary."}}]}"#;
        assert_eq!(reply_from_json(body).unwrap(), "A summary.");
    }

    #[test]
    fn missing_choices_falls_back() {
        assert_eq!(reply_from_json("{}").unwrap(), FALLBACK_REPLY);
        assert_eq!(reply_from_json(r#"{"choices": []}"#).unwrap(), FALLBACK_REPLY);
    }

    #[test]
    fn null_and_empty_content_fall_back() {
        let null = r#"{"choices": [{"message": {"content": null}}]}"#;
        assert_eq!(reply_from_json(null).unwrap(), FALLBACK_REPLY);
        let empty = r#"{"choices": [{"message": {"content": ""}}]}"#;
        assert_eq!(reply_from_json(empty).unwrap(), FALLBACK_REPLY);
    }

    #[test]
    fn missing_message_falls_back() {
        let body = r#"{"choices": [{"index": 0}]}"#;
        assert_eq!(reply_from_json(body).unwrap(), FALLBACK_REPLY);
    }

    #[test]
    fn non_json_body_is_invalid() {
        assert!(matches!(
            reply_from_json("upstream blew up"),
            Err(ApiError::InvalidResponse(_))
        ));
    }
}
