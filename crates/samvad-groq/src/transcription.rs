//! Speech-to-text calls against the transcription endpoint.

use serde::Deserialize;
use wasm_bindgen::JsValue;
use web_sys::FormData;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::fetch;

/// Transcription payload. The endpoint returns more metadata in some modes;
/// only the text field is consumed here.
#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

/// Extract the transcript text from a 2xx response body.
pub fn text_from_json(body: &str) -> Result<String, ApiError> {
    serde_json::from_str::<TranscriptionResponse>(body)
        .map(|resp| resp.text)
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

/// Submit an audio file for transcription and return the transcript text.
///
/// The request is a multipart form with two fields, `file` (the audio blob,
/// under its own file name) and `model`.
pub async fn transcribe(cfg: &ApiConfig, file: &web_sys::File) -> Result<String, ApiError> {
    let form = FormData::new().map_err(js_err)?;
    form.append_with_blob("file", file).map_err(js_err)?;
    form.append_with_str("model", &cfg.transcription_model)
        .map_err(js_err)?;

    let body = fetch::post(&cfg.transcription_url, &cfg.bearer(), form.as_ref(), None).await?;
    text_from_json(&body)
}

fn js_err(e: JsValue) -> ApiError {
    ApiError::Network(format!("{e:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transcript_text() {
        let text = text_from_json(r#"{"text": "hello world"}"#).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let body = r#"{"text": "hi", "x_groq": {"id": "req_1"}}"#;
        assert_eq!(text_from_json(body).unwrap(), "hi");
    }

    #[test]
    fn missing_text_is_invalid() {
        let err = text_from_json(r#"{"language": "en"}"#).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn garbage_body_is_invalid() {
        assert!(text_from_json("<html>").is_err());
    }
}
