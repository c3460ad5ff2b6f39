//! Outbound request orchestration: transcription and chat completion.
//!
//! Every failure is contained at the call site and surfaced as one blocking
//! alert; nothing else in the UI is touched, so the rest of the page stays
//! usable. No retries, no timeouts, no cancellation.

use leptos::prelude::{GetUntracked, Set};
use samvad_groq::{chat, transcription, ApiConfig};

use crate::message::Message;
use crate::state::{parse_input, ChatStore, InputCommand};

/// Blocking user-facing alert — the only error surface this UI has.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Submit the audio behind the message at `index` for transcription.
///
/// Success patches that message with the transcript and echoes the same text
/// as a system message. A missing file or a failed request produces exactly
/// one alert and no state change.
pub async fn transcribe(store: ChatStore, cfg: ApiConfig, index: usize) {
    let Some(file) = store.source_file(index) else {
        alert("No audio file to transcribe");
        return;
    };

    store.busy.set(true);
    match transcription::transcribe(&cfg, &file).await {
        Ok(text) => {
            store.set_transcript(index, text.clone());
            store.push(Message::SystemTranscript { text });
        }
        Err(err) => {
            log::error!("transcription request failed: {err}");
            alert(&format!("Transcription failed: {err}"));
        }
    }
    store.busy.set(false);
}

/// Handle a submitted input buffer.
///
/// The user's text lands in the transcript and the buffer clears before any
/// network round-trip; only `/chat `-prefixed input goes to the wire, and a
/// failed completion appends nothing.
pub async fn send_text(store: ChatStore, cfg: ApiConfig) {
    match parse_input(&store.input_text.get_untracked()) {
        InputCommand::Empty => {}
        InputCommand::Plain(text) => {
            store.push(Message::UserText { text });
            store.input_text.set(String::new());
        }
        InputCommand::Chat { text, prompt } => {
            store.push(Message::UserText { text });
            store.input_text.set(String::new());

            store.busy.set(true);
            match chat::complete(&cfg, &prompt).await {
                Ok(reply) => {
                    store.push(Message::BotReply { text: reply });
                }
                Err(err) => {
                    log::error!("chat completion failed: {err}");
                    alert(&format!("AI chat failed: {err}"));
                }
            }
            store.busy.set(false);
        }
    }
}
