use leptos::prelude::*;
use web_sys::File;

use crate::message::Message;

/// Prefix that routes a typed message to the chat-completion endpoint.
/// Six characters, trailing space included.
pub const CHAT_PREFIX: &str = "/chat ";

/// What a submitted input buffer means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Empty or whitespace-only input; nothing happens.
    Empty,
    /// A plain message: appended to the transcript, no network call.
    Plain(String),
    /// A `/chat ` command: the full text still lands in the transcript, the
    /// remainder after the prefix goes to the chat endpoint as the prompt.
    Chat { text: String, prompt: String },
}

/// Interpret the raw input buffer. The buffer is trimmed first, so input
/// like `"/chat "` (nothing after the prefix) is a plain message.
pub fn parse_input(raw: &str) -> InputCommand {
    let text = raw.trim();
    if text.is_empty() {
        return InputCommand::Empty;
    }
    match text.strip_prefix(CHAT_PREFIX) {
        Some(prompt) => InputCommand::Chat {
            text: text.to_string(),
            prompt: prompt.to_string(),
        },
        None => InputCommand::Plain(text.to_string()),
    }
}

/// Single source of truth for the chat view: the ordered message list, the
/// pending input text, and the recording/busy flags. A signal bundle in the
/// usual style, handed to components through context.
///
/// `busy` is advisory display state only (it disables buttons and swaps
/// labels); it is not a lock, and overlapping in-flight requests are
/// allowed to complete in arrival order.
#[derive(Clone)]
pub struct ChatStore {
    // Messages hold JS file handles, which never leave the main thread, so
    // the list lives in a local-storage signal.
    messages: RwSignal<Vec<Message>, LocalStorage>,
    pub input_text: RwSignal<String>,
    pub recording: RwSignal<bool>,
    pub busy: RwSignal<bool>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self {
            messages: RwSignal::new_local(Vec::new()),
            input_text: RwSignal::new(String::new()),
            recording: RwSignal::new(false),
            busy: RwSignal::new(false),
        }
    }

    pub fn messages(&self) -> RwSignal<Vec<Message>, LocalStorage> {
        self.messages
    }

    /// Append a message, returning its index. The list is append-only, so
    /// the index stays valid for the rest of the page session.
    pub fn push(&self, message: Message) -> usize {
        let mut index = 0;
        self.messages.update(|list| {
            list.push(message);
            index = list.len() - 1;
        });
        index
    }

    /// Attach a transcript to the audio message at `index`. A non-audio
    /// entry is left unchanged; callers are expected to pass indices they
    /// captured at render time.
    pub fn set_transcript(&self, index: usize, text: String) {
        self.messages.update(|list| match list.get_mut(index) {
            Some(Message::UserAudio { transcript, .. }) => *transcript = Some(text),
            _ => log::warn!("dropping transcript for non-audio message at index {index}"),
        });
    }

    /// The resubmittable file handle behind the message at `index`, if that
    /// message carries audio.
    pub fn source_file(&self, index: usize) -> Option<File> {
        self.messages.with_untracked(|list| match list.get(index) {
            Some(Message::UserAudio { clip, .. }) => Some(clip.file.clone()),
            _ => None,
        })
    }
}

impl Default for ChatStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_empty() {
        assert_eq!(parse_input(""), InputCommand::Empty);
        assert_eq!(parse_input("   \t "), InputCommand::Empty);
    }

    #[test]
    fn plain_input_is_trimmed() {
        assert_eq!(parse_input("  hello  "), InputCommand::Plain("hello".into()));
    }

    #[test]
    fn chat_prefix_splits_off_the_prompt() {
        assert_eq!(
            parse_input("/chat summarize this"),
            InputCommand::Chat {
                text: "/chat summarize this".into(),
                prompt: "summarize this".into(),
            }
        );
    }

    #[test]
    fn prompt_is_the_exact_remainder() {
        // A second space after the prefix belongs to the prompt.
        assert_eq!(
            parse_input("/chat  spaced"),
            InputCommand::Chat {
                text: "/chat  spaced".into(),
                prompt: " spaced".into(),
            }
        );
    }

    #[test]
    fn bare_chat_token_is_a_plain_message() {
        // Trimming removes the trailing space, so neither of these carries
        // the six-character prefix.
        assert_eq!(parse_input("/chat"), InputCommand::Plain("/chat".into()));
        assert_eq!(parse_input("/chat "), InputCommand::Plain("/chat".into()));
    }

    #[test]
    fn push_appends_in_arrival_order() {
        let store = ChatStore::new();
        assert_eq!(store.push(Message::UserText { text: "one".into() }), 0);
        assert_eq!(store.push(Message::BotReply { text: "two".into() }), 1);
        assert_eq!(
            store.push(Message::SystemTranscript { text: "three".into() }),
            2
        );

        store.messages().with_untracked(|list| {
            assert_eq!(list.len(), 3);
            assert_eq!(list[0].text(), Some("one"));
            assert_eq!(list[1].text(), Some("two"));
            assert_eq!(list[2].text(), Some("three"));
        });
    }

    #[test]
    fn transcript_on_non_audio_message_is_dropped() {
        let store = ChatStore::new();
        let index = store.push(Message::UserText { text: "hi".into() });
        store.set_transcript(index, "should not attach".into());

        store.messages().with_untracked(|list| {
            assert_eq!(list[index].text(), Some("hi"));
            assert!(list[index].transcript().is_none());
        });
    }

    #[test]
    fn source_file_is_none_for_text_messages() {
        let store = ChatStore::new();
        let index = store.push(Message::UserText { text: "hi".into() });
        assert!(store.source_file(index).is_none());
        assert!(store.source_file(99).is_none());
    }

    #[test]
    fn flags_and_input_buffer_are_plain_setters() {
        let store = ChatStore::new();
        store.input_text.set("draft".into());
        store.recording.set(true);
        store.busy.set(true);
        assert_eq!(store.input_text.get_untracked(), "draft");
        assert!(store.recording.get_untracked());
        assert!(store.busy.get_untracked());
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::message::AudioClip;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn audio_message() -> Message {
        let parts = js_sys::Array::of1(&"fake-bytes".into());
        let file = File::new_with_str_sequence(&parts, "recorded_audio").unwrap();
        Message::UserAudio {
            clip: AudioClip {
                object_url: "blob:test".into(),
                file,
            },
            transcript: None,
        }
    }

    #[wasm_bindgen_test]
    fn transcript_attaches_to_audio_message() {
        let store = ChatStore::new();
        let index = store.push(audio_message());
        store.set_transcript(index, "hello".into());
        store.messages().with_untracked(|list| {
            assert_eq!(list[index].transcript(), Some("hello"));
        });
    }

    #[wasm_bindgen_test]
    fn source_file_returns_the_audio_handle() {
        let store = ChatStore::new();
        let index = store.push(audio_message());
        let file = store.source_file(index).unwrap();
        assert_eq!(file.name(), "recorded_audio");
    }
}
