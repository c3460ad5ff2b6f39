use web_sys::File;

/// Which side of the conversation an entry renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    System,
    Bot,
}

/// A locally-held audio clip: the object URL drives the `<audio>` player,
/// the file handle is what gets resubmitted for transcription.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub object_url: String,
    pub file: File,
}

/// One entry in the chat transcript. Each variant carries exactly the fields
/// it needs, so the invariants hold by construction: every entry has text or
/// a clip, and a transcript can only exist alongside its clip.
#[derive(Debug, Clone)]
pub enum Message {
    /// Typed by the user (including `/chat ...` commands, which still land
    /// in the transcript verbatim).
    UserText { text: String },
    /// Recorded or uploaded by the user.
    UserAudio {
        clip: AudioClip,
        transcript: Option<String>,
    },
    /// Transcript echo appended after a successful transcription.
    SystemTranscript { text: String },
    /// Assistant reply from the chat-completion endpoint.
    BotReply { text: String },
}

impl Message {
    pub fn origin(&self) -> Origin {
        match self {
            Message::UserText { .. } | Message::UserAudio { .. } => Origin::User,
            Message::SystemTranscript { .. } => Origin::System,
            Message::BotReply { .. } => Origin::Bot,
        }
    }

    /// Display text, if this entry has any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Message::UserText { text }
            | Message::SystemTranscript { text }
            | Message::BotReply { text } => Some(text),
            Message::UserAudio { .. } => None,
        }
    }

    pub fn audio(&self) -> Option<&AudioClip> {
        match self {
            Message::UserAudio { clip, .. } => Some(clip),
            _ => None,
        }
    }

    pub fn transcript(&self) -> Option<&str> {
        match self {
            Message::UserAudio { transcript, .. } => transcript.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_follows_variant() {
        assert_eq!(Message::UserText { text: "hi".into() }.origin(), Origin::User);
        assert_eq!(
            Message::SystemTranscript { text: "hi".into() }.origin(),
            Origin::System
        );
        assert_eq!(Message::BotReply { text: "hi".into() }.origin(), Origin::Bot);
    }

    #[test]
    fn text_accessor_covers_text_variants() {
        assert_eq!(Message::UserText { text: "a".into() }.text(), Some("a"));
        assert_eq!(Message::BotReply { text: "b".into() }.text(), Some("b"));
        assert_eq!(
            Message::SystemTranscript { text: "c".into() }.text(),
            Some("c")
        );
    }

    #[test]
    fn text_variants_have_no_audio_or_transcript() {
        let msg = Message::UserText { text: "hi".into() };
        assert!(msg.audio().is_none());
        assert!(msg.transcript().is_none());
    }
}
