use chrono::{DateTime, Utc};

use crate::domain::{ChatId, MessageId, UserId};

/// Who sent an inbound message.
#[derive(Clone, Debug)]
pub struct Sender {
    pub id: UserId,
    /// First name as reported by the platform.
    pub display_name: String,
    /// Public handle (mutable, may be absent).
    pub handle: Option<String>,
}

/// The kind of file attached to a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Document,
    Photo,
    Video,
    Audio,
    Voice,
}

impl FileKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Document => "document",
            FileKind::Photo => "photo",
            FileKind::Video => "video",
            FileKind::Audio => "audio",
            FileKind::Voice => "voice",
        }
    }

    /// `Document` → `"Document"`, for admin-facing renderings.
    pub fn title(self) -> &'static str {
        match self {
            FileKind::Document => "Document",
            FileKind::Photo => "Photo",
            FileKind::Video => "Video",
            FileKind::Audio => "Audio",
            FileKind::Voice => "Voice",
        }
    }
}

/// Metadata of an attached file. Fields are whatever the platform reports;
/// only `kind` is always present.
#[derive(Clone, Debug)]
pub struct FileMeta {
    pub kind: FileKind,
    pub name: Option<String>,
    pub size: Option<u64>,
    pub mime: Option<String>,
    pub duration: Option<u32>,
}

/// Cross-messenger inbound message, as delivered to the command router.
///
/// Platform-specific fields stay in the adapter; this is the complete
/// contract the relay service sees.
#[derive(Clone, Debug)]
pub struct InboundMessage {
    pub sender: Sender,
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub file: Option<FileMeta>,
    /// True when this message replies to one of the bot's own messages.
    pub reply_to_bot: bool,
    pub timestamp: DateTime<Utc>,
}
