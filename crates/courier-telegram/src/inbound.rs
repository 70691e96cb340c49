//! Conversion from teloxide messages into the core inbound model.

use teloxide::types::Message;

use courier_core::{
    domain::{ChatId, MessageId, UserId},
    messaging::types::{FileKind, FileMeta, InboundMessage, Sender},
};

/// Build the cross-messenger inbound model for a Telegram message.
///
/// Returns `None` for messages without an identifiable sender (channel
/// posts, service messages) — the relay has nothing to do with those.
pub fn to_inbound(
    msg: &Message,
    bot_user_id: Option<teloxide::types::UserId>,
) -> Option<InboundMessage> {
    let user = msg.from()?;

    let sender = Sender {
        id: UserId(user.id.0 as i64),
        display_name: user.first_name.clone(),
        handle: user.username.clone(),
    };

    // "Reply to the bot" means the replied-to message was authored by our
    // own bot account; if get_me failed at startup, fall back to the
    // author's is_bot flag.
    let reply_to_bot = msg
        .reply_to_message()
        .and_then(|replied| replied.from())
        .map(|author| bot_user_id.map_or(author.is_bot, |id| author.id == id))
        .unwrap_or(false);

    Some(InboundMessage {
        sender,
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
        text: msg.text().map(str::to_owned),
        caption: msg.caption().map(str::to_owned),
        file: extract_file(msg),
        reply_to_bot,
        timestamp: msg.date,
    })
}

/// Map the five supported media classes onto [`FileMeta`]. For photos,
/// Telegram sends multiple sizes; the last entry is the highest resolution.
fn extract_file(msg: &Message) -> Option<FileMeta> {
    if let Some(doc) = msg.document() {
        return Some(FileMeta {
            kind: FileKind::Document,
            name: doc.file_name.clone(),
            size: Some(doc.file.size as u64),
            mime: doc.mime_type.as_ref().map(|m| m.essence_str().to_string()),
            duration: None,
        });
    }

    if let Some(photos) = msg.photo() {
        let best = photos.last()?;
        return Some(FileMeta {
            kind: FileKind::Photo,
            name: None,
            size: Some(best.file.size as u64),
            mime: None,
            duration: None,
        });
    }

    if let Some(video) = msg.video() {
        return Some(FileMeta {
            kind: FileKind::Video,
            name: None,
            size: Some(video.file.size as u64),
            mime: None,
            duration: Some(video.duration),
        });
    }

    if let Some(audio) = msg.audio() {
        return Some(FileMeta {
            kind: FileKind::Audio,
            name: None,
            size: Some(audio.file.size as u64),
            mime: None,
            duration: Some(audio.duration),
        });
    }

    if let Some(voice) = msg.voice() {
        return Some(FileMeta {
            kind: FileKind::Voice,
            name: None,
            size: Some(voice.file.size as u64),
            mime: None,
            duration: Some(voice.duration),
        });
    }

    None
}
