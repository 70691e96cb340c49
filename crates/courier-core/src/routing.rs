use crate::messaging::types::InboundMessage;

/// Which handler an inbound message is dispatched to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Start,
    Help,
    Ask,
    Feedback,
    ViewMessages,
    Reply,
    Broadcast,
    ViewFeedback,
    Stats,
    AskWithFile,
    ReplyWithFile,
    BroadcastWithFile,
    FileReply,
    AutoReply,
}

/// Classify an inbound message. Precedence, first match wins:
///
/// 1. text starting with a known command keyword → that command;
/// 2. file whose caption starts with `/ask`, `/reply` or `/broadcast` →
///    the file-variant handler;
/// 3. file that replies to a bot message with no recognized command
///    caption → file-reply handler;
/// 4. plain non-command text → auto-reply.
///
/// Everything else (unknown slash-commands included) is silently ignored.
pub fn classify(msg: &InboundMessage) -> Option<Route> {
    if let Some(text) = msg.text.as_deref() {
        let trimmed = text.trim_start();
        if trimmed.starts_with('/') {
            let (cmd, _) = parse_command(trimmed);
            return match cmd.as_str() {
                "start" => Some(Route::Start),
                "help" => Some(Route::Help),
                "ask" => Some(Route::Ask),
                "feedback" => Some(Route::Feedback),
                "view_messages" => Some(Route::ViewMessages),
                "reply" => Some(Route::Reply),
                "broadcast" => Some(Route::Broadcast),
                "view_feedback" => Some(Route::ViewFeedback),
                "stats" => Some(Route::Stats),
                _ => None,
            };
        }
        if trimmed.trim_end().is_empty() {
            return None;
        }
        return Some(Route::AutoReply);
    }

    if msg.file.is_some() {
        if let Some(caption) = msg.caption.as_deref() {
            let caption = caption.trim_start();
            if caption.starts_with("/ask") {
                return Some(Route::AskWithFile);
            }
            if caption.starts_with("/reply") {
                return Some(Route::ReplyWithFile);
            }
            if caption.starts_with("/broadcast") {
                return Some(Route::BroadcastWithFile);
            }
        }
        if msg.reply_to_bot {
            return Some(Route::FileReply);
        }
    }

    None
}

/// Split a command message into `(keyword, rest)`.
///
/// Telegram may send `/cmd@botname arg1 ...`; the keyword is lowercased and
/// stripped of both the slash and the bot mention.
pub fn parse_command(text: &str) -> (String, String) {
    let mut parts = text.trim().splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("").trim();
    let rest = parts.next().unwrap_or("").trim().to_string();

    let cmd = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    (cmd, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatId, MessageId, UserId};
    use crate::messaging::types::{FileKind, FileMeta, Sender};
    use chrono::Utc;

    fn base() -> InboundMessage {
        InboundMessage {
            sender: Sender {
                id: UserId(1),
                display_name: "Ann".to_string(),
                handle: None,
            },
            chat_id: ChatId(1),
            message_id: MessageId(1),
            text: None,
            caption: None,
            file: None,
            reply_to_bot: false,
            timestamp: Utc::now(),
        }
    }

    fn with_text(text: &str) -> InboundMessage {
        InboundMessage {
            text: Some(text.to_string()),
            ..base()
        }
    }

    fn with_file(caption: Option<&str>, reply_to_bot: bool) -> InboundMessage {
        InboundMessage {
            caption: caption.map(str::to_owned),
            file: Some(FileMeta {
                kind: FileKind::Document,
                name: Some("a.pdf".to_string()),
                size: Some(10),
                mime: None,
                duration: None,
            }),
            reply_to_bot,
            ..base()
        }
    }

    #[test]
    fn command_keywords_route_to_their_handlers() {
        assert_eq!(classify(&with_text("/start")), Some(Route::Start));
        assert_eq!(classify(&with_text("/help")), Some(Route::Help));
        assert_eq!(classify(&with_text("/ask hi")), Some(Route::Ask));
        assert_eq!(classify(&with_text("/feedback 5 ok")), Some(Route::Feedback));
        assert_eq!(classify(&with_text("/view_messages")), Some(Route::ViewMessages));
        assert_eq!(classify(&with_text("/reply 1 hi")), Some(Route::Reply));
        assert_eq!(classify(&with_text("/broadcast hi")), Some(Route::Broadcast));
        assert_eq!(classify(&with_text("/view_feedback")), Some(Route::ViewFeedback));
        assert_eq!(classify(&with_text("/stats")), Some(Route::Stats));
    }

    #[test]
    fn bot_mention_suffix_is_stripped() {
        assert_eq!(classify(&with_text("/start@courier_bot")), Some(Route::Start));
    }

    #[test]
    fn unknown_commands_are_ignored_not_auto_replied() {
        assert_eq!(classify(&with_text("/frobnicate now")), None);
    }

    #[test]
    fn plain_text_goes_to_auto_reply() {
        assert_eq!(classify(&with_text("thanks a lot")), Some(Route::AutoReply));
        assert_eq!(classify(&with_text("   ")), None);
    }

    #[test]
    fn command_captions_beat_file_reply() {
        assert_eq!(
            classify(&with_file(Some("/ask what is this"), true)),
            Some(Route::AskWithFile)
        );
        assert_eq!(
            classify(&with_file(Some("/reply 1 here"), true)),
            Some(Route::ReplyWithFile)
        );
        assert_eq!(
            classify(&with_file(Some("/broadcast news"), false)),
            Some(Route::BroadcastWithFile)
        );
    }

    #[test]
    fn uncaptioned_file_reply_routes_to_file_reply() {
        assert_eq!(classify(&with_file(None, true)), Some(Route::FileReply));
        assert_eq!(classify(&with_file(Some("just a caption"), true)), Some(Route::FileReply));
    }

    #[test]
    fn stray_file_without_reply_is_ignored() {
        assert_eq!(classify(&with_file(None, false)), None);
        assert_eq!(classify(&with_file(Some("hello"), false)), None);
        assert_eq!(classify(&base()), None);
    }

    #[test]
    fn parse_command_splits_keyword_and_rest() {
        assert_eq!(
            parse_command("/reply @ann hello there"),
            ("reply".to_string(), "@ann hello there".to_string())
        );
        assert_eq!(
            parse_command("/Feedback@bot 5 nice"),
            ("feedback".to_string(), "5 nice".to_string())
        );
        assert_eq!(parse_command("/ask"), ("ask".to_string(), String::new()));
    }
}
