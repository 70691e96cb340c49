//! User-facing and operator-facing message texts.

use crate::logs::{FeedbackRecord, MessageRecord};

const SEPARATOR: &str = "==============================";

pub(super) const UNAUTHORIZED: &str = "❌ You are not authorized to use this command.";

pub(super) const APOLOGY: &str = "Sorry, something went wrong. Please try again.";

pub(super) const HELP_TEXT: &str = "📋 Available Commands:\n\n\
🔹 /start - Start the bot\n\
🔹 /help - Show this help message\n\
🔹 /ask <your question> - Ask me anything or send files\n\
🔹 /feedback <1-5> <comment> - Leave feedback\n\n\
👨‍💼 Admin Only Commands:\n\
🔹 /view_messages - View all user messages\n\
🔹 /reply <user_id> <message> - Reply to user by ID\n\
🔹 /reply @<username> <message> - Reply to user by username\n\
🔹 /broadcast <message> - Send message to all users\n\
🔹 /view_feedback - View all feedback\n\
🔹 /stats - View bot statistics";

pub(super) const ASK_USAGE: &str = "Please provide your question after /ask\n\
Examples:\n\
• /ask What is the weather today?\n\
• Send a file with /ask to share documents";

pub(super) const FEEDBACK_USAGE: &str = "Please provide feedback in this format:\n\
/feedback <1-5> <your comment>\n\n\
Example: /feedback 5 Great bot, very helpful!";

pub(super) const RATING_RANGE: &str = "⚠️ Please provide a rating between 1 and 5.";

pub(super) const REPLY_USAGE: &str = "Usage:\n\
/reply <user_id> <your reply>\n\
/reply @<username> <your reply>\n\n\
Examples:\n\
/reply 123456789 Thank you for your question!\n\
/reply @john Hello John!\n\n\
💡 Tip: You can also reply with a file by using /reply command as caption!";

pub(super) const REPLY_FILE_USAGE: &str =
    "❌ Usage: Send file with caption '/reply <user_id> <message>'\n\n\
Example: '/reply 123456789 Here's the document you requested!'";

pub(super) const BROADCAST_USAGE: &str = "Usage: /broadcast <your message>\n\n\
Example:\n\
/broadcast Hello everyone! This is an important update.\n\n\
💡 Tip: You can also broadcast a file by using /broadcast as caption!";

pub(super) const BROADCAST_FILE_USAGE: &str =
    "❌ Usage: Send file with caption '/broadcast <message>'\n\n\
Example: '/broadcast Here's an important document for everyone!'";

pub(super) const NO_MESSAGES: &str = "📭 No messages logged yet.";

pub(super) const NO_FEEDBACK: &str = "📭 No feedback received yet.";

pub(super) const NO_USERS: &str = "❌ No users found to broadcast to.";

pub(super) fn welcome(name: &str) -> String {
    format!(
        "Hello {name}! 👋\n\n\
I'm your personal assistant bot. How can I help you today?\n\
Use /help to see all available commands."
    )
}

pub(super) fn target_not_found(specifier: &str) -> String {
    format!("❌ Could not resolve target {specifier}. Use a numeric user ID or @username.")
}

pub(super) fn ask_ack(name: &str, is_file: bool) -> String {
    if is_file {
        format!(
            "Thank you, {name}! 📎\n\n\
Your file and message have been logged and will be reviewed shortly. \
You'll receive a personal response soon!"
        )
    } else {
        format!(
            "Thank you, {name}! 📝\n\n\
Your question has been logged and will be reviewed shortly. \
You'll receive a personal response soon!"
        )
    }
}

pub(super) fn ask_notification(record: &MessageRecord) -> String {
    let from = format!(
        "@{} ({})",
        record.handle.as_deref().unwrap_or("No Username"),
        record.display_name
    );
    match &record.file {
        Some(file) => {
            let file_line = match &file.name {
                Some(name) => format!("\n📄 File: {name}"),
                None => format!("\n📄 File: {}", file.kind.title()),
            };
            format!(
                "🔔 New File Message Alert!\n\n\
👤 From: {from}\n\
💬 Caption: {}{file_line}\n\
🆔 User ID: {}",
                record.body, record.user_id.0
            )
        }
        None => format!(
            "🔔 New Message Alert!\n\n\
👤 From: {from}\n\
💬 Message: {}\n\
🆔 User ID: {}",
            record.body, record.user_id.0
        ),
    }
}

pub(super) fn stars(rating: u8) -> String {
    "⭐".repeat(rating as usize)
}

pub(super) fn feedback_ack(rating: u8, comment: &str) -> String {
    format!(
        "Thank you for your feedback! 🙏\n\n\
Rating: {} ({rating}/5)\n\
Comment: {comment}",
        stars(rating)
    )
}

pub(super) fn feedback_notification(name: &str, rating: u8, comment: &str) -> String {
    format!(
        "📊 New Feedback Received!\n\n\
👤 From: {name}\n\
⭐ Rating: {rating}/5\n\
💬 Comment: {comment}"
    )
}

pub(super) fn message_record(index: usize, record: &MessageRecord) -> String {
    let mut out = format!(
        "📨 Message #{index}\n\
👤 From: @{} ({})\n\
🆔 User ID: {}\n\
💬 Message: {}\n",
        record.handle.as_deref().unwrap_or("No Username"),
        record.display_name,
        record.user_id.0,
        record.body,
    );

    if let Some(file) = &record.file {
        out.push_str(&format!("📎 File Type: {}\n", file.kind.title()));
        if let Some(name) = &file.name {
            out.push_str(&format!("📄 File Name: {name}\n"));
        }
        if let Some(size) = file.size {
            out.push_str(&format!("📏 File Size: {size} bytes\n"));
        }
    }

    out.push_str(&format!(
        "⏰ Time: {}\n{SEPARATOR}",
        record.timestamp.to_rfc3339()
    ));
    out
}

pub(super) fn feedback_summary(count: usize, mean: f64) -> String {
    format!(
        "📊 Feedback Summary\n\
Total feedback: {count}\n\
Average rating: {mean:.1}/5\n\
{SEPARATOR}"
    )
}

pub(super) fn feedback_record(index: usize, record: &FeedbackRecord) -> String {
    format!(
        "📝 Feedback #{index}\n\
👤 From: {}\n\
⭐ Rating: {} ({}/5)\n\
💬 Comment: {}\n\
⏰ Time: {}\n\
{SEPARATOR}",
        record.display_name,
        stars(record.rating),
        record.rating,
        record.comment,
        record.timestamp.to_rfc3339(),
    )
}

pub(super) fn stats_report(
    messages: usize,
    feedback: usize,
    users: usize,
    mean: Option<f64>,
    active: usize,
) -> String {
    let mut out = format!(
        "📊 Bot Statistics\n\n\
📨 Total Messages: {messages}\n\
📝 Total Feedback: {feedback}\n\
👥 Registered Users: {users}\n"
    );
    if let Some(mean) = mean {
        out.push_str(&format!("⭐ Average Rating: {mean:.1}/5\n"));
    }
    out.push_str(&format!("💬 Active Users: {active}"));
    out
}

pub(super) fn admin_reply(body: &str) -> String {
    format!("📧 Reply from Admin:\n\n{body}")
}

pub(super) fn reply_sent(label: &str, with_file: bool) -> String {
    if with_file {
        format!("✅ Reply with file sent successfully to {label}")
    } else {
        format!("✅ Reply sent successfully to {label}")
    }
}

pub(super) fn reply_failed(label: &str, err: &crate::Error) -> String {
    format!("❌ Failed to send reply to {label}: {err}")
}

pub(super) fn broadcast_message(body: &str) -> String {
    format!("📢 Broadcast Message:\n\n{body}")
}

pub(super) fn broadcast_summary(with_file: bool, sent: usize, failed: usize, total: usize) -> String {
    let header = if with_file {
        "📊 Broadcast with File Summary:"
    } else {
        "📊 Broadcast Summary:"
    };
    format!(
        "{header}\n\n\
✅ Successfully sent: {sent}\n\
❌ Failed: {failed}\n\
👥 Total users: {total}"
    )
}

pub(super) fn file_reply_ack(kind_name: &str) -> String {
    format!(
        "Thank you for sharing the {kind_name}! I've received it and will review it shortly."
    )
}

pub(super) fn file_reply_notification(record: &MessageRecord, caption: Option<&str>) -> String {
    let kind_name = record
        .file
        .as_ref()
        .map(|f| f.kind.as_str())
        .unwrap_or("file");
    format!(
        "📎 New {kind_name} reply from {} (@{}):\n\
👤 User ID: {}\n\
📝 Caption: {}\n\
📅 Time: {}",
        record.display_name,
        record.handle.as_deref().unwrap_or("no_username"),
        record.user_id.0,
        caption.unwrap_or("No caption"),
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserId;
    use crate::messaging::types::{FileKind, FileMeta};
    use chrono::{TimeZone, Utc};

    #[test]
    fn stars_repeat_the_rating() {
        assert_eq!(stars(1), "⭐");
        assert_eq!(stars(5), "⭐⭐⭐⭐⭐");
    }

    #[test]
    fn message_record_includes_file_details_when_present() {
        let record = MessageRecord {
            user_id: UserId(12),
            display_name: "Ann".to_string(),
            handle: Some("ann".to_string()),
            body: "see attachment".to_string(),
            file: Some(FileMeta {
                kind: FileKind::Document,
                name: Some("notes.txt".to_string()),
                size: Some(512),
                mime: Some("text/plain".to_string()),
                duration: None,
            }),
            timestamp: Utc.timestamp_opt(0, 0).unwrap(),
            is_reply_to_bot: false,
        };

        let text = message_record(3, &record);
        assert!(text.contains("📨 Message #3"));
        assert!(text.contains("@ann (Ann)"));
        assert!(text.contains("📎 File Type: Document"));
        assert!(text.contains("📄 File Name: notes.txt"));
        assert!(text.contains("📏 File Size: 512 bytes"));
    }

    #[test]
    fn stats_report_omits_rating_line_without_feedback() {
        let without = stats_report(1, 0, 2, None, 1);
        assert!(!without.contains("Average Rating"));

        let with = stats_report(1, 2, 2, Some(4.25), 3);
        assert!(with.contains("⭐ Average Rating: 4.2/5"));
        assert!(with.contains("💬 Active Users: 3"));
    }
}
