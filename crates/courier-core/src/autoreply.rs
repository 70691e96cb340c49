//! Canned replies for casual (non-command) text.

/// Ordered keyword → response table. Matching is containment, not equality,
/// and the first matching row wins, so more specific keywords must come
/// before the generic ones they contain.
pub const AUTO_REPLIES: &[(&str, &str)] = &[
    (
        "hello",
        "Hi there! 👋 How can I assist you today? Use /help to see available commands.",
    ),
    ("hi", "Hello! 😊 How can I help you?"),
    ("bye", "Goodbye! 👋 Have a great day!"),
    ("goodbye", "See you later! 😊 Take care!"),
    ("thanks", "You're welcome! 😊 Happy to help!"),
    (
        "thank you",
        "My pleasure! 🙏 Is there anything else I can help you with?",
    ),
    (
        "help",
        "I'm here to help! Use /help to see all available commands. 📋",
    ),
];

/// Sent when no keyword matches.
pub const DEFAULT_NUDGE: &str = "I'm here to help! 🤖\n\n\
To ask me a question, use: /ask <your question>\n\
For help with commands, use: /help";

/// First containment match against the lowercased text, with the keyword
/// that won (for logging).
pub fn lookup(text: &str) -> Option<(&'static str, &'static str)> {
    let lowered = text.to_lowercase();
    AUTO_REPLIES
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containment_matches_inside_longer_text() {
        let (keyword, _) = lookup("thanks a lot").unwrap();
        assert_eq!(keyword, "thanks");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let (keyword, _) = lookup("HELLO FRIEND").unwrap();
        assert_eq!(keyword, "hello");
    }

    #[test]
    fn first_table_row_wins() {
        // Contains "hello", "bye" and "goodbye"; the earliest row wins.
        let (keyword, _) = lookup("hello and goodbye").unwrap();
        assert_eq!(keyword, "hello");
    }

    #[test]
    fn no_match_returns_none() {
        assert!(lookup("what is the weather").is_none());
    }
}
