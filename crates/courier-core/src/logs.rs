use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::{domain::UserId, messaging::types::FileMeta};

/// One logged inbound user message (text or file), kept for operator
/// review. Append-only, never mutated.
#[derive(Clone, Debug)]
pub struct MessageRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub handle: Option<String>,
    pub body: String,
    pub file: Option<FileMeta>,
    pub timestamp: DateTime<Utc>,
    pub is_reply_to_bot: bool,
}

/// One logged feedback entry. Rating is validated to 1..=5 before it gets
/// here.
#[derive(Clone, Debug)]
pub struct FeedbackRecord {
    pub user_id: UserId,
    pub display_name: String,
    pub rating: u8,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only message log; insertion order is display order.
///
/// No dedup and no size cap — unbounded growth over the process lifetime is
/// an accepted limitation, not something to silently fix here.
#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<MessageRecord>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: MessageRecord) {
        self.entries.push(record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MessageRecord> {
        self.entries.iter()
    }
}

/// Append-only feedback log; insertion order is display order.
#[derive(Debug, Default)]
pub struct FeedbackLog {
    entries: Vec<FeedbackRecord>,
}

impl FeedbackLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: FeedbackRecord) {
        self.entries.push(record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeedbackRecord> {
        self.entries.iter()
    }

    /// Mean rating across all entries, `None` when empty.
    pub fn mean_rating(&self) -> Option<f64> {
        if self.entries.is_empty() {
            return None;
        }
        let total: u32 = self.entries.iter().map(|fb| fb.rating as u32).sum();
        Some(total as f64 / self.entries.len() as f64)
    }
}

/// Distinct user ids appearing in either log (set union — not the registry
/// size).
pub fn distinct_senders(messages: &MessageLog, feedback: &FeedbackLog) -> usize {
    let mut seen: HashSet<i64> = HashSet::new();
    for record in messages.iter() {
        seen.insert(record.user_id.0);
    }
    for record in feedback.iter() {
        seen.insert(record.user_id.0);
    }
    seen.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn feedback(user: i64, rating: u8) -> FeedbackRecord {
        FeedbackRecord {
            user_id: UserId(user),
            display_name: "u".to_string(),
            rating,
            comment: "c".to_string(),
            timestamp: ts(0),
        }
    }

    fn message(user: i64) -> MessageRecord {
        MessageRecord {
            user_id: UserId(user),
            display_name: "u".to_string(),
            handle: None,
            body: "hi".to_string(),
            file: None,
            timestamp: ts(0),
            is_reply_to_bot: false,
        }
    }

    #[test]
    fn mean_rating_none_when_empty() {
        assert_eq!(FeedbackLog::new().mean_rating(), None);
    }

    #[test]
    fn mean_rating_averages_all_entries() {
        let mut log = FeedbackLog::new();
        log.append(feedback(1, 5));
        log.append(feedback(2, 4));
        log.append(feedback(3, 4));

        let mean = log.mean_rating().unwrap();
        assert!((mean - 13.0 / 3.0).abs() < 1e-9);
        // Rendered to one decimal this reads 4.3.
        assert_eq!(format!("{mean:.1}"), "4.3");
    }

    #[test]
    fn distinct_senders_is_a_set_union_across_logs() {
        let mut messages = MessageLog::new();
        let mut fb = FeedbackLog::new();
        messages.append(message(1));
        messages.append(message(1));
        messages.append(message(2));
        fb.append(feedback(2, 5));
        fb.append(feedback(3, 1));

        assert_eq!(distinct_senders(&messages, &fb), 3);
    }
}
