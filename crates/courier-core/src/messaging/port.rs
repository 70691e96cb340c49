use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageId, MessageRef},
    Result,
};

/// Outbound messaging port.
///
/// Telegram is the first implementation; the shape is narrow enough that
/// other platforms (or a test double) can sit behind it unchanged. Neither
/// operation retries internally beyond what the adapter does for platform
/// flood control; callers decide what a failure means.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, body: &str) -> Result<MessageRef>;

    /// Forward an existing message (file payloads keep their attachment).
    async fn forward_message(
        &self,
        to: ChatId,
        from: ChatId,
        message_id: MessageId,
    ) -> Result<()>;
}
