//! Handlers any user can trigger: start, help, ask, feedback, file replies
//! and the keyword auto-reply.

use crate::{
    autoreply,
    errors::Error,
    logs::{FeedbackRecord, MessageRecord},
    messaging::types::{FileMeta, InboundMessage},
    routing::parse_command,
    Result,
};

use super::{render, RelayService};

impl RelayService {
    pub(super) async fn start(&self, msg: &InboundMessage) -> Result<()> {
        self.register_sender(msg).await;
        self.messenger
            .send_text(msg.chat_id, &render::welcome(&msg.sender.display_name))
            .await?;
        tracing::info!(user_id = msg.sender.id.0, "user started the bot");
        Ok(())
    }

    pub(super) async fn help(&self, msg: &InboundMessage) -> Result<()> {
        self.messenger.send_text(msg.chat_id, render::HELP_TEXT).await?;
        tracing::info!(user_id = msg.sender.id.0, "help requested");
        Ok(())
    }

    /// `/ask <question>` as text, or any file captioned `/ask ...`.
    pub(super) async fn ask(&self, msg: &InboundMessage) -> Result<()> {
        let (body, file) = ask_payload(msg)?;

        let record = MessageRecord {
            user_id: msg.sender.id,
            display_name: msg.sender.display_name.clone(),
            handle: msg.sender.handle.clone(),
            body,
            file,
            timestamp: msg.timestamp,
            is_reply_to_bot: false,
        };
        let is_file = record.file.is_some();

        {
            let mut state = self.state.lock().await;
            state.registry.upsert(
                msg.sender.id,
                &msg.sender.display_name,
                msg.sender.handle.as_deref(),
                msg.timestamp,
            );
            state.messages.append(record.clone());
            self.sync_liveness(&state);
        }

        self.messenger
            .send_text(
                msg.chat_id,
                &render::ask_ack(&msg.sender.display_name, is_file),
            )
            .await?;

        // The sender's ack already succeeded; notify/forward failures stay
        // between us and the log.
        if let Some(owner_chat) = self.notify_target(&msg.sender) {
            match self
                .messenger
                .send_text(owner_chat, &render::ask_notification(&record))
                .await
            {
                Err(err) => {
                    tracing::error!(error = %err, "failed to notify operator");
                }
                Ok(_) if is_file => {
                    if let Err(err) = self
                        .messenger
                        .forward_message(owner_chat, msg.chat_id, msg.message_id)
                        .await
                    {
                        tracing::error!(error = %err, "failed to forward file to operator");
                    }
                }
                Ok(_) => {}
            }
        }

        tracing::info!(
            user_id = msg.sender.id.0,
            kind = if is_file { "file" } else { "text" },
            "question logged"
        );
        Ok(())
    }

    /// `/feedback <1-5> <comment>`.
    pub(super) async fn feedback(&self, msg: &InboundMessage) -> Result<()> {
        let args = msg
            .text
            .as_deref()
            .map(|text| parse_command(text).1)
            .unwrap_or_default();
        let (rating, comment) = parse_feedback(&args)?;

        {
            let mut state = self.state.lock().await;
            state.feedback.append(FeedbackRecord {
                user_id: msg.sender.id,
                display_name: msg.sender.display_name.clone(),
                rating,
                comment: comment.clone(),
                timestamp: msg.timestamp,
            });
        }

        self.messenger
            .send_text(msg.chat_id, &render::feedback_ack(rating, &comment))
            .await?;

        if let Some(owner_chat) = self.notify_target(&msg.sender) {
            if let Err(err) = self
                .messenger
                .send_text(
                    owner_chat,
                    &render::feedback_notification(&msg.sender.display_name, rating, &comment),
                )
                .await
            {
                tracing::error!(error = %err, "failed to notify operator of feedback");
            }
        }

        tracing::info!(user_id = msg.sender.id.0, rating, "feedback received");
        Ok(())
    }

    /// A file sent as a reply to one of the bot's messages, with no command
    /// caption.
    pub(super) async fn file_reply(&self, msg: &InboundMessage) -> Result<()> {
        let Some(file) = msg.file.clone() else {
            return Ok(());
        };

        let body = match msg.caption.as_deref() {
            Some(caption) => caption.to_string(),
            None => format!("[{} FILE REPLY]", file.kind.as_str().to_uppercase()),
        };

        let record = MessageRecord {
            user_id: msg.sender.id,
            display_name: msg.sender.display_name.clone(),
            handle: msg.sender.handle.clone(),
            body,
            file: Some(file.clone()),
            timestamp: msg.timestamp,
            is_reply_to_bot: true,
        };

        {
            let mut state = self.state.lock().await;
            state.registry.upsert(
                msg.sender.id,
                &msg.sender.display_name,
                msg.sender.handle.as_deref(),
                msg.timestamp,
            );
            state.messages.append(record.clone());
            self.sync_liveness(&state);
        }

        if let Some(owner_chat) = self.notify_target(&msg.sender) {
            match self
                .messenger
                .forward_message(owner_chat, msg.chat_id, msg.message_id)
                .await
            {
                Err(err) => {
                    tracing::error!(error = %err, "failed to forward file reply to operator");
                }
                Ok(()) => {
                    if let Err(err) = self
                        .messenger
                        .send_text(
                            owner_chat,
                            &render::file_reply_notification(&record, msg.caption.as_deref()),
                        )
                        .await
                    {
                        tracing::error!(error = %err, "failed to notify operator of file reply");
                    }
                }
            }
        }

        self.messenger
            .send_text(msg.chat_id, &render::file_reply_ack(file.kind.as_str()))
            .await?;

        tracing::info!(user_id = msg.sender.id.0, "file reply logged");
        Ok(())
    }

    /// Plain non-command text: canned keyword replies, else a help nudge.
    pub(super) async fn auto_reply(&self, msg: &InboundMessage) -> Result<()> {
        self.register_sender(msg).await;

        let text = msg.text.as_deref().unwrap_or_default();
        match autoreply::lookup(text) {
            Some((keyword, response)) => {
                self.messenger.send_text(msg.chat_id, response).await?;
                tracing::info!(user_id = msg.sender.id.0, keyword, "auto-reply sent");
            }
            None => {
                self.messenger
                    .send_text(msg.chat_id, autoreply::DEFAULT_NUDGE)
                    .await?;
                tracing::debug!(user_id = msg.sender.id.0, "default auto-reply sent");
            }
        }
        Ok(())
    }
}

/// Parse `<1-5> <comment>` from a `/feedback` argument string.
///
/// Missing rating or comment → the usage hint; a rating token that is not an
/// integer in `1..=5` → the range hint.
fn parse_feedback(args: &str) -> Result<(u8, String)> {
    let mut parts = args.trim().splitn(2, char::is_whitespace);
    let rating_tok = parts.next().unwrap_or("").trim();
    let comment = parts.next().unwrap_or("").trim().to_string();

    if rating_tok.is_empty() || comment.is_empty() {
        return Err(Error::Validation(render::FEEDBACK_USAGE.to_string()));
    }

    let rating = match rating_tok.parse::<u8>() {
        Ok(n) if (1..=5).contains(&n) => n,
        _ => return Err(Error::Validation(render::RATING_RANGE.to_string())),
    };

    Ok((rating, comment))
}

/// Extract the question body (and file, for captioned uploads) of an `/ask`.
fn ask_payload(msg: &InboundMessage) -> Result<(String, Option<FileMeta>)> {
    if let Some(text) = msg.text.as_deref() {
        let (_, payload) = parse_command(text);
        if payload.is_empty() {
            return Err(Error::Validation(render::ASK_USAGE.to_string()));
        }
        return Ok((payload, None));
    }

    let Some(file) = msg.file.clone() else {
        return Err(Error::Validation(render::ASK_USAGE.to_string()));
    };

    let body = match msg.caption.as_deref() {
        Some(caption) if caption.trim_start().starts_with("/ask") => {
            let (_, payload) = parse_command(caption);
            if payload.is_empty() {
                "[File sent]".to_string()
            } else {
                payload
            }
        }
        Some(caption) => caption.to_string(),
        None => "[File sent without caption]".to_string(),
    };

    Ok((body, Some(file)))
}
