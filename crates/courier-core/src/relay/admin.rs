//! Operator-only handlers: log review, targeted replies, broadcasts and
//! statistics.

use crate::{
    domain::UserId,
    errors::Error,
    logs::distinct_senders,
    messaging::types::InboundMessage,
    registry::ResolvedTarget,
    routing::parse_command,
    Result,
};

use super::{render, RelayService};

impl RelayService {
    pub(super) async fn view_messages(&self, msg: &InboundMessage) -> Result<()> {
        self.require_operator(&msg.sender)?;

        let rendered: Vec<String> = {
            let state = self.state.lock().await;
            state
                .messages
                .iter()
                .enumerate()
                .map(|(i, record)| render::message_record(i + 1, record))
                .collect()
        };

        if rendered.is_empty() {
            self.messenger.send_text(msg.chat_id, render::NO_MESSAGES).await?;
            return Ok(());
        }

        // One message per record so long logs never hit the platform's
        // per-message length limit.
        for text in &rendered {
            self.messenger.send_text(msg.chat_id, text).await?;
        }
        tracing::info!(count = rendered.len(), "operator viewed messages");
        Ok(())
    }

    /// `/reply <user_id|@handle> <message>`.
    pub(super) async fn reply_to_user(&self, msg: &InboundMessage) -> Result<()> {
        self.require_operator(&msg.sender)?;

        let args = msg
            .text
            .as_deref()
            .map(|text| parse_command(text).1)
            .unwrap_or_default();
        let (target, body) = split_target_and_body(&args)
            .ok_or_else(|| Error::Validation(render::REPLY_USAGE.to_string()))?;

        let resolved = { self.state.lock().await.registry.resolve(target)? };
        self.deliver_reply(msg, &resolved, body, false).await
    }

    /// A file captioned `/reply <user_id|@handle> <message>`: the reply text
    /// is sent first, then the file is forwarded.
    pub(super) async fn reply_with_file(&self, msg: &InboundMessage) -> Result<()> {
        self.require_operator(&msg.sender)?;

        let args = msg
            .caption
            .as_deref()
            .map(|caption| parse_command(caption).1)
            .unwrap_or_default();
        let (target, body) = split_target_and_body(&args)
            .ok_or_else(|| Error::Validation(render::REPLY_FILE_USAGE.to_string()))?;

        let resolved = { self.state.lock().await.registry.resolve(target)? };
        self.deliver_reply(msg, &resolved, body, true).await
    }

    /// Send the reply and report the outcome (success or the transport
    /// error) back to the operator. No retry.
    async fn deliver_reply(
        &self,
        msg: &InboundMessage,
        target: &ResolvedTarget,
        body: &str,
        with_file: bool,
    ) -> Result<()> {
        let confirmation = match self.send_reply(msg, target, body, with_file).await {
            Ok(()) => {
                tracing::info!(recipient = target.user_id.0, with_file, "operator reply delivered");
                render::reply_sent(&target.label, with_file)
            }
            Err(err) => {
                tracing::error!(error = %err, recipient = target.user_id.0, "operator reply failed");
                render::reply_failed(&target.label, &err)
            }
        };
        self.messenger.send_text(msg.chat_id, &confirmation).await?;
        Ok(())
    }

    async fn send_reply(
        &self,
        msg: &InboundMessage,
        target: &ResolvedTarget,
        body: &str,
        with_file: bool,
    ) -> Result<()> {
        let chat = target.user_id.direct_chat();
        self.messenger
            .send_text(chat, &render::admin_reply(body))
            .await?;
        if with_file {
            self.messenger
                .forward_message(chat, msg.chat_id, msg.message_id)
                .await?;
        }
        Ok(())
    }

    /// `/broadcast <message>` as text, or a file captioned `/broadcast ...`.
    ///
    /// Recipients are a snapshot of the registry at call time; users added
    /// mid-broadcast are not included. One recipient's failure never aborts
    /// delivery to the rest.
    pub(super) async fn broadcast(&self, msg: &InboundMessage, with_file: bool) -> Result<()> {
        self.require_operator(&msg.sender)?;

        let (raw, usage) = if with_file {
            (msg.caption.as_deref(), render::BROADCAST_FILE_USAGE)
        } else {
            (msg.text.as_deref(), render::BROADCAST_USAGE)
        };
        let body = raw.map(|text| parse_command(text).1).unwrap_or_default();
        if body.is_empty() {
            return Err(Error::Validation(usage.to_string()));
        }

        let recipients = { self.state.lock().await.registry.user_ids() };
        if recipients.is_empty() {
            self.messenger.send_text(msg.chat_id, render::NO_USERS).await?;
            return Ok(());
        }

        let text = render::broadcast_message(&body);
        let mut sent = 0usize;
        let mut failed = 0usize;
        for user_id in &recipients {
            match self.send_broadcast(*user_id, &text, with_file, msg).await {
                Ok(()) => sent += 1,
                Err(err) => {
                    failed += 1;
                    tracing::warn!(
                        error = %err,
                        recipient = user_id.0,
                        "broadcast delivery failed"
                    );
                }
            }
        }

        self.messenger
            .send_text(
                msg.chat_id,
                &render::broadcast_summary(with_file, sent, failed, recipients.len()),
            )
            .await?;
        tracing::info!(sent, failed, total = recipients.len(), "broadcast finished");
        Ok(())
    }

    async fn send_broadcast(
        &self,
        user_id: UserId,
        text: &str,
        with_file: bool,
        msg: &InboundMessage,
    ) -> Result<()> {
        let chat = user_id.direct_chat();
        self.messenger.send_text(chat, text).await?;
        if with_file {
            self.messenger
                .forward_message(chat, msg.chat_id, msg.message_id)
                .await?;
        }
        Ok(())
    }

    pub(super) async fn view_feedback(&self, msg: &InboundMessage) -> Result<()> {
        self.require_operator(&msg.sender)?;

        let rendered: Option<Vec<String>> = {
            let state = self.state.lock().await;
            state.feedback.mean_rating().map(|mean| {
                let mut out = vec![render::feedback_summary(state.feedback.len(), mean)];
                out.extend(
                    state
                        .feedback
                        .iter()
                        .enumerate()
                        .map(|(i, record)| render::feedback_record(i + 1, record)),
                );
                out
            })
        };

        let Some(rendered) = rendered else {
            self.messenger.send_text(msg.chat_id, render::NO_FEEDBACK).await?;
            return Ok(());
        };

        for text in &rendered {
            self.messenger.send_text(msg.chat_id, text).await?;
        }
        tracing::info!(count = rendered.len() - 1, "operator viewed feedback");
        Ok(())
    }

    pub(super) async fn stats(&self, msg: &InboundMessage) -> Result<()> {
        self.require_operator(&msg.sender)?;

        let report = {
            let state = self.state.lock().await;
            render::stats_report(
                state.messages.len(),
                state.feedback.len(),
                state.registry.len(),
                state.feedback.mean_rating(),
                distinct_senders(&state.messages, &state.feedback),
            )
        };

        self.messenger.send_text(msg.chat_id, &report).await?;
        tracing::info!("operator viewed statistics");
        Ok(())
    }
}

/// `"<target> <body...>"` → `(target, body)`, requiring both parts.
fn split_target_and_body(args: &str) -> Option<(&str, &str)> {
    let mut parts = args.splitn(2, char::is_whitespace);
    let target = parts.next().filter(|t| !t.is_empty())?;
    let body = parts.next().map(str::trim).filter(|b| !b.is_empty())?;
    Some((target, body))
}

#[cfg(test)]
mod tests {
    use super::split_target_and_body;

    #[test]
    fn splits_target_from_body() {
        assert_eq!(
            split_target_and_body("@ann thanks for asking"),
            Some(("@ann", "thanks for asking"))
        );
        assert_eq!(split_target_and_body("123 hi"), Some(("123", "hi")));
    }

    #[test]
    fn rejects_missing_parts() {
        assert_eq!(split_target_and_body(""), None);
        assert_eq!(split_target_and_body("@ann"), None);
        assert_eq!(split_target_and_body("@ann   "), None);
    }
}
