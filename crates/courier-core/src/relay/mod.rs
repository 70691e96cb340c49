//! The relay service: every user-facing and operator-facing operation,
//! expressed against the [`MessagingPort`] so adapters and tests can swap
//! the transport.

mod admin;
mod render;
mod user;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::Config,
    domain::{ChatId, UserId},
    errors::Error,
    liveness::{BotStatus, Liveness},
    logs::{FeedbackLog, MessageLog},
    messaging::{
        port::MessagingPort,
        types::{InboundMessage, Sender},
    },
    registry::UserRegistry,
    routing::{self, Route},
    Result,
};

/// Registry plus both logs, guarded together.
///
/// One guard covers every read-modify-write so handler invocations never
/// interleave mid-mutation. Guards are dropped before outbound sends;
/// broadcast snapshots its recipient list under the lock and delivers
/// lock-free.
#[derive(Default)]
struct RelayState {
    registry: UserRegistry,
    messages: MessageLog,
    feedback: FeedbackLog,
}

pub struct RelayService {
    cfg: Arc<Config>,
    messenger: Arc<dyn MessagingPort>,
    liveness: Arc<Liveness>,
    state: Mutex<RelayState>,
}

impl RelayService {
    pub fn new(
        cfg: Arc<Config>,
        messenger: Arc<dyn MessagingPort>,
        liveness: Arc<Liveness>,
    ) -> Self {
        Self {
            cfg,
            messenger,
            liveness,
            state: Mutex::new(RelayState::default()),
        }
    }

    /// Entry point for every inbound message. Classifies, runs the matching
    /// handler, and converts failures into user-visible replies — a failing
    /// handler never takes down the dispatch loop.
    pub async fn dispatch(&self, msg: &InboundMessage) {
        let Some(route) = routing::classify(msg) else {
            return;
        };
        if let Err(err) = self.run(route, msg).await {
            self.report_failure(route, msg, err).await;
        }
    }

    async fn run(&self, route: Route, msg: &InboundMessage) -> Result<()> {
        match route {
            Route::Start => self.start(msg).await,
            Route::Help => self.help(msg).await,
            Route::Ask | Route::AskWithFile => self.ask(msg).await,
            Route::Feedback => self.feedback(msg).await,
            Route::ViewMessages => self.view_messages(msg).await,
            Route::Reply => self.reply_to_user(msg).await,
            Route::ReplyWithFile => self.reply_with_file(msg).await,
            Route::Broadcast => self.broadcast(msg, false).await,
            Route::BroadcastWithFile => self.broadcast(msg, true).await,
            Route::ViewFeedback => self.view_feedback(msg).await,
            Route::Stats => self.stats(msg).await,
            Route::FileReply => self.file_reply(msg).await,
            Route::AutoReply => self.auto_reply(msg).await,
        }
    }

    /// Single error boundary for all handlers.
    async fn report_failure(&self, route: Route, msg: &InboundMessage, err: Error) {
        match err {
            Error::Validation(hint) => {
                let _ = self.messenger.send_text(msg.chat_id, &hint).await;
            }
            Error::Unauthorized => {
                let _ = self
                    .messenger
                    .send_text(msg.chat_id, render::UNAUTHORIZED)
                    .await;
            }
            Error::NotFound(specifier) => {
                let _ = self
                    .messenger
                    .send_text(msg.chat_id, &render::target_not_found(&specifier))
                    .await;
            }
            err => {
                tracing::error!(
                    error = %err,
                    route = ?route,
                    user_id = msg.sender.id.0,
                    "handler failed"
                );
                self.liveness.set_status(BotStatus::ErrorHandled);
                // Casual conversation never sees the apology; auto-reply
                // failures are logged only.
                if route != Route::AutoReply {
                    let _ = self.messenger.send_text(msg.chat_id, render::APOLOGY).await;
                }
            }
        }
    }

    fn is_operator(&self, user_id: UserId) -> bool {
        self.cfg.owner_id == Some(user_id)
    }

    fn require_operator(&self, sender: &Sender) -> Result<()> {
        if self.is_operator(sender.id) {
            Ok(())
        } else {
            Err(Error::Unauthorized)
        }
    }

    /// Operator chat for notifications — when one is configured and the
    /// sender isn't the operator themselves.
    fn notify_target(&self, sender: &Sender) -> Option<ChatId> {
        match self.cfg.owner_id {
            Some(owner) if owner != sender.id => Some(owner.direct_chat()),
            _ => None,
        }
    }

    /// Register/update the sender's profile and refresh liveness counters.
    async fn register_sender(&self, msg: &InboundMessage) {
        let mut state = self.state.lock().await;
        state.registry.upsert(
            msg.sender.id,
            &msg.sender.display_name,
            msg.sender.handle.as_deref(),
            msg.timestamp,
        );
        self.sync_liveness(&state);
    }

    fn sync_liveness(&self, state: &RelayState) {
        self.liveness
            .record_counts(state.registry.len(), state.messages.len());
    }
}
