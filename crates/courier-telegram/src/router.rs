use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*};

use courier_core::{
    config::Config,
    liveness::{BotStatus, Liveness},
    messaging::port::MessagingPort,
    relay::RelayService,
};

use crate::{inbound, TelegramMessenger};

/// Shared dispatcher state.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<RelayService>,
    /// Our own account id, for reply-to-bot detection.
    pub bot_user_id: Option<teloxide::types::UserId>,
}

/// Connect, then hand every incoming message to the relay service until the
/// process is stopped.
pub async fn run_polling(cfg: Arc<Config>, liveness: Arc<Liveness>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.bot_token.clone());

    let bot_user_id = match bot.get_me().await {
        Ok(me) => {
            tracing::info!(username = me.username(), "bot connected");
            Some(me.user.id)
        }
        Err(err) => {
            tracing::warn!(error = %err, "get_me failed; reply-to-bot detection degraded");
            None
        }
    };

    if cfg.owner_id.is_none() {
        tracing::warn!("OWNER_ID not set; operator commands are disabled");
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));
    let relay = Arc::new(RelayService::new(cfg, messenger, liveness.clone()));

    liveness.set_status(BotStatus::Running);
    tracing::info!("bot started, polling for updates");

    let state = Arc::new(AppState { relay, bot_user_id });
    let handler = dptree::entry().branch(Update::filter_message().endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    if let Some(inbound) = inbound::to_inbound(&msg, state.bot_user_id) {
        // All failures are absorbed at the relay's dispatch boundary; the
        // polling loop itself never errors on a bad update.
        state.relay.dispatch(&inbound).await;
    }
    Ok(())
}
