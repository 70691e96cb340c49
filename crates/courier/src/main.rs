use std::sync::Arc;

use courier_core::{
    config::Config,
    liveness::{BotStatus, Liveness},
    Error,
};

#[tokio::main]
async fn main() -> Result<(), Error> {
    courier_core::logging::init("courier")?;

    let cfg = match Config::load() {
        Ok(cfg) => Arc::new(cfg),
        Err(err) => {
            tracing::error!(error = %err, "configuration error, exiting");
            return Err(err);
        }
    };

    let liveness = Arc::new(Liveness::new());

    // The keep-alive surface comes up before the messaging client so the
    // supervisor sees the process during startup.
    {
        let liveness = liveness.clone();
        let addr = cfg.liveness_addr;
        tokio::spawn(async move {
            if let Err(err) = courier_liveness::serve(addr, liveness).await {
                tracing::error!(error = %err, "liveness server failed");
            }
        });
    }
    courier_liveness::spawn_heartbeat(liveness.clone(), cfg.heartbeat_interval);

    liveness.set_status(BotStatus::Initializing);

    if let Err(err) = courier_telegram::router::run_polling(cfg, liveness.clone()).await {
        liveness.set_status(BotStatus::Error);
        tracing::error!(error = %err, "bot failed");
        return Err(Error::Transport(format!("telegram bot failed: {err}")));
    }

    Ok(())
}
