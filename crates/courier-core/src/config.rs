use std::{
    env, fs,
    net::SocketAddr,
    path::Path,
    time::Duration,
};

use crate::{domain::UserId, errors::Error, Result};

/// Value shipped in the sample environment file; treated the same as an
/// unset token.
const TOKEN_PLACEHOLDER: &str = "your_bot_token_here";

/// Typed configuration for the relay bot.
#[derive(Clone, Debug)]
pub struct Config {
    /// Telegram bot token.
    pub bot_token: String,
    /// The single operator. `None` disables all operator-only commands but
    /// does not stop the process.
    pub owner_id: Option<UserId>,

    /// Bind address for the liveness HTTP server.
    pub liveness_addr: SocketAddr,
    /// How often the heartbeat refreshes the liveness `last_update` field.
    pub heartbeat_interval: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() || bot_token == TOKEN_PLACEHOLDER {
            return Err(Error::Config(
                "BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let owner_id = parse_owner_id(env_str("OWNER_ID"));

        let liveness_addr = match env_str("LIVENESS_ADDR") {
            Some(raw) => raw
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| Error::Config(format!("invalid LIVENESS_ADDR: {e}")))?,
            None => SocketAddr::from(([0, 0, 0, 0], 8080)),
        };

        let heartbeat_interval =
            Duration::from_secs(env_u64("HEARTBEAT_INTERVAL_SECS").unwrap_or(60).max(1));

        Ok(Self {
            bot_token,
            owner_id,
            liveness_addr,
            heartbeat_interval,
        })
    }
}

/// `OWNER_ID` semantics: absent, empty, unparseable, or `0` all mean "no
/// operator configured".
fn parse_owner_id(raw: Option<String>) -> Option<UserId> {
    let id = raw?.trim().parse::<i64>().ok()?;
    if id == 0 {
        return None;
    }
    Some(UserId(id))
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        env::set_var(key, val);
    }
}
