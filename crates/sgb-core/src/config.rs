use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{domain::ChatId, errors::Error, Result};

/// Typed configuration, sourced from the environment (and an optional `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    /// Bot API credential.
    pub telegram_bot_token: String,
    /// Fixed destination for relayed suggestions.
    pub admin_chat_id: ChatId,

    /// Server-side long-poll wait per `getUpdates` call.
    pub poll_timeout: Duration,
    /// Fixed sleep after a transport failure before the next fetch.
    pub error_backoff: Duration,

    /// Log file, written in addition to stdout.
    pub log_file: PathBuf,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let telegram_bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if telegram_bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let admin_chat_id = match env_str("ADMIN_CHAT_ID").and_then(non_empty) {
            None => {
                return Err(Error::Config(
                    "ADMIN_CHAT_ID environment variable is required".to_string(),
                ))
            }
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map(ChatId)
                .map_err(|_| Error::Config("ADMIN_CHAT_ID must be a numeric chat id".to_string()))?,
        };

        let poll_timeout = Duration::from_secs(env_u64("POLL_TIMEOUT_SECS").unwrap_or(30));
        let error_backoff = Duration::from_secs(env_u64("ERROR_BACKOFF_SECS").unwrap_or(5));

        let log_file = PathBuf::from(env_str("LOG_FILE").unwrap_or("bot.log".to_string()));

        Ok(Self {
            telegram_bot_token,
            admin_chat_id,
            poll_timeout,
            error_backoff,
            log_file,
        })
    }
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

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
