use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{errors::Error, Result};

/// Telegram hard limit on message length (characters).
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;
/// Chunk size used when a message exceeds the limit.
pub const TELEGRAM_CHUNK_SIZE: usize = 4000;

/// Typed configuration for the email checker binary.
#[derive(Clone, Debug)]
pub struct CheckerConfig {
    /// Optional newline-delimited address list; skipped when absent.
    pub emails_file: PathBuf,

    pub dns_timeout: Duration,
    pub dns_attempts: usize,

    /// When set, every check outcome is appended here.
    pub results_log_path: Option<PathBuf>,
    pub results_log_json: bool,
}

impl CheckerConfig {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let emails_file =
            env_path("EMAILS_FILE").unwrap_or_else(|| PathBuf::from("emails.txt"));

        let dns_timeout = Duration::from_millis(env_u64("DNS_TIMEOUT_MS").unwrap_or(2000));
        let dns_attempts = env_usize("DNS_ATTEMPTS").unwrap_or(2);
        if dns_attempts == 0 {
            return Err(Error::Config("DNS_ATTEMPTS must be at least 1".to_string()));
        }

        let results_log_path = env_path("RESULTS_LOG_PATH");
        let results_log_json = env_bool("RESULTS_LOG_JSON").unwrap_or(false);

        Ok(Self {
            emails_file,
            dns_timeout,
            dns_attempts,
            results_log_path,
            results_log_json,
        })
    }
}

/// Typed configuration for the sender binary.
///
/// Validated once at startup; the sender functions receive this struct
/// instead of consulting the environment themselves.
#[derive(Clone, Debug)]
pub struct SenderConfig {
    pub bot_token: String,

    /// Destination chat. When unset the binary runs chat discovery instead.
    pub chat_id: Option<i64>,

    pub message_file: PathBuf,

    /// Content at or under this many characters goes out as one message.
    pub message_limit: usize,
    /// Chunk size for longer content.
    pub chunk_size: usize,
    /// Pause between consecutive chunks.
    pub chunk_delay: Duration,
}

impl SenderConfig {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));

        let bot_token = env_str("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        if bot_token.trim().is_empty() {
            return Err(Error::Config(
                "TELEGRAM_BOT_TOKEN environment variable is required".to_string(),
            ));
        }

        let chat_id = match env_str("TELEGRAM_CHAT_ID").and_then(non_empty) {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| {
                Error::Config(format!("TELEGRAM_CHAT_ID is not a numeric chat id: {raw}"))
            })?),
            None => None,
        };

        let message_file =
            env_path("MESSAGE_FILE").unwrap_or_else(|| PathBuf::from("message.txt"));

        let message_limit =
            env_usize("TELEGRAM_MESSAGE_LIMIT").unwrap_or(TELEGRAM_MESSAGE_LIMIT);
        let chunk_size = env_usize("TELEGRAM_CHUNK_SIZE").unwrap_or(TELEGRAM_CHUNK_SIZE);
        if chunk_size == 0 {
            return Err(Error::Config(
                "TELEGRAM_CHUNK_SIZE must be at least 1".to_string(),
            ));
        }
        if chunk_size > message_limit {
            return Err(Error::Config(format!(
                "TELEGRAM_CHUNK_SIZE ({chunk_size}) must not exceed TELEGRAM_MESSAGE_LIMIT ({message_limit})"
            )));
        }

        let chunk_delay = Duration::from_millis(env_u64("CHUNK_DELAY_MS").unwrap_or(500));

        Ok(Self {
            bot_token,
            chat_id,
            message_file,
            message_limit,
            chunk_size,
            chunk_delay,
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

fn env_bool(key: &str) -> Option<bool> {
    env_str(key).map(|s| {
        matches!(
            s.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u64(key: &str) -> Option<u64> {
    env_str(key).and_then(|s| s.trim().parse::<u64>().ok())
}

fn env_usize(key: &str) -> Option<usize> {
    env_str(key).and_then(|s| s.trim().parse::<usize>().ok())
}

fn env_path(key: &str) -> Option<PathBuf> {
    env::var_os(key).map(PathBuf::from)
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
