use serde::Serialize;

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatId(pub i64);

/// Identity of the bot behind the configured credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: i64,
    pub username: String,
    pub first_name: String,
}

/// A chat seen in the pending update batch.
///
/// Metadata fields are optional because private chats carry a first name
/// while groups and channels carry a title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatCandidate {
    pub id: ChatId,
    pub kind: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub title: Option<String>,
}

/// Classified transport failure kinds the sender branches on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendErrorKind {
    Unauthorized,
    ChatNotFound,
    Other,
}

impl SendErrorKind {
    /// Remediation hint shown next to the failure, when one is known.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            SendErrorKind::Unauthorized => Some("check that TELEGRAM_BOT_TOKEN is correct"),
            SendErrorKind::ChatNotFound => {
                Some("check TELEGRAM_CHAT_ID and make sure the bot received /start")
            }
            SendErrorKind::Other => None,
        }
    }
}

/// Transport failure as surfaced by a messaging adapter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SendError {
    pub kind: SendErrorKind,
    pub message: String,
}

impl SendError {
    /// Build from raw API error text, classifying by known substrings.
    pub fn from_api_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: classify_api_message(&message),
            message,
        }
    }
}

/// Substring classification over the API failure text.
///
/// The Bot API reports a rejected credential as HTTP 401 "Unauthorized" and
/// an unknown destination as "Bad Request: chat not found".
pub fn classify_api_message(message: &str) -> SendErrorKind {
    let lower = message.to_lowercase();
    if lower.contains("unauthorized") || lower.contains("401") {
        return SendErrorKind::Unauthorized;
    }
    if lower.contains("chat not found") {
        return SendErrorKind::ChatNotFound;
    }
    SendErrorKind::Other
}
