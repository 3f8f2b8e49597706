use async_trait::async_trait;

use crate::messaging::types::{BotIdentity, ChatCandidate, ChatId, SendError};

/// Port over the Bot API.
///
/// Telegram is the only implementation today; the shape is small enough that
/// another messenger could sit behind it unchanged.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Deliver one plain-text message to a chat.
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), SendError>;

    /// Who the configured credential authenticates as.
    async fn identity(&self) -> Result<BotIdentity, SendError>;

    /// Chats seen in the pending update batch, one entry per message update.
    /// Duplicates are expected; callers deduplicate.
    async fn pending_chats(&self) -> Result<Vec<ChatCandidate>, SendError>;
}
