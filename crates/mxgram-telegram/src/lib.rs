//! Telegram adapter (teloxide).
//!
//! This crate implements the `mxgram-core` MessagingPort over the Telegram
//! Bot API. Per the error design, failures are classified by the core's
//! substring classifier and never retried here; a failed chunk aborts the
//! caller's loop.

use async_trait::async_trait;

use teloxide::{prelude::*, types::UpdateKind};

use mxgram_core::messaging::{
    port::MessagingPort,
    types::{BotIdentity, ChatCandidate, ChatId, SendError},
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    pub fn from_token(token: &str) -> Self {
        Self {
            bot: Bot::new(token),
        }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> SendError {
        SendError::from_api_message(e.to_string())
    }
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<(), SendError> {
        self.bot
            .send_message(Self::tg_chat(chat_id), text.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn identity(&self) -> Result<BotIdentity, SendError> {
        let me = self.bot.get_me().await.map_err(Self::map_err)?;
        Ok(BotIdentity {
            id: me.user.id.0 as i64,
            username: me.username().to_string(),
            first_name: me.user.first_name.clone(),
        })
    }

    async fn pending_chats(&self) -> Result<Vec<ChatCandidate>, SendError> {
        let updates = self.bot.get_updates().await.map_err(Self::map_err)?;

        let mut chats = Vec::new();
        for update in updates {
            let UpdateKind::Message(message) = update.kind else {
                continue;
            };
            chats.push(candidate_from_chat(&message.chat));
        }
        Ok(chats)
    }
}

fn candidate_from_chat(chat: &teloxide::types::Chat) -> ChatCandidate {
    ChatCandidate {
        id: ChatId(chat.id.0),
        kind: chat_kind_label(chat).to_string(),
        username: chat.username().map(|s| s.to_string()),
        first_name: chat.first_name().map(|s| s.to_string()),
        title: chat.title().map(|s| s.to_string()),
    }
}

fn chat_kind_label(chat: &teloxide::types::Chat) -> &'static str {
    if chat.is_private() {
        "private"
    } else if chat.is_group() {
        "group"
    } else if chat.is_supergroup() {
        "supergroup"
    } else if chat.is_channel() {
        "channel"
    } else {
        "unknown"
    }
}
