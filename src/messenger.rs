// messenger.rs - Outgoing Message Primitives
// The two operations handlers need from the chat platform: send a message to a
// channel and edit a message the bot sent earlier.
//
// Used by: router.rs, every command module, main.rs (Discord implementation)

use std::sync::Arc;

use async_trait::async_trait;
use serenity::http::Http;
use serenity::model::id::{ChannelId, MessageId};

use crate::error::BotError;

/// Status text sent before long-running work
pub const PLACEHOLDER: &str = "working !";

/// Channel a message arrived in (Discord channel id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelRef(pub u64);

/// Handle to a message the bot has sent, used to edit it later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    pub channel: ChannelRef,
    pub id: u64,
}

#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, channel: ChannelRef, text: &str) -> Result<SentMessage, BotError>;

    async fn edit(&self, message: &SentMessage, text: &str) -> Result<(), BotError>;
}

/// Messenger backed by serenity's HTTP client
pub struct DiscordMessenger {
    http: Arc<Http>,
}

impl DiscordMessenger {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Messenger for DiscordMessenger {
    async fn send(&self, channel: ChannelRef, text: &str) -> Result<SentMessage, BotError> {
        let message = ChannelId(channel.0).say(&self.http, text).await?;
        Ok(SentMessage {
            channel,
            id: message.id.0,
        })
    }

    async fn edit(&self, message: &SentMessage, text: &str) -> Result<(), BotError> {
        ChannelId(message.channel.0)
            .edit_message(&self.http, MessageId(message.id), |m| m.content(text))
            .await?;
        Ok(())
    }
}
