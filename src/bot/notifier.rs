//! Direct-message delivery through the Discord HTTP API

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::debug;

use crate::common::errors::{BotError, Result};
use crate::common::traits::Notifier;
use crate::common::types::RequesterId;

/// Sends alert notifications as Discord direct messages
#[derive(Clone)]
pub struct DiscordNotifier {
    http: Arc<serenity::Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn notify(&self, requester: RequesterId, message: &str) -> Result<()> {
        if requester.0 == 0 {
            return Err(BotError::Notification("requester id must be non-zero".to_string()));
        }

        let user = serenity::UserId::new(requester.0);
        user.direct_message(&*self.http, serenity::CreateMessage::new().content(message))
            .await
            .map_err(|e| BotError::Notification(e.to_string()))?;

        debug!(%requester, "Direct message delivered");
        Ok(())
    }
}
