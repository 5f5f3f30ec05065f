//! Command handling for inbound chat messages.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use tracing::{error, info, warn};

use crate::{
    auth::TokensService,
    bot::{Command, replies},
    delivery::{Dispatcher, OutboundMessage},
    ids::{ChatId, UserId},
};

/// A text message received from the platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub user_id: UserId,
    pub chat_id: ChatId,
    pub text: String,
}

#[derive(Clone)]
pub struct BotCommands {
    tokens: Arc<dyn TokensService>,
    dispatcher: Dispatcher,
}

impl BotCommands {
    #[must_use]
    pub fn new(tokens: Arc<dyn TokensService>, dispatcher: Dispatcher) -> Self {
        Self { tokens, dispatcher }
    }

    async fn reply(&self, command: Command, user: UserId) -> String {
        match command {
            Command::Auth => match self.tokens.issue_or_fetch(user).await {
                Ok(record) => replies::token(&record.token),
                Err(source) => {
                    error!(%user, "failed to issue token: {source}");
                    replies::ISSUE_FAILED.to_string()
                }
            },
            Command::Revoke => match self.tokens.revoke(user).await {
                Ok(record) => replies::revoked(&record.token),
                Err(source) => {
                    error!(%user, "failed to revoke token: {source}");
                    replies::REVOKE_FAILED.to_string()
                }
            },
            Command::Help => replies::HELP.to_string(),
        }
    }
}

#[async_trait]
impl CommandService for BotCommands {
    async fn handle_message(&self, message: IncomingMessage) -> Option<Command> {
        let command = Command::parse(&message.text)?;

        info!(user = %message.user_id, %command, "handling command");

        let reply = self.reply(command, message.user_id).await;

        if let Err(source) = self
            .dispatcher
            .dispatch(OutboundMessage::new(message.chat_id, reply))
        {
            warn!(chat_id = %message.chat_id, %command, "failed to queue reply: {source}");
        }

        Some(command)
    }
}

#[automock]
#[async_trait]
pub trait CommandService: Send + Sync {
    /// Act on `message` if it is a command, queueing the reply.
    ///
    /// Returns the recognised command, or `None` for ordinary text.
    async fn handle_message(&self, message: IncomingMessage) -> Option<Command>;
}
