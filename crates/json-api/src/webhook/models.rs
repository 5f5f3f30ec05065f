//! Webhook update envelope. Unknown fields are ignored.

use serde::Deserialize;

use relay_app::{
    bot::IncomingMessage,
    ids::{ChatId, UserId},
};

#[derive(Debug, Deserialize)]
pub(crate) struct Update {
    #[serde(default)]
    pub(crate) message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    #[serde(default)]
    pub(crate) text: Option<String>,

    #[serde(default)]
    pub(crate) from: Option<Sender>,

    pub(crate) chat: Chat,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Sender {
    pub(crate) id: UserId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Chat {
    pub(crate) id: ChatId,
}

impl Update {
    /// The text message carried by this update, if any.
    pub(crate) fn into_incoming(self) -> Option<IncomingMessage> {
        let message = self.message?;

        Some(IncomingMessage {
            user_id: message.from?.id,
            chat_id: message.chat.id,
            text: message.text?,
        })
    }
}
