//! Delivery errors.

use thiserror::Error;

/// Failure to enqueue a message. Nothing was sent.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("delivery queue is full")]
    QueueFull,

    #[error("delivery worker has stopped")]
    Closed,
}

/// Failure reported by the messaging platform or the transport to it.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Transport failure. The request URL is stripped because it embeds the bot token.
    #[error("http error: {0}")]
    Http(#[source] reqwest::Error),

    #[error("platform rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl From<reqwest::Error> for DeliveryError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.without_url())
    }
}
