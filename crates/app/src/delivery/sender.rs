//! Outbound sender seam.

use async_trait::async_trait;
use mockall::automock;

use crate::delivery::{DeliveryError, OutboundMessage};

#[automock]
#[async_trait]
/// Sends one message to the messaging platform.
pub trait MessageSender: Send + Sync {
    async fn send_message(&self, message: &OutboundMessage) -> Result<(), DeliveryError>;
}
