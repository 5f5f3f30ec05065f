//! Bounded delivery queue and the background worker draining it.
//!
//! Handlers enqueue with [`Dispatcher::dispatch`], which never waits on the
//! platform. A [`DeliveryWorker`] drains the queue and runs up to a fixed
//! number of sends at once, so a slow chat never holds up the others.

use std::sync::Arc;

use tokio::{
    sync::{
        Semaphore,
        mpsc::{self, Receiver, Sender, error::TrySendError},
    },
    task::{JoinError, JoinHandle, JoinSet},
};
use tracing::{debug, info, warn};

use crate::delivery::{DispatchError, MessageSender, OutboundMessage};

/// Create a dispatcher and the receiving end its worker drains.
#[must_use]
pub fn channel(capacity: usize) -> (Dispatcher, Receiver<OutboundMessage>) {
    let (queue, receiver) = mpsc::channel(capacity.max(1));

    (Dispatcher { queue }, receiver)
}

/// Cheap handle for enqueueing outbound messages.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    queue: Sender<OutboundMessage>,
}

impl Dispatcher {
    /// Enqueue `message` without waiting for delivery.
    ///
    /// # Errors
    ///
    /// Returns an error if the queue is full or the worker has stopped.
    pub fn dispatch(&self, message: OutboundMessage) -> Result<(), DispatchError> {
        self.queue.try_send(message).map_err(|error| match error {
            TrySendError::Full(message) => {
                warn!(chat_id = %message.chat_id, "delivery queue is full, dropping message");
                DispatchError::QueueFull
            }
            TrySendError::Closed(_) => DispatchError::Closed,
        })
    }

    /// Whether the worker has stopped receiving.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.queue.is_closed()
    }
}

/// Sends in flight at once unless configured otherwise.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 16;

/// Drains the queue until every [`Dispatcher`] is dropped, then waits for
/// sends still in flight.
pub struct DeliveryWorker {
    queue: Receiver<OutboundMessage>,
    sender: Arc<dyn MessageSender>,
    permits: Arc<Semaphore>,
}

impl DeliveryWorker {
    #[must_use]
    pub fn new(queue: Receiver<OutboundMessage>, sender: Arc<dyn MessageSender>) -> Self {
        Self {
            queue,
            sender,
            permits: Arc::new(Semaphore::new(DEFAULT_MAX_IN_FLIGHT)),
        }
    }

    /// Cap concurrent sends. A cap of one delivers strictly in enqueue order.
    #[must_use]
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.permits = Arc::new(Semaphore::new(max_in_flight.max(1)));
        self
    }

    /// Run the worker on the current runtime.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        let mut in_flight = JoinSet::new();

        while let Some(message) = self.queue.recv().await {
            // The semaphore is never closed.
            let Ok(permit) = self.permits.clone().acquire_owned().await else {
                break;
            };

            let sender = self.sender.clone();

            in_flight.spawn(async move {
                deliver(sender.as_ref(), &message).await;
                drop(permit);
            });

            while let Some(result) = in_flight.try_join_next() {
                reap(result);
            }
        }

        while let Some(result) = in_flight.join_next().await {
            reap(result);
        }

        info!("delivery queue closed, worker stopping");
    }
}

async fn deliver(sender: &dyn MessageSender, message: &OutboundMessage) {
    match sender.send_message(message).await {
        Ok(()) => debug!(chat_id = %message.chat_id, "delivered message"),
        Err(error) => warn!(chat_id = %message.chat_id, "failed to deliver message: {error}"),
    }
}

fn reap(result: Result<(), JoinError>) {
    if let Err(error) = result {
        warn!("delivery task failed: {error}");
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Mutex, time::Duration};

    use async_trait::async_trait;
    use mockall::Sequence;
    use testresult::TestResult;
    use tokio::{sync::Notify, time::timeout};

    use crate::{
        delivery::{DeliveryError, MockMessageSender},
        ids::ChatId,
    };

    use super::*;

    fn message(chat: i64, text: &str) -> OutboundMessage {
        OutboundMessage::new(ChatId::new(chat), text)
    }

    #[tokio::test]
    async fn worker_delivers_messages_in_enqueue_order() -> TestResult {
        let (dispatcher, receiver) = channel(8);
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let recorded = delivered.clone();

        let mut sender = MockMessageSender::new();

        sender.expect_send_message().times(3).returning(move |message| {
            if let Ok(mut delivered) = recorded.lock() {
                delivered.push(message.text.clone());
            }

            Ok(())
        });

        dispatcher.dispatch(message(1, "one"))?;
        dispatcher.dispatch(message(1, "two"))?;
        dispatcher.dispatch(message(2, "three"))?;
        drop(dispatcher);

        DeliveryWorker::new(receiver, Arc::new(sender))
            .with_max_in_flight(1)
            .run()
            .await;

        assert_eq!(
            *delivered.lock().map_err(|error| error.to_string())?,
            ["one", "two", "three"]
        );

        Ok(())
    }

    #[tokio::test]
    async fn delivery_failure_does_not_stop_the_worker() -> TestResult {
        let (dispatcher, receiver) = channel(8);
        let mut sequence = Sequence::new();
        let mut sender = MockMessageSender::new();

        sender
            .expect_send_message()
            .once()
            .in_sequence(&mut sequence)
            .withf(|message| message.text == "rejected")
            .returning(|_| {
                Err(DeliveryError::Rejected {
                    status: 403,
                    body: "bot was blocked by the user".to_string(),
                })
            });
        sender
            .expect_send_message()
            .once()
            .in_sequence(&mut sequence)
            .withf(|message| message.text == "accepted")
            .returning(|_| Ok(()));

        dispatcher.dispatch(message(3, "rejected"))?;
        dispatcher.dispatch(message(3, "accepted"))?;
        drop(dispatcher);

        DeliveryWorker::new(receiver, Arc::new(sender))
            .with_max_in_flight(1)
            .run()
            .await;

        Ok(())
    }

    /// Holds chat 1 until chat 2 has been delivered.
    #[derive(Default)]
    struct StalledChatSender {
        release: Notify,
        delivered: Mutex<Vec<ChatId>>,
    }

    #[async_trait]
    impl MessageSender for StalledChatSender {
        async fn send_message(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
            if message.chat_id == ChatId::new(1) {
                self.release.notified().await;
            }

            if let Ok(mut delivered) = self.delivered.lock() {
                delivered.push(message.chat_id);
            }

            if message.chat_id == ChatId::new(2) {
                self.release.notify_one();
            }

            Ok(())
        }
    }

    #[tokio::test]
    async fn slow_chat_does_not_hold_up_other_chats() -> TestResult {
        let (dispatcher, receiver) = channel(8);
        let sender = Arc::new(StalledChatSender::default());

        dispatcher.dispatch(message(1, "slow"))?;
        dispatcher.dispatch(message(2, "fast"))?;
        drop(dispatcher);

        timeout(
            Duration::from_secs(5),
            DeliveryWorker::new(receiver, sender.clone()).run(),
        )
        .await?;

        assert_eq!(
            *sender.delivered.lock().map_err(|error| error.to_string())?,
            [ChatId::new(2), ChatId::new(1)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn worker_waits_for_in_flight_sends_before_stopping() -> TestResult {
        let (dispatcher, receiver) = channel(8);
        let mut sender = MockMessageSender::new();

        sender.expect_send_message().times(5).returning(|_| Ok(()));

        for chat in 0..5 {
            dispatcher.dispatch(message(chat, "hello"))?;
        }
        drop(dispatcher);

        DeliveryWorker::new(receiver, Arc::new(sender)).run().await;

        Ok(())
    }

    #[test]
    fn full_queue_is_reported_without_blocking() -> TestResult {
        let (dispatcher, _receiver) = channel(1);

        dispatcher.dispatch(message(4, "fits"))?;

        let result = dispatcher.dispatch(message(4, "overflows"));

        assert!(
            matches!(result, Err(DispatchError::QueueFull)),
            "expected QueueFull, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn stopped_worker_is_reported_as_closed() {
        let (dispatcher, receiver) = channel(4);

        drop(receiver);

        let result = dispatcher.dispatch(message(5, "late"));

        assert!(dispatcher.is_closed());

        assert!(
            matches!(result, Err(DispatchError::Closed)),
            "expected Closed, got {result:?}"
        );
    }

    #[test]
    fn zero_capacity_is_raised_to_one() -> TestResult {
        let (dispatcher, _receiver) = channel(0);

        dispatcher.dispatch(message(6, "only"))?;

        assert!(dispatcher.dispatch(message(6, "extra")).is_err());

        Ok(())
    }
}
