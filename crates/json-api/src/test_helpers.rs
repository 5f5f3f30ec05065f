//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};
use tokio::sync::mpsc::Receiver;

use relay_app::{
    auth::{MockAuthService, MockTokensService},
    bot::MockCommandService,
    context::AppContext,
    delivery::{self, Dispatcher, OutboundMessage},
};

use crate::state::State;

/// Mocked services plus a real delivery queue whose receiving end the test keeps.
///
/// Mocks without expectations fail the test on any call.
pub(crate) struct TestApp {
    pub(crate) auth: MockAuthService,
    pub(crate) commands: MockCommandService,
    pub(crate) dispatcher: Dispatcher,
    pub(crate) queue: Receiver<OutboundMessage>,
}

impl TestApp {
    pub(crate) fn new() -> Self {
        Self::with_capacity(8)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let (dispatcher, queue) = delivery::channel(capacity);

        Self {
            auth: MockAuthService::new(),
            commands: MockCommandService::new(),
            dispatcher,
            queue,
        }
    }

    pub(crate) fn into_parts(self) -> (Arc<State>, Receiver<OutboundMessage>) {
        let app = AppContext {
            auth: Arc::new(self.auth),
            tokens: Arc::new(MockTokensService::new()),
            commands: Arc::new(self.commands),
            dispatcher: self.dispatcher,
        };

        (State::from_app_context(app), self.queue)
    }
}

pub(crate) fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}
