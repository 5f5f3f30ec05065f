//! Relay Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde::Deserialize;
use tracing::{error, info, warn};

use relay_app::delivery::OutboundMessage;

use crate::{
    extensions::*, observability::observe_relay_outcome, relay::outcome::RelayOutcome,
    state::State,
};

/// Relay Request
#[derive(Debug, Deserialize)]
pub(crate) struct RelayRequest {
    pub token: String,
    pub message: String,
}

/// Relay a message to the token owner's private chat.
///
/// Responds once the message is queued; delivery happens in the background.
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let outcome = relay(req, depot).await;

    observe_relay_outcome(outcome.label());

    res.render(outcome);
}

async fn relay(req: &mut Request, depot: &Depot) -> RelayOutcome {
    let Ok(state) = depot.obtain::<Arc<State>>() else {
        error!("application state missing from depot");
        return RelayOutcome::Internal;
    };

    let request = match req.read_json::<RelayRequest>().await {
        Ok(request) => request,
        Err(source) => {
            warn!("rejecting relay request: {source}");
            return RelayOutcome::MalformedBody;
        }
    };

    let user = match state.app.auth.authenticate(&request.token).await {
        Ok(user) => user,
        Err(error) => return error.into(),
    };

    let message = OutboundMessage::new(user.private_chat(), request.message);

    if let Err(source) = state.app.dispatcher.dispatch(message) {
        error!(%user, "failed to queue relayed message: {source}");

        return RelayOutcome::Internal;
    }

    info!(%user, "relayed message queued");

    RelayOutcome::Delivered
}
