//! Webhook Handler

use std::sync::Arc;

use salvo::prelude::*;
use tracing::{debug, warn};

use crate::{extensions::*, state::State, webhook::models::Update};

/// Platform update handler.
///
/// Replies are queued for delivery, so the platform gets `200` as soon as the
/// update is parsed, whatever happens to the reply.
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    if let Err(error) = handle_update(req, depot).await {
        res.render(error);

        return;
    }

    res.status_code(StatusCode::OK);
}

async fn handle_update(req: &mut Request, depot: &Depot) -> Result<(), StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let update = req.read_json::<Update>().await.map_err(|source| {
        warn!("rejecting webhook update: {source}");

        StatusError::bad_request().brief("Malformed update")
    })?;

    let Some(message) = update.into_incoming() else {
        debug!("ignoring update without a text message");
        return Ok(());
    };

    if state.app.commands.handle_message(message).await.is_none() {
        debug!("ignoring text that is not a command");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;

    use relay_app::{
        bot::{Command, IncomingMessage},
        ids::{ChatId, UserId},
    };

    use crate::test_helpers::{TestApp, service};

    use super::*;

    fn route() -> Router {
        Router::with_path("webhook").post(handler)
    }

    #[tokio::test]
    async fn command_is_handed_to_the_bot() {
        let mut app = TestApp::new();

        app.commands
            .expect_handle_message()
            .once()
            .withf(|message| {
                *message
                    == IncomingMessage {
                        user_id: UserId::new(42),
                        chat_id: ChatId::new(4242),
                        text: "/auth".to_string(),
                    }
            })
            .return_once(|_| Some(Command::Auth));

        let (state, _queue) = app.into_parts();

        let res = TestClient::post("http://example.com/webhook")
            .json(&json!({
                "update_id": 1,
                "message": {
                    "text": "/auth",
                    "from": { "id": 42 },
                    "chat": { "id": 4242 }
                }
            }))
            .send(&service(state, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn ordinary_text_still_returns_200() {
        let mut app = TestApp::new();

        app.commands
            .expect_handle_message()
            .once()
            .return_once(|_| None);

        let (state, _queue) = app.into_parts();

        let res = TestClient::post("http://example.com/webhook")
            .json(&json!({
                "message": { "text": "hello", "from": { "id": 1 }, "chat": { "id": 1 } }
            }))
            .send(&service(state, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn update_without_message_is_acknowledged() {
        let mut app = TestApp::new();

        app.commands.expect_handle_message().never();

        let (state, _queue) = app.into_parts();

        let res = TestClient::post("http://example.com/webhook")
            .json(&json!({ "update_id": 3, "edited_message": {} }))
            .send(&service(state, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let mut app = TestApp::new();

        app.commands.expect_handle_message().never();

        let (state, _queue) = app.into_parts();

        let res = TestClient::post("http://example.com/webhook")
            .raw_json("{\"message\": ")
            .send(&service(state, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
