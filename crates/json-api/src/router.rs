//! App Router

use salvo::{
    http::header::{ALLOW, HeaderValue},
    prelude::*,
};

use crate::{healthcheck, index, observability, relay, webhook};

pub(crate) fn app_router() -> Router {
    Router::new()
        .get(index::handler)
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("webhook")
                .post(webhook::handler)
                .goal(post_only),
        )
        .push(
            Router::with_path("message")
                .post(relay::handler)
                .goal(post_only),
        )
}

/// Fallback for any other method on a POST-only route.
#[handler]
async fn post_only(res: &mut Response) {
    res.headers_mut()
        .insert(ALLOW, HeaderValue::from_static("POST"));
    res.status_code(StatusCode::METHOD_NOT_ALLOWED);
}
