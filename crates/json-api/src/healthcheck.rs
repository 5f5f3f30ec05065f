//! Healthcheck Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{extensions::*, state::State};

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
}

/// Healthcheck handler
///
/// Reports `ok` while the delivery worker is accepting messages.
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    if state.app.dispatcher.is_closed() {
        res.status_code(StatusCode::SERVICE_UNAVAILABLE);

        return Ok(Json(HealthResponse {
            status: "delivery_stopped".to_string(),
        }));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
