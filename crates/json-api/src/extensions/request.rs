//! Request body helpers.

use salvo::{http::ParseError, prelude::Request};
use serde::de::DeserializeOwned;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum JsonBodyError {
    #[error("failed to read request body: {0}")]
    Payload(#[source] ParseError),

    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode a JSON body regardless of the declared content type.
pub(crate) trait RequestExt {
    async fn read_json<T: DeserializeOwned>(&mut self) -> Result<T, JsonBodyError>;
}

impl RequestExt for Request {
    async fn read_json<T: DeserializeOwned>(&mut self) -> Result<T, JsonBodyError> {
        let payload = self.payload().await.map_err(JsonBodyError::Payload)?;

        Ok(serde_json::from_slice(payload)?)
    }
}
