//! Root banner

use salvo::prelude::*;

#[handler]
pub(crate) async fn handler() -> &'static str {
    "relay server"
}
