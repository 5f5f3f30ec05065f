//! Outbound message delivery

mod dispatcher;
mod errors;
mod models;
mod sender;
mod telegram;

pub use dispatcher::*;
pub use errors::*;
pub use models::*;
pub use sender::*;
pub use telegram::*;
