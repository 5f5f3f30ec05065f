//! Chat commands for issuing and rotating tokens

mod command;
pub mod replies;
mod service;

pub use command::Command;
pub use service::*;
