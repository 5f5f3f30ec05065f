//! Platform webhook

mod handlers;
mod models;

pub(crate) use handlers::handler;
