//! Third-party relay endpoint

mod handlers;
mod outcome;

pub(crate) use handlers::handler;
