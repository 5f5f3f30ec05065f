//! Token-authenticated chat relay: token lifecycle, authentication, and delivery.

pub mod auth;
pub mod bot;
pub mod context;
pub mod database;
pub mod delivery;
pub mod ids;

#[cfg(test)]
mod test;
