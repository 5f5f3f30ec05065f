//! Token lifecycle and authentication

mod errors;
pub mod legacy;
mod manager;
mod models;
mod repository;
mod service;
pub mod token;

pub use errors::*;
pub use legacy::Salt;
pub use manager::*;
pub use models::*;
pub use repository::*;
pub use service::*;
pub use token::PresentedToken;
