//! Carts

pub mod errors;
mod locks;
pub mod matching;
pub mod models;
pub mod pricing;
mod repositories;
pub mod service;
pub mod store;

pub use errors::{CartsServiceError, InvalidInput, InvalidState};
pub use service::*;
pub use store::{CartStore, CartStoreError, MockCartStore, PgCartStore};
