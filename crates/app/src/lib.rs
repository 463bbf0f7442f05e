//! Shared cart domain and persistence modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod identity;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
