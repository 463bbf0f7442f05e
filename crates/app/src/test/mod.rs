//! Shared test support.


pub(crate) use context::TestContext;
pub(crate) use db::TestDb;
pub(crate) use memory::{InMemoryCartStore, SequentialGuestIds, StaticProducts};
