//! Cart Handlers

pub(crate) mod add;
pub(crate) mod get;
pub(crate) mod merge;
pub(crate) mod remove;
pub(crate) mod update;
