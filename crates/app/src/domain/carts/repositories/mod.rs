//! Cart Repositories

mod carts;

pub(crate) use carts::{CartWrite, PgCartsRepository};
