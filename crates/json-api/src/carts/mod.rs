//! Carts

use salvo::prelude::Depot;
use storefront_app::{
    domain::{carts::matching::LineKey, products::models::ProductUuid},
    identity::{CartIdentity, GuestId},
};
use uuid::Uuid;

use crate::extensions::*;

pub(crate) mod errors;
pub(crate) mod handlers;
pub(crate) mod models;

/// Identity of the caller: the authenticated user from the depot, plus any
/// guest id the client sent along.
pub(crate) fn cart_identity(depot: &Depot, guest_id: Option<String>) -> CartIdentity {
    CartIdentity {
        user: depot.user_uuid(),
        guest: guest_id
            .filter(|guest| !guest.trim().is_empty())
            .map(GuestId::from),
    }
}

pub(crate) fn line_key(product_uuid: Uuid, size: Option<String>, color: Option<String>) -> LineKey {
    LineKey::new(ProductUuid::from_uuid(product_uuid), size, color)
}
