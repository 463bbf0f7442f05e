//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{AddItemOutcome, NewCartItem};

use crate::{
    carts::{cart_identity, errors::into_status_error, line_key, models::CartResponse},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    /// Guest id from an earlier response; omitted by new anonymous visitors
    #[serde(default)]
    pub guest_id: Option<String>,

    pub product_uuid: Uuid,

    #[serde(default)]
    pub size: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    /// Units to add; must be at least one
    pub quantity: u32,
}

/// Add Cart Item Handler
///
/// Adds units of a product variant, creating the cart when the caller has
/// none yet.
#[endpoint(
    tags("carts"),
    summary = "Add Cart Item",
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created with the item"),
        (status_code = StatusCode::OK, description = "Item added to existing cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent modification"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let identity = cart_identity(depot, request.guest_id);

    let item = NewCartItem {
        key: line_key(request.product_uuid, request.size, request.color),
        quantity: request.quantity,
    };

    let outcome = state
        .app
        .carts
        .add_item(identity, item)
        .await
        .map_err(into_status_error)?;

    let cart = match outcome {
        AddItemOutcome::Created(cart) => {
            res.status_code(StatusCode::CREATED);

            cart
        }
        AddItemOutcome::Updated(cart) => cart,
    };

    Ok(Json(cart.into()))
}
