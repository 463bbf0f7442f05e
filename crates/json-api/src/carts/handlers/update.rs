//! Update Cart Item Quantity Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::{cart_identity, errors::into_status_error, line_key, models::CartResponse},
    extensions::*,
    state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    #[serde(default)]
    pub guest_id: Option<String>,

    pub product_uuid: Uuid,

    #[serde(default)]
    pub size: Option<String>,

    #[serde(default)]
    pub color: Option<String>,

    /// New exact quantity; zero or less removes the line
    pub quantity: i64,
}

/// Update Cart Item Handler
///
/// Sets the quantity of an existing line.
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent modification"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let identity = cart_identity(depot, request.guest_id);
    let key = line_key(request.product_uuid, request.size, request.color);

    let cart = state
        .app
        .carts
        .update_item_quantity(identity, key, request.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}
