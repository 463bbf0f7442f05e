//! Remove Cart Item Handler

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

/// Remove Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveCartItemRequest {
    #[serde(default)]
    pub guest_id: Option<String>,

    pub product_uuid: Uuid,

    #[serde(default)]
    pub size: Option<String>,

    #[serde(default)]
    pub color: Option<String>,
}

/// Remove Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Remove Cart Item",
    responses(
        (status_code = StatusCode::OK, description = "Line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or line not found"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent modification"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();
    let identity = cart_identity(depot, request.guest_id);
    let key = line_key(request.product_uuid, request.size, request.color);

    let cart = state
        .app
        .carts
        .remove_item(identity, key)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use serde_json::json;
    use testresult::TestResult;

    use storefront_app::{
        domain::carts::{CartsServiceError, MockCartsService, models::CartOwner},
        identity::UserUuid,
    };

    use crate::{
        identity::USER_UUID_HEADER,
        test_helpers::{carts_service, make_cart},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").delete(handler))
    }

    #[tokio::test]
    async fn test_remove_item_returns_200() -> TestResult {
        let user = Uuid::now_v7();
        let product = Uuid::now_v7();
        let cart = make_cart(CartOwner::User(UserUuid::from_uuid(user)));

        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |identity, key| {
                identity.user == Some(UserUuid::from_uuid(user))
                    && key.product_uuid.into_uuid() == product
                    && key.size.as_deref() == Some("L")
            })
            .return_once(move |_, _| Ok(cart));

        let res = TestClient::delete("http://example.com/cart")
            .add_header(USER_UUID_HEADER, user.to_string(), true)
            .json(&json!({ "product_uuid": product, "size": "L" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_from_missing_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete("http://example.com/cart")
            .json(&json!({ "guest_id": "guest_gone", "product_uuid": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
