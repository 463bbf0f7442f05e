//! Merge Guest Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use storefront_app::identity::GuestId;

use crate::{
    carts::{errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Merge Guest Cart Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MergeCartRequest {
    /// The guest id the client used before signing in
    pub guest_id: String,
}

/// Merge Guest Cart Handler
///
/// Folds the guest's cart into the signed-in user's cart. Called once at
/// login; repeating it returns the user's cart unchanged.
#[endpoint(
    tags("carts"),
    summary = "Merge Guest Cart",
    responses(
        (status_code = StatusCode::OK, description = "Carts merged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Guest cart is empty"),
        (status_code = StatusCode::UNAUTHORIZED, description = "No signed-in user"),
        (status_code = StatusCode::NOT_FOUND, description = "Neither cart exists"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent modification"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<MergeCartRequest>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;
    let guest_id = json.into_inner().guest_id;

    if guest_id.trim().is_empty() {
        return Err(StatusError::bad_request().brief("guest_id must not be empty"));
    }

    let cart = state
        .app
        .carts
        .merge_guest_cart(user, GuestId::from(guest_id))
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::{
        domain::carts::{CartsServiceError, InvalidState, MockCartsService, models::CartOwner},
        identity::UserUuid,
    };

    use crate::{
        identity::USER_UUID_HEADER,
        test_helpers::{carts_service, make_cart},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart/merge").post(handler))
    }

    #[tokio::test]
    async fn test_merge_returns_user_cart() -> TestResult {
        let user = Uuid::now_v7();
        let cart = make_cart(CartOwner::User(UserUuid::from_uuid(user)));

        let mut carts = MockCartsService::new();

        carts
            .expect_merge_guest_cart()
            .once()
            .withf(move |u, guest| {
                *u == UserUuid::from_uuid(user) && *guest == GuestId::new("guest_1")
            })
            .return_once(move |_, _| Ok(cart));

        let mut res = TestClient::post("http://example.com/cart/merge")
            .add_header(USER_UUID_HEADER, user.to_string(), true)
            .json(&json!({ "guest_id": "guest_1" }))
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.user_uuid, Some(user));

        Ok(())
    }

    #[tokio::test]
    async fn test_merge_without_user_returns_401() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_merge_guest_cart().never();

        let res = TestClient::post("http://example.com/cart/merge")
            .json(&json!({ "guest_id": "guest_1" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_merge_empty_guest_cart_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_merge_guest_cart()
            .once()
            .return_once(|_, _| Err(CartsServiceError::InvalidState(InvalidState::EmptyGuestCart)));

        let res = TestClient::post("http://example.com/cart/merge")
            .add_header(USER_UUID_HEADER, Uuid::now_v7().to_string(), true)
            .json(&json!({ "guest_id": "guest_empty" }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_merge_blank_guest_id_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts.expect_merge_guest_cart().never();

        let res = TestClient::post("http://example.com/cart/merge")
            .add_header(USER_UUID_HEADER, Uuid::now_v7().to_string(), true)
            .json(&json!({ "guest_id": "  " }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
