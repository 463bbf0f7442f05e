//! Get Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    carts::{cart_identity, errors::into_status_error, models::CartResponse},
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the signed-in user's cart, or the cart of `guest_id` for
/// anonymous callers.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "No cart for this caller"),
    ),
)]
pub(crate) async fn handler(
    guest_id: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let identity = cart_identity(depot, guest_id.into_inner());

    let cart = state
        .app
        .carts
        .get_cart(identity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(cart.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use uuid::Uuid;

    use storefront_app::{
        domain::carts::{CartsServiceError, MockCartsService, models::CartOwner},
        identity::{GuestId, UserUuid},
    };

    use crate::{
        identity::USER_UUID_HEADER,
        test_helpers::{carts_service, make_cart},
    };

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        carts_service(carts, Router::with_path("cart").get(handler))
    }

    #[tokio::test]
    async fn test_get_guest_cart_returns_200() -> TestResult {
        let mut carts = MockCartsService::new();
        let cart = make_cart(CartOwner::Guest(GuestId::new("guest_1")));

        carts
            .expect_get_cart()
            .once()
            .withf(|identity| {
                identity.user.is_none() && identity.guest == Some(GuestId::new("guest_1"))
            })
            .return_once(move |_| Ok(cart));

        let mut res = TestClient::get("http://example.com/cart?guest_id=guest_1")
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.guest_id.as_deref(), Some("guest_1"));
        assert_eq!(body.user_uuid, None);
        assert_eq!(body.total_price, 20_00);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_forwards_user_header_and_guest_query() -> TestResult {
        let mut carts = MockCartsService::new();
        let user = Uuid::now_v7();
        let cart = make_cart(CartOwner::User(UserUuid::from_uuid(user)));

        carts
            .expect_get_cart()
            .once()
            .withf(move |identity| {
                identity.user == Some(UserUuid::from_uuid(user))
                    && identity.guest == Some(GuestId::new("guest_2"))
            })
            .return_once(move |_| Ok(cart));

        let mut res = TestClient::get("http://example.com/cart?guest_id=guest_2")
            .add_header(USER_UUID_HEADER, user.to_string(), true)
            .send(&make_service(carts))
            .await;

        let body: CartResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.user_uuid, Some(user));
        assert_eq!(body.guest_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_get_cart()
            .once()
            .withf(|identity| identity.is_anonymous())
            .return_once(|_| Err(CartsServiceError::NotFound));

        let res = TestClient::get("http://example.com/cart")
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
