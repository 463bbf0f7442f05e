//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartLine, CartOwner, CartUuid},
        },
        products::models::ProductUuid,
    },
};

use crate::{identity, state::State};

/// Serve `route` with the given carts mock and the identity middleware.
pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    let state = State::from_app_context(AppContext {
        carts: Arc::new(carts),
    });

    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(identity::handler)
            .push(route),
    )
}

/// A persisted cart holding two units at 10.00.
pub(crate) fn make_cart(owner: CartOwner) -> Cart {
    Cart {
        uuid: CartUuid::from_uuid(Uuid::nil()),
        owner,
        lines: vec![CartLine {
            product_uuid: ProductUuid::from_uuid(Uuid::nil()),
            size: Some("M".to_string()),
            color: None,
            quantity: 2,
            name: "Linen Shirt".to_string(),
            price: 10_00,
            image: "https://cdn.example.com/shirt.jpg".to_string(),
        }],
        total_price: 20_00,
        version: 1,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
