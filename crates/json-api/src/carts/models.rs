//! Cart response bodies.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storefront_app::domain::carts::models::{Cart, CartLine};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The unique identifier of the cart
    pub uuid: Uuid,

    /// The owning user, when the cart belongs to a signed-in user
    pub user_uuid: Option<Uuid>,

    /// The owning guest id; clients keep this to address the cart later
    pub guest_id: Option<String>,

    /// The lines in the cart, in the order they were added
    pub lines: Vec<CartLineResponse>,

    /// Sum of price times quantity over all lines, in minor units
    pub total_price: u64,

    /// Optimistic concurrency version
    pub version: u64,

    /// The date and time the cart was created
    pub created_at: String,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            uuid: cart.uuid.into_uuid(),
            user_uuid: cart.owner.user_uuid().map(|user| user.into_uuid()),
            guest_id: cart.owner.guest_id().map(ToString::to_string),
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            total_price: cart.total_price,
            version: cart.version,
            created_at: cart.created_at.to_string(),
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Line Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub product_uuid: Uuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,

    /// Product name when the line was added
    pub name: String,

    /// Unit price in minor units when the line was added
    pub price: u64,

    /// Primary product image URL when the line was added
    pub image: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            product_uuid: line.product_uuid.into_uuid(),
            size: line.size,
            color: line.color,
            quantity: line.quantity,
            name: line.name,
            price: line.price,
            image: line.image,
        }
    }
}
