//! Carts service errors.

use thiserror::Error;

use crate::domain::{carts::store::CartStoreError, products::ProductLookupError};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("cart not found")]
    NotFound,

    #[error("item not found in cart")]
    ItemNotFound,

    #[error("invalid state: {0}")]
    InvalidState(#[from] InvalidState),

    #[error("cart was modified concurrently")]
    Conflict,

    #[error("storage error")]
    Store(#[source] CartStoreError),

    #[error("product lookup failed")]
    ProductLookup(#[source] ProductLookupError),
}

/// Caller-supplied data that cannot be applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("quantity must be at least one")]
    ZeroQuantity,

    #[error("product does not exist")]
    UnknownProduct,

    #[error("product price is invalid")]
    InvalidPrice,

    #[error("quantity is too large")]
    QuantityOverflow,

    #[error("cart total is too large")]
    PriceOverflow,
}

/// Stored carts that an operation refuses to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidState {
    #[error("guest cart is empty")]
    EmptyGuestCart,
}

impl From<CartStoreError> for CartsServiceError {
    fn from(error: CartStoreError) -> Self {
        match error {
            CartStoreError::VersionConflict => Self::Conflict,
            CartStoreError::Sql(_) | CartStoreError::Document(_) => Self::Store(error),
        }
    }
}

impl From<ProductLookupError> for CartsServiceError {
    fn from(error: ProductLookupError) -> Self {
        match error {
            ProductLookupError::NotFound => Self::InvalidInput(InvalidInput::UnknownProduct),
            ProductLookupError::InvalidPrice(_) => Self::InvalidInput(InvalidInput::InvalidPrice),
            ProductLookupError::Sql(_) => Self::ProductLookup(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_conflict_maps_to_conflict() {
        let error = CartsServiceError::from(CartStoreError::VersionConflict);

        assert!(matches!(error, CartsServiceError::Conflict), "got {error:?}");
    }

    #[test]
    fn unknown_product_is_invalid_input() {
        let error = CartsServiceError::from(ProductLookupError::NotFound);

        assert!(
            matches!(
                error,
                CartsServiceError::InvalidInput(InvalidInput::UnknownProduct)
            ),
            "got {error:?}"
        );
    }

    #[test]
    fn lookup_storage_failure_is_internal() {
        let error = CartsServiceError::from(ProductLookupError::Sql(sqlx::Error::PoolClosed));

        assert!(matches!(error, CartsServiceError::ProductLookup(_)), "got {error:?}");
    }
}
