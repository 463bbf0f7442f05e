//! Errors

use salvo::http::StatusError;
use tracing::error;

use storefront_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::InvalidInput(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        CartsServiceError::InvalidState(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::ItemNotFound => {
            StatusError::not_found().brief("Item not found in cart")
        }
        CartsServiceError::Conflict => {
            StatusError::conflict().brief("Cart was modified concurrently, retry the request")
        }
        CartsServiceError::Store(source) => {
            error!("cart storage failed: {source}");

            StatusError::internal_server_error()
        }
        CartsServiceError::ProductLookup(source) => {
            error!("product lookup failed: {source}");

            StatusError::internal_server_error()
        }
    }
}
