//! Product lookup errors.

use std::num::TryFromIntError;

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProductLookupError {
    #[error("product not found")]
    NotFound,

    #[error("invalid price value")]
    InvalidPrice(#[from] TryFromIntError),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductLookupError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        Self::Sql(error)
    }
}
