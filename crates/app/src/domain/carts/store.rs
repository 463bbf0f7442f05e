//! Cart storage seam.

use async_trait::async_trait;
use mockall::automock;
use sqlx::error::{DatabaseError, ErrorKind};
use thiserror::Error;

use crate::{
    database::Db,
    domain::carts::{
        models::Cart,
        repositories::{CartWrite, PgCartsRepository},
    },
    identity::{GuestId, UserUuid},
};

#[derive(Debug, Error)]
pub enum CartStoreError {
    /// The stored cart changed since it was read, or another cart already
    /// claims the same owner.
    #[error("cart version conflict")]
    VersionConflict,

    #[error("storage error")]
    Sql(#[source] sqlx::Error),

    #[error("malformed cart document")]
    Document(#[source] serde_json::Error),
}

impl From<sqlx::Error> for CartStoreError {
    fn from(error: sqlx::Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::VersionConflict,
            _ => Self::Sql(error),
        }
    }
}

/// `PostgreSQL` cart documents, one row per cart.
#[derive(Debug, Clone)]
pub struct PgCartStore {
    db: Db,
    repository: PgCartsRepository,
}

impl PgCartStore {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCartsRepository::new(),
        }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn find_by_user(&self, user: UserUuid) -> Result<Option<Cart>, CartStoreError> {
        let mut tx = self.db.begin().await?;

        let cart = self.repository.find_by_user(&mut tx, user).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn find_by_guest(&self, guest: &GuestId) -> Result<Option<Cart>, CartStoreError> {
        let mut tx = self.db.begin().await?;

        let cart = self.repository.find_by_guest(&mut tx, guest).await?;

        tx.commit().await?;

        Ok(cart)
    }

    async fn save(&self, cart: Cart) -> Result<Cart, CartStoreError> {
        let lines = serde_json::to_value(&cart.lines).map_err(CartStoreError::Document)?;
        let write = CartWrite { cart: &cart, lines };

        let mut tx = self.db.begin().await?;

        let saved = if cart.version == 0 {
            self.repository.insert_cart(&mut tx, write).await?
        } else {
            self.repository
                .update_cart(&mut tx, write)
                .await?
                .ok_or(CartStoreError::VersionConflict)?
        };

        tx.commit().await?;

        Ok(saved)
    }

    async fn delete_by_guest(&self, guest: &GuestId) -> Result<(), CartStoreError> {
        let mut tx = self.db.begin().await?;

        self.repository.delete_by_guest(&mut tx, guest).await?;

        tx.commit().await?;

        Ok(())
    }
}

/// Whole-document cart persistence keyed by owner.
#[automock]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// The cart owned by `user`, if any.
    async fn find_by_user(&self, user: UserUuid) -> Result<Option<Cart>, CartStoreError>;

    /// The cart owned by `guest`, if any.
    async fn find_by_guest(&self, guest: &GuestId) -> Result<Option<Cart>, CartStoreError>;

    /// Upsert `cart` by UUID.
    ///
    /// `cart.version` must equal the stored version (zero for a cart that has
    /// never been saved). The returned cart carries the bumped version and
    /// store-maintained timestamps.
    async fn save(&self, cart: Cart) -> Result<Cart, CartStoreError>;

    /// Delete the cart owned by `guest`. Deleting a missing cart is not an error.
    async fn delete_by_guest(&self, guest: &GuestId) -> Result<(), CartStoreError>;
}
