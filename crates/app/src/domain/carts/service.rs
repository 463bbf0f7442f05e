//! Carts service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::{CartsServiceError, InvalidInput, InvalidState},
            locks::OwnerLocks,
            matching::LineKey,
            models::{AddItemOutcome, Cart, CartLine, CartOwner, NewCartItem},
            store::{CartStore, CartStoreError, PgCartStore},
        },
        products::{PgProductLookup, ProductLookup},
    },
    identity::{CartIdentity, GuestId, GuestIdGenerator, TimeOrderedGuestIds, UserUuid},
};

/// Cart operations over a [`CartStore`] and a [`ProductLookup`].
///
/// Every read-modify-write episode runs under the owner's lock; the store's
/// version check catches writers outside this process.
pub struct StoreCartsService {
    store: Arc<dyn CartStore>,
    products: Arc<dyn ProductLookup>,
    guest_ids: Arc<dyn GuestIdGenerator>,
    locks: OwnerLocks,
}

impl StoreCartsService {
    #[must_use]
    pub fn new(
        store: Arc<dyn CartStore>,
        products: Arc<dyn ProductLookup>,
        guest_ids: Arc<dyn GuestIdGenerator>,
    ) -> Self {
        Self {
            store,
            products,
            guest_ids,
            locks: OwnerLocks::new(),
        }
    }

    /// Service backed by `PostgreSQL` carts and products.
    #[must_use]
    pub fn postgres(db: Db) -> Self {
        Self::new(
            Arc::new(PgCartStore::new(db.clone())),
            Arc::new(PgProductLookup::new(db)),
            Arc::new(TimeOrderedGuestIds),
        )
    }

    async fn find(&self, owner: &CartOwner) -> Result<Option<Cart>, CartStoreError> {
        match owner {
            CartOwner::User(user) => self.store.find_by_user(*user).await,
            CartOwner::Guest(guest) => self.store.find_by_guest(guest).await,
        }
    }

    async fn edit<F>(&self, identity: CartIdentity, edit: F) -> Result<Cart, CartsServiceError>
    where
        F: FnOnce(&mut Cart) -> Result<bool, InvalidInput> + Send,
    {
        let owner = resolve_owner(identity).ok_or(CartsServiceError::NotFound)?;
        let _guard = self.locks.lock([owner.clone()]).await;

        let mut cart = self
            .find(&owner)
            .await?
            .ok_or(CartsServiceError::NotFound)?;

        if !edit(&mut cart)? {
            return Err(CartsServiceError::ItemNotFound);
        }

        Ok(self.store.save(cart).await?)
    }
}

impl Debug for StoreCartsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("StoreCartsService")
            .field("locks", &self.locks)
            .finish_non_exhaustive()
    }
}

/// The user identity wins over the guest identity when both are present.
fn resolve_owner(identity: CartIdentity) -> Option<CartOwner> {
    identity
        .user
        .map(CartOwner::User)
        .or_else(|| identity.guest.map(CartOwner::Guest))
}

#[async_trait]
impl CartsService for StoreCartsService {
    #[tracing::instrument(name = "carts.get", skip(self), err)]
    async fn get_cart(&self, identity: CartIdentity) -> Result<Cart, CartsServiceError> {
        let owner = resolve_owner(identity).ok_or(CartsServiceError::NotFound)?;

        self.find(&owner)
            .await?
            .ok_or(CartsServiceError::NotFound)
    }

    #[tracing::instrument(name = "carts.add_item", skip(self), err)]
    async fn add_item(
        &self,
        identity: CartIdentity,
        item: NewCartItem,
    ) -> Result<AddItemOutcome, CartsServiceError> {
        if item.quantity == 0 {
            return Err(InvalidInput::ZeroQuantity.into());
        }

        let product = self.products.get_product(item.key.product_uuid).await?;

        let owner = resolve_owner(identity)
            .unwrap_or_else(|| CartOwner::Guest(self.guest_ids.generate()));

        let _guard = self.locks.lock([owner.clone()]).await;

        let line = CartLine::from_product(&product, &item);

        if let Some(mut cart) = self.find(&owner).await? {
            cart.add_line(line)?;

            let cart = self.store.save(cart).await?;

            info!(cart_uuid = %cart.uuid, total_price = cart.total_price, "added item to cart");

            return Ok(AddItemOutcome::Updated(cart));
        }

        let cart = self.store.save(Cart::with_line(owner, line)?).await?;

        info!(cart_uuid = %cart.uuid, total_price = cart.total_price, "created cart");

        Ok(AddItemOutcome::Created(cart))
    }

    #[tracing::instrument(name = "carts.update_item_quantity", skip(self), err)]
    async fn update_item_quantity(
        &self,
        identity: CartIdentity,
        item: LineKey,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError> {
        self.edit(identity, |cart| cart.set_quantity(&item, quantity))
            .await
    }

    #[tracing::instrument(name = "carts.remove_item", skip(self), err)]
    async fn remove_item(
        &self,
        identity: CartIdentity,
        item: LineKey,
    ) -> Result<Cart, CartsServiceError> {
        self.edit(identity, |cart| cart.remove_line(&item)).await
    }

    #[tracing::instrument(name = "carts.merge_guest_cart", skip(self), err)]
    async fn merge_guest_cart(
        &self,
        user: UserUuid,
        guest: GuestId,
    ) -> Result<Cart, CartsServiceError> {
        let _guard = self
            .locks
            .lock([CartOwner::User(user), CartOwner::Guest(guest.clone())])
            .await;

        let guest_cart = self.store.find_by_guest(&guest).await?;
        let user_cart = self.store.find_by_user(user).await?;

        match (guest_cart, user_cart) {
            (None, None) => Err(CartsServiceError::NotFound),
            (None, Some(user_cart)) => Ok(user_cart),
            (Some(guest_cart), _) if guest_cart.is_empty() => {
                Err(InvalidState::EmptyGuestCart.into())
            }
            (Some(mut guest_cart), None) => {
                guest_cart.owner = CartOwner::User(user);

                let cart = self.store.save(guest_cart).await?;

                info!(cart_uuid = %cart.uuid, "promoted guest cart");

                Ok(cart)
            }
            (Some(guest_cart), Some(mut user_cart)) => {
                user_cart.absorb(guest_cart.lines)?;

                let cart = self.store.save(user_cart).await?;

                if let Err(source) = self.store.delete_by_guest(&guest).await {
                    warn!(guest_id = %guest, "failed to delete merged guest cart: {source}");
                }

                info!(cart_uuid = %cart.uuid, total_price = cart.total_price, "merged guest cart");

                Ok(cart)
            }
        }
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Retrieve the cart of the user, or of the guest when no user is given.
    async fn get_cart(&self, identity: CartIdentity) -> Result<Cart, CartsServiceError>;

    /// Add a product variant, creating the cart (and a guest id) when needed.
    async fn add_item(
        &self,
        identity: CartIdentity,
        item: NewCartItem,
    ) -> Result<AddItemOutcome, CartsServiceError>;

    /// Set the exact quantity of a line; zero or less removes it.
    async fn update_item_quantity(
        &self,
        identity: CartIdentity,
        item: LineKey,
        quantity: i64,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove a line from the cart.
    async fn remove_item(
        &self,
        identity: CartIdentity,
        item: LineKey,
    ) -> Result<Cart, CartsServiceError>;

    /// Fold the guest's cart into the user's cart at login.
    async fn merge_guest_cart(
        &self,
        user: UserUuid,
        guest: GuestId,
    ) -> Result<Cart, CartsServiceError>;
}
