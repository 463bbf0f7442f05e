//! Cart Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        carts::{
            errors::InvalidInput,
            matching::{LineKey, find_line, find_line_mut},
            pricing::total_price,
        },
        products::models::{CatalogProduct, ProductUuid},
    },
    identity::{GuestId, UserUuid},
    uuids::TypedUuid,
};

/// Cart UUID
pub type CartUuid = TypedUuid<Cart>;

/// The single owner of a cart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CartOwner {
    User(UserUuid),
    Guest(GuestId),
}

impl CartOwner {
    #[must_use]
    pub fn user_uuid(&self) -> Option<UserUuid> {
        match self {
            Self::User(user) => Some(*user),
            Self::Guest(_) => None,
        }
    }

    #[must_use]
    pub fn guest_id(&self) -> Option<&GuestId> {
        match self {
            Self::User(_) => None,
            Self::Guest(guest) => Some(guest),
        }
    }
}

/// Cart Model
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub uuid: CartUuid,
    pub owner: CartOwner,
    pub lines: Vec<CartLine>,
    pub total_price: u64,

    /// Optimistic concurrency counter; zero until first persisted.
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One product variant in a cart, with catalog fields captured when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_uuid: ProductUuid,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: u32,
    pub name: String,
    pub price: u64,
    pub image: String,
}

impl CartLine {
    /// Snapshot a catalog product into a new line.
    #[must_use]
    pub fn from_product(product: &CatalogProduct, item: &NewCartItem) -> Self {
        Self {
            product_uuid: product.uuid,
            size: item.key.size.clone(),
            color: item.key.color.clone(),
            quantity: item.quantity,
            name: product.name.clone(),
            price: product.price,
            image: product.primary_image_url().to_string(),
        }
    }
}

/// New Cart Item Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub key: LineKey,
    pub quantity: u32,
}

/// Result of adding an item, distinguishing a freshly created cart.
#[derive(Debug, Clone, PartialEq)]
pub enum AddItemOutcome {
    Created(Cart),
    Updated(Cart),
}

impl AddItemOutcome {
    #[must_use]
    pub fn cart(&self) -> &Cart {
        match self {
            Self::Created(cart) | Self::Updated(cart) => cart,
        }
    }

    #[must_use]
    pub fn into_cart(self) -> Cart {
        match self {
            Self::Created(cart) | Self::Updated(cart) => cart,
        }
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

impl Cart {
    /// An unsaved cart holding a single line.
    ///
    /// # Errors
    ///
    /// Returns an error when the line total overflows.
    pub fn with_line(owner: CartOwner, line: CartLine) -> Result<Self, InvalidInput> {
        let now = Timestamp::now();

        let mut cart = Self {
            uuid: CartUuid::new(),
            owner,
            lines: vec![line],
            total_price: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        };

        cart.recalculate()?;

        Ok(cart)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` onto the line matching `line`, or append `line` as-is.
    ///
    /// # Errors
    ///
    /// Returns an error when the quantity or total overflows.
    pub fn add_line(&mut self, line: CartLine) -> Result<(), InvalidInput> {
        let mut lines = self.lines.clone();

        merge_line(&mut lines, line)?;

        self.replace_lines(lines)
    }

    /// Set the exact quantity of a line; zero or less removes it.
    ///
    /// Returns `Ok(false)` when no line matches `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the quantity does not fit or the total overflows.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<bool, InvalidInput> {
        let Some(index) = find_line(&self.lines, key) else {
            return Ok(false);
        };

        let mut lines = self.lines.clone();

        if quantity <= 0 {
            lines.remove(index);
        } else {
            let quantity =
                u32::try_from(quantity).map_err(|_overflow| InvalidInput::QuantityOverflow)?;

            if let Some(line) = lines.get_mut(index) {
                line.quantity = quantity;
            }
        }

        self.replace_lines(lines)?;

        Ok(true)
    }

    /// Remove the line matching `key`. Returns `Ok(false)` when there is none.
    ///
    /// # Errors
    ///
    /// Returns an error when the remaining total overflows.
    pub fn remove_line(&mut self, key: &LineKey) -> Result<bool, InvalidInput> {
        let Some(index) = find_line(&self.lines, key) else {
            return Ok(false);
        };

        let mut lines = self.lines.clone();
        lines.remove(index);

        self.replace_lines(lines)?;

        Ok(true)
    }

    /// Fold every line of `guest` into this cart in the guest's stored order.
    ///
    /// # Errors
    ///
    /// Returns an error when a merged quantity or the total overflows.
    pub fn absorb(&mut self, guest: Vec<CartLine>) -> Result<(), InvalidInput> {
        let mut lines = self.lines.clone();

        for line in guest {
            merge_line(&mut lines, line)?;
        }

        self.replace_lines(lines)
    }

    /// Recompute the total from scratch.
    ///
    /// # Errors
    ///
    /// Returns an error when the total overflows.
    pub fn recalculate(&mut self) -> Result<(), InvalidInput> {
        self.total_price = total_price(&self.lines)?;

        Ok(())
    }

    /// Price `lines` and install them. On error the cart is left untouched.
    fn replace_lines(&mut self, lines: Vec<CartLine>) -> Result<(), InvalidInput> {
        self.total_price = total_price(&lines)?;
        self.lines = lines;

        Ok(())
    }
}

fn merge_line(lines: &mut Vec<CartLine>, line: CartLine) -> Result<(), InvalidInput> {
    if let Some(existing) = find_line_mut(lines, &LineKey::of(&line)) {
        existing.quantity = existing
            .quantity
            .checked_add(line.quantity)
            .ok_or(InvalidInput::QuantityOverflow)?;
    } else {
        lines.push(line);
    }

    Ok(())
}
