//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};
use uuid::Uuid;

use crate::{
    domain::carts::models::{Cart, CartLine, CartOwner, CartUuid},
    identity::{GuestId, UserUuid},
};

const FIND_CART_BY_USER_SQL: &str = include_str!("../sql/find_cart_by_user.sql");
const FIND_CART_BY_GUEST_SQL: &str = include_str!("../sql/find_cart_by_guest.sql");
const INSERT_CART_SQL: &str = include_str!("../sql/insert_cart.sql");
const UPDATE_CART_SQL: &str = include_str!("../sql/update_cart.sql");
const DELETE_CART_BY_GUEST_SQL: &str = include_str!("../sql/delete_cart_by_guest.sql");

/// Column values for writing a cart; `lines` is already serialised.
#[derive(Debug)]
pub(crate) struct CartWrite<'a> {
    pub(crate) cart: &'a Cart,
    pub(crate) lines: Value,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_by_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(FIND_CART_BY_USER_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn find_by_guest(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        guest: &GuestId,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(FIND_CART_BY_GUEST_SQL)
            .bind(guest.as_str())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn insert_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        write: CartWrite<'_>,
    ) -> Result<Cart, sqlx::Error> {
        let cart = write.cart;

        query_as::<Postgres, Cart>(INSERT_CART_SQL)
            .bind(cart.uuid.into_uuid())
            .bind(cart.owner.user_uuid().map(UserUuid::into_uuid))
            .bind(cart.owner.guest_id().map(GuestId::as_str))
            .bind(write.lines)
            .bind(to_i64(cart.total_price, "total_price")?)
            .fetch_one(&mut **tx)
            .await
    }

    /// Returns `None` when the stored version no longer matches.
    pub(crate) async fn update_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        write: CartWrite<'_>,
    ) -> Result<Option<Cart>, sqlx::Error> {
        let cart = write.cart;

        query_as::<Postgres, Cart>(UPDATE_CART_SQL)
            .bind(cart.uuid.into_uuid())
            .bind(cart.owner.user_uuid().map(UserUuid::into_uuid))
            .bind(cart.owner.guest_id().map(GuestId::as_str))
            .bind(write.lines)
            .bind(to_i64(cart.total_price, "total_price")?)
            .bind(to_i64(cart.version, "version")?)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn delete_by_guest(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        guest: &GuestId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_CART_BY_GUEST_SQL)
            .bind(guest.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let user: Option<Uuid> = row.try_get("user_uuid")?;
        let guest: Option<String> = row.try_get("guest_id")?;

        let owner = match (user, guest) {
            (Some(user), None) => CartOwner::User(UserUuid::from_uuid(user)),
            (None, Some(guest)) => CartOwner::Guest(GuestId::from(guest)),
            _ => {
                return Err(sqlx::Error::ColumnDecode {
                    index: "user_uuid".to_string(),
                    source: "cart must have exactly one owner".into(),
                });
            }
        };

        Ok(Self {
            uuid: CartUuid::from_uuid(row.try_get("uuid")?),
            owner,
            lines: row.try_get::<Json<Vec<CartLine>>, _>("lines")?.0,
            total_price: try_get_amount(row, "total_price")?,
            version: try_get_amount(row, "version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

fn try_get_amount(row: &PgRow, col: &str) -> Result<u64, sqlx::Error> {
    let amount_i64: i64 = row.try_get(col)?;

    u64::try_from(amount_i64).map_err(|e| sqlx::Error::ColumnDecode {
        index: col.to_string(),
        source: Box::new(e),
    })
}

fn to_i64(value: u64, col: &str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| sqlx::Error::Encode(format!("{col}: {e}").into()))
}
