//! Products Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, types::Json};

use crate::domain::products::models::{ProductImage, ProductUuid};

const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");

/// Product row as stored; the price is validated by the caller.
#[derive(Debug, Clone)]
pub(crate) struct ProductRow {
    pub(crate) uuid: ProductUuid,
    pub(crate) name: String,
    pub(crate) price: i64,
    pub(crate) images: Vec<ProductImage>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRow, sqlx::Error> {
        query_as::<Postgres, ProductRow>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRow {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            images: row.try_get::<Json<Vec<ProductImage>>, _>("images")?.0,
        })
    }
}
