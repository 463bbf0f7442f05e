//! Product lookup service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductLookupError,
        models::{CatalogProduct, ProductUuid},
        repository::PgProductsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgProductLookup {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductLookup {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductLookup for PgProductLookup {
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<CatalogProduct, ProductLookupError> {
        let mut tx = self.db.begin().await?;

        let row = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(CatalogProduct {
            uuid: row.uuid,
            name: row.name,
            price: u64::try_from(row.price)?,
            images: row.images,
        })
    }
}

#[automock]
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Fetch the catalog fields of a live product.
    async fn get_product(
        &self,
        product: ProductUuid,
    ) -> Result<CatalogProduct, ProductLookupError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query;
    use testresult::TestResult;

    use crate::test::TestDb;

    use super::*;

    async fn insert_product(
        db: &TestDb,
        product: ProductUuid,
        price: i64,
        images: &str,
    ) -> TestResult {
        query("INSERT INTO products (uuid, name, price, images) VALUES ($1, $2, $3, $4::jsonb)")
            .bind(product.into_uuid())
            .bind("Canvas Tote")
            .bind(price)
            .bind(images)
            .execute(db.pool())
            .await?;

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the PostgreSQL test container"]
    async fn get_product_returns_snapshot_fields() -> TestResult {
        let db = TestDb::new().await;
        let uuid = ProductUuid::new();

        insert_product(&db, uuid, 12_50, r#"[{"url": "https://cdn.example.com/tote.jpg"}]"#)
            .await?;

        let product = PgProductLookup::new(Db::new(db.pool().clone()))
            .get_product(uuid)
            .await?;

        assert_eq!(product.uuid, uuid);
        assert_eq!(product.name, "Canvas Tote");
        assert_eq!(product.price, 12_50);
        assert_eq!(product.primary_image_url(), "https://cdn.example.com/tote.jpg");

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires Docker for the PostgreSQL test container"]
    async fn get_product_unknown_uuid_returns_not_found() {
        let db = TestDb::new().await;

        let result = PgProductLookup::new(Db::new(db.pool().clone()))
            .get_product(ProductUuid::new())
            .await;

        assert!(
            matches!(result, Err(ProductLookupError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires Docker for the PostgreSQL test container"]
    async fn get_product_negative_price_is_rejected() -> TestResult {
        let db = TestDb::new().await;
        let uuid = ProductUuid::new();

        insert_product(&db, uuid, -1, "[]").await?;

        let result = PgProductLookup::new(Db::new(db.pool().clone()))
            .get_product(uuid)
            .await;

        assert!(
            matches!(result, Err(ProductLookupError::InvalidPrice(_))),
            "expected InvalidPrice, got {result:?}"
        );

        Ok(())
    }
}
