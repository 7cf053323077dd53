//! PostgreSQL implementation of the persistence port

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::FromRow;
use std::str::FromStr;

use super::error::{RepositoryError, RepositoryOperation};
use super::{ProductRepository, RepositoryResult};
use crate::ids::ProductId;
use crate::model::Product;

/// Product store backed by the `products` table.
///
/// Rows are ordered by `id_product` everywhere, which is a time-sortable
/// TypeID, so page order is stable and reflects creation order.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Create a repository over an established connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Raw row shape; identities are parsed into [`ProductId`] on the way out.
#[derive(Debug, FromRow)]
struct ProductRow {
    id_product: String,
    product_name: String,
    price: i64,
    count: i64,
    image_url: String,
}

impl ProductRow {
    fn into_product(self, operation: RepositoryOperation) -> RepositoryResult<Product> {
        let id = ProductId::from_str(&self.id_product).map_err(|e| {
            RepositoryError::type_conversion(operation, e.to_string())
                .with_context(self.id_product.clone())
        })?;

        Ok(Product {
            id,
            name: self.product_name,
            price: self.price,
            count: self.count,
            image_url: self.image_url,
        })
    }
}

/// Map a sqlx failure onto the repository error taxonomy.
fn map_sqlx_error(operation: RepositoryOperation, error: sqlx::Error) -> RepositoryError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepositoryError::already_exists(operation, db.message().to_string())
        }
        sqlx::Error::PoolTimedOut => {
            RepositoryError::timeout(operation, "connection pool timed out")
        }
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => {
            RepositoryError::connection_failed(operation, error.to_string())
        }
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            RepositoryError::connection_failed(operation, error.to_string())
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::type_conversion(operation, error.to_string())
        }
        _ => RepositoryError::query_failed(operation, error.to_string()),
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn count_all(&self) -> RepositoryResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(RepositoryOperation::CountAll, e))?;

        Ok(count.max(0) as u64)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id_product, product_name, price, count, image_url \
             FROM products ORDER BY id_product",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(RepositoryOperation::FindAll, e))?;

        rows.into_iter()
            .map(|row| row.into_product(RepositoryOperation::FindAll))
            .collect()
    }

    async fn find_page(&self, limit: u32, offset: u64) -> RepositoryResult<(Vec<Product>, u64)> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            "SELECT id_product, product_name, price, count, image_url \
             FROM products ORDER BY id_product LIMIT $1 OFFSET $2",
        )
        .bind(i64::from(limit))
        .bind(offset as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(RepositoryOperation::FindPage, e))?;

        // The total is counted separately so it covers the whole table.
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(RepositoryOperation::FindPage, e))?;

        let products = rows
            .into_iter()
            .map(|row| row.into_product(RepositoryOperation::FindPage))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((products, total.max(0) as u64))
    }

    async fn find_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id_product, product_name, price, count, image_url \
             FROM products WHERE id_product = $1",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(RepositoryOperation::FindById, e))?;

        row.map(|r| r.into_product(RepositoryOperation::FindById))
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> RepositoryResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(
            "SELECT id_product, product_name, price, count, image_url \
             FROM products WHERE product_name = $1 ORDER BY id_product LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(RepositoryOperation::FindByName, e))?;

        row.map(|r| r.into_product(RepositoryOperation::FindByName))
            .transpose()
    }

    async fn insert(&self, product: &Product) -> RepositoryResult<()> {
        sqlx::query(
            "INSERT INTO products (id_product, product_name, price, count, image_url) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.count)
        .bind(&product.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(RepositoryOperation::Insert, e)
                .with_context(product.id.as_str().to_string())
        })?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> RepositoryResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET product_name = $2, price = $3, count = $4, image_url = $5 \
             WHERE id_product = $1",
        )
        .bind(product.id.as_str())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.count)
        .bind(&product.image_url)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_sqlx_error(RepositoryOperation::Update, e)
                .with_context(product.id.as_str().to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &ProductId) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id_product = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_sqlx_error(RepositoryOperation::Delete, e)
                    .with_context(id.as_str().to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryErrorKind;

    #[test]
    fn test_map_pool_timeout_is_retriable() {
        let error = map_sqlx_error(RepositoryOperation::FindPage, sqlx::Error::PoolTimedOut);
        assert_eq!(error.kind, RepositoryErrorKind::Timeout);
        assert!(error.is_retriable());
    }

    #[test]
    fn test_map_pool_closed_is_connection_failure() {
        let error = map_sqlx_error(RepositoryOperation::CountAll, sqlx::Error::PoolClosed);
        assert_eq!(error.kind, RepositoryErrorKind::ConnectionFailed);
    }

    #[test]
    fn test_map_row_not_found_is_query_failure() {
        let error = map_sqlx_error(RepositoryOperation::FindById, sqlx::Error::RowNotFound);
        assert_eq!(error.kind, RepositoryErrorKind::QueryFailed);
        assert!(!error.is_retriable());
    }

    #[test]
    fn test_row_conversion_rejects_foreign_identity() {
        let row = ProductRow {
            id_product: "user_01h455vb4pex5vsknk084sn02q".to_string(),
            product_name: "x".to_string(),
            price: 1,
            count: 1,
            image_url: String::new(),
        };
        let error = row.into_product(RepositoryOperation::FindById).unwrap_err();
        assert_eq!(error.kind, RepositoryErrorKind::TypeConversion);
    }

    #[test]
    fn test_row_conversion_roundtrip() {
        let id = ProductId::new();
        let row = ProductRow {
            id_product: id.as_str().to_string(),
            product_name: "Teh Melati".to_string(),
            price: 12000,
            count: 4,
            image_url: "https://img.example/teh.png".to_string(),
        };
        let product = row.into_product(RepositoryOperation::FindById).unwrap();
        assert_eq!(product.id, id);
        assert_eq!(product.name, "Teh Melati");
    }
}
