//! Postgres-backed product store (the relational primary).
//!
//! Expects this table to exist; schema management is out of scope here:
//!
//! ```sql
//! CREATE TABLE products (
//!     id          BIGSERIAL PRIMARY KEY,
//!     name        VARCHAR(100) NOT NULL,
//!     description TEXT NOT NULL,
//!     price       DOUBLE PRECISION NOT NULL,
//!     stock       BIGINT NOT NULL
//! );
//! ```
//!
//! ## Error Mapping
//!
//! | SQLx Error | RepositoryError |
//! |------------|-----------------|
//! | RowNotFound | `NotFound` |
//! | Database (any code) | `Backend` |
//! | PoolClosed / Io / other | `Backend` |
//!
//! Ids that do not parse as `i64` never reach a query. Lookups reject them as
//! `InvalidId`; updates and deletes treat them as matching zero rows.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use catalog_products::Product;

use super::r#trait::{ProductRepository, RepositoryError, RepositoryResult};

/// Postgres product store.
///
/// Uses the SQLx connection pool, which is thread-safe (Arc + Send + Sync).
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: Arc<PgPool>,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }
}

fn parse_id(id: &str) -> RepositoryResult<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| RepositoryError::InvalidId(id.to_string()))
}

/// Key for a write, or `None` when no row can carry this id.
fn write_key(operation: &str, id: &str) -> Option<i64> {
    let key = parse_id(id).ok();
    if key.is_none() {
        tracing::debug!(operation, product_id = %id, "non-numeric id matches no rows");
    }
    key
}

fn product_from_row(row: &PgRow) -> RepositoryResult<Product> {
    let decode = |e: sqlx::Error| RepositoryError::backend(format!("failed to decode product row: {e}"));

    Ok(Product {
        id: row.try_get::<i64, _>("id").map_err(decode)?.to_string(),
        name: row.try_get("name").map_err(decode)?,
        description: row.try_get("description").map_err(decode)?,
        price: row.try_get("price").map_err(decode)?,
        stock: row.try_get("stock").map_err(decode)?,
    })
}

fn map_sqlx_error(operation: &str, id: Option<&str>, err: sqlx::Error) -> RepositoryError {
    match err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound(id.unwrap_or_default().to_string()),
        sqlx::Error::Database(db_err) => RepositoryError::backend(format!(
            "database error in {operation}: {}",
            db_err.message()
        )),
        sqlx::Error::PoolClosed => {
            RepositoryError::backend(format!("connection pool closed in {operation}"))
        }
        other => RepositoryError::backend(format!("sqlx error in {operation}: {other}")),
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self, product), fields(store = "postgres"), err)]
    async fn create(&self, product: &mut Product) -> RepositoryResult<()> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, stock)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("create", None, e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| map_sqlx_error("create", None, e))?;
        product.id = id.to_string();
        Ok(())
    }

    #[instrument(skip(self), fields(store = "postgres"), err)]
    async fn get_all(&self) -> RepositoryResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, stock
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_all", None, e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), fields(store = "postgres"), err(level = "debug"))]
    async fn get_by_id(&self, id: &str) -> RepositoryResult<Product> {
        let key = parse_id(id)?;

        let row = sqlx::query(
            r#"
            SELECT id, name, description, price, stock
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(key)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get_by_id", Some(id), e))?;

        product_from_row(&row)
    }

    #[instrument(skip(self, product), fields(store = "postgres"), err)]
    async fn update(&self, id: &str, product: &Product) -> RepositoryResult<()> {
        let Some(key) = write_key("update", id) else {
            return Ok(());
        };

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, price = $3, stock = $4
            WHERE id = $5
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(product.stock)
        .bind(key)
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", Some(id), e))?;

        tracing::debug!(rows_affected = result.rows_affected(), "product row updated");
        Ok(())
    }

    #[instrument(skip(self), fields(store = "postgres"), err)]
    async fn delete(&self, id: &str) -> RepositoryResult<()> {
        let Some(key) = write_key("delete", id) else {
            return Ok(());
        };

        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(key)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", Some(id), e))?;

        tracing::debug!(rows_affected = result.rows_affected(), "product row deleted");
        Ok(())
    }
}
