//! Product repository for database operations

use common::error::StoreResult;
use sqlx::{PgPool, Row};

use crate::models::{Product, ProductPayload};

/// Product repository backed by PostgreSQL
#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Product {
        Product {
            id: row.get("id"),
            name: row.get("name"),
            price_per_kg: row.get("price_per_kg"),
            consumption_kg_m2: row.get("consumption_kg_m2"),
            description: row.get("description"),
        }
    }

    /// Get all products
    pub async fn find_all(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query(
            "SELECT id, name, price_per_kg, consumption_kg_m2, description FROM products",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    /// Insert a new product
    pub async fn insert(&self, product: &Product) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, price_per_kg, consumption_kg_m2, description)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(product.price_per_kg)
        .bind(product.consumption_kg_m2)
        .bind(&product.description)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replace a product's fields, returning the updated row
    pub async fn update(&self, id: &str, payload: &ProductPayload) -> StoreResult<Option<Product>> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, price_per_kg = $3, consumption_kg_m2 = $4, description = $5
            WHERE id = $1
            RETURNING id, name, price_per_kg, consumption_kg_m2, description
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(payload.price_per_kg)
        .bind(payload.consumption_kg_m2)
        .bind(&payload.description)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    /// Delete a product, returning whether anything matched
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all products
    pub async fn count(&self) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }
}
