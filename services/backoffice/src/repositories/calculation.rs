//! Calculation repository for database operations

use common::error::StoreResult;
use sqlx::{PgPool, Row};

use crate::models::{Calculation, CalculationMetaUpdate};

/// Calculation repository backed by PostgreSQL
#[derive(Clone)]
pub struct CalculationRepository {
    pool: PgPool,
}

const CALC_COLUMNS: &str = "id, product_id, product_name, client_name, order_date, order_source, \
                            area_m2, layers, consumption_kg_m2, total_kg, price_per_kg, \
                            total_price, with_primer, lac_type, items, include_in_total, \
                            created_at";

// Documents written before the flag existed have include_in_total NULL,
// which counts as included.
const INCLUDED_FILTER: &str = "include_in_total IS NOT FALSE";

impl CalculationRepository {
    /// Create a new calculation repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Calculation {
        Calculation {
            id: row.get("id"),
            product_id: row.get("product_id"),
            product_name: row.get("product_name"),
            client_name: row.get("client_name"),
            order_date: row.get("order_date"),
            order_source: row.get("order_source"),
            area_m2: row.get("area_m2"),
            layers: row.get("layers"),
            consumption_kg_m2: row.get("consumption_kg_m2"),
            total_kg: row.get("total_kg"),
            price_per_kg: row.get("price_per_kg"),
            total_price: row.get("total_price"),
            with_primer: row.get("with_primer"),
            lac_type: row.get("lac_type"),
            items: row.get("items"),
            include_in_total: row
                .get::<Option<bool>, _>("include_in_total")
                .unwrap_or(true),
            created_at: row.get("created_at"),
        }
    }

    /// Get all calculations
    pub async fn find_all(&self) -> StoreResult<Vec<Calculation>> {
        let rows = sqlx::query(&format!("SELECT {CALC_COLUMNS} FROM calculations"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    /// Find a calculation by id
    pub async fn find_by_id(&self, id: &str) -> StoreResult<Option<Calculation>> {
        let row = sqlx::query(&format!(
            "SELECT {CALC_COLUMNS} FROM calculations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    /// Insert a new calculation
    pub async fn insert(&self, calc: &Calculation) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO calculations (id, product_id, product_name, client_name, order_date,
                                      order_source, area_m2, layers, consumption_kg_m2, total_kg,
                                      price_per_kg, total_price, with_primer, lac_type, items,
                                      include_in_total, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(&calc.id)
        .bind(&calc.product_id)
        .bind(&calc.product_name)
        .bind(&calc.client_name)
        .bind(&calc.order_date)
        .bind(&calc.order_source)
        .bind(calc.area_m2)
        .bind(calc.layers)
        .bind(calc.consumption_kg_m2)
        .bind(calc.total_kg)
        .bind(calc.price_per_kg)
        .bind(calc.total_price)
        .bind(calc.with_primer)
        .bind(&calc.lac_type)
        .bind(&calc.items)
        .bind(calc.include_in_total)
        .bind(calc.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Flip the include-in-total flag, returning the new value
    pub async fn toggle_included(&self, id: &str) -> StoreResult<Option<bool>> {
        let row = sqlx::query(
            r#"
            UPDATE calculations
            SET include_in_total = NOT COALESCE(include_in_total, TRUE)
            WHERE id = $1
            RETURNING include_in_total
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| row.get("include_in_total")))
    }

    /// Update the order metadata fields that were provided, returning the
    /// updated row
    pub async fn update_meta(
        &self,
        id: &str,
        update: &CalculationMetaUpdate,
    ) -> StoreResult<Option<Calculation>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE calculations
            SET client_name = COALESCE($2, client_name),
                order_date = COALESCE($3, order_date),
                order_source = COALESCE($4, order_source)
            WHERE id = $1
            RETURNING {CALC_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.client_name)
        .bind(&update.order_date)
        .bind(&update.order_source)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    /// Delete a calculation, returning whether anything matched
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM calculations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count calculations included in revenue totals
    pub async fn count_included(&self) -> StoreResult<i64> {
        let row = sqlx::query(&format!(
            "SELECT COUNT(*) AS count FROM calculations WHERE {INCLUDED_FILTER}"
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("count"))
    }

    /// Summed total price of included calculations
    pub async fn total_revenue(&self) -> StoreResult<f64> {
        let row = sqlx::query(&format!(
            "SELECT COALESCE(SUM(total_price), 0) AS total FROM calculations WHERE {INCLUDED_FILTER}"
        ))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("total"))
    }

    /// Most recent included calculations for the dashboard
    pub async fn recent_included(&self, limit: i64) -> StoreResult<Vec<Calculation>> {
        let rows = sqlx::query(&format!(
            "SELECT {CALC_COLUMNS} FROM calculations WHERE {INCLUDED_FILTER} \
             ORDER BY created_at DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }
}
