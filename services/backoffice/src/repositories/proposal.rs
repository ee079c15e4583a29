//! Proposal store contract and its PostgreSQL repository

use async_trait::async_trait;
use common::error::{StoreError, StoreResult};
use serde_json::Value;
use sqlx::{PgPool, Row};

use crate::models::{Kp, KpPayload, StatusChange};
use crate::proposals::KpStatus;

/// Per-status aggregate over the whole collection
#[derive(Debug, Clone, PartialEq)]
pub struct StatusTotal {
    pub status: String,
    pub count: i64,
    pub total_sum: f64,
}

/// Keyed access to the `kp` collection.
///
/// `apply_transition` is the only way status and history change; it maps to a
/// single-document update so the store's per-document atomicity covers both
/// fields together.
#[async_trait]
pub trait ProposalStore: Send + Sync {
    async fn insert(&self, kp: &Kp) -> StoreResult<()>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Kp>>;

    async fn find_all(&self) -> StoreResult<Vec<Kp>>;

    /// Replace the business fields, leaving status and history untouched.
    /// Returns false when no proposal matched.
    async fn update_fields(&self, id: &str, payload: &KpPayload) -> StoreResult<bool>;

    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Set the status and append one history entry in one update.
    /// Returns false when no proposal matched.
    async fn apply_transition(
        &self,
        id: &str,
        status: KpStatus,
        entry: &StatusChange,
    ) -> StoreResult<bool>;

    /// Count and grand-total sum per status, missing status counted as draft
    async fn status_totals(&self) -> StoreResult<Vec<StatusTotal>>;
}

/// Proposal repository backed by PostgreSQL
#[derive(Clone)]
pub struct ProposalRepository {
    pool: PgPool,
}

impl ProposalRepository {
    /// Create a new proposal repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> StoreResult<Kp> {
        let status: String = row.get("status");
        let history: Value = row.get("status_history");
        let status_history: Vec<StatusChange> =
            serde_json::from_value(history).map_err(StoreError::Decode)?;

        Ok(Kp {
            id: row.get("id"),
            title: row.get("title"),
            client: row.get("client"),
            location: row.get("location"),
            date: row.get("date"),
            settings: row.get("settings"),
            rooms: row.get("rooms"),
            additional_data: row.get("additional_data"),
            grand_total: row.get("grand_total"),
            status: KpStatus::parse(&status).unwrap_or(KpStatus::Draft),
            status_history,
            doc_type: row.get("doc_type"),
            created_at: row.get("created_at"),
        })
    }
}

const KP_COLUMNS: &str = "id, title, client, location, date, settings, rooms, additional_data, \
                          grand_total, status, status_history, doc_type, created_at";

#[async_trait]
impl ProposalStore for ProposalRepository {
    async fn insert(&self, kp: &Kp) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO kp (id, title, client, location, date, settings, rooms,
                            additional_data, grand_total, status, status_history,
                            doc_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&kp.id)
        .bind(&kp.title)
        .bind(&kp.client)
        .bind(&kp.location)
        .bind(&kp.date)
        .bind(&kp.settings)
        .bind(&kp.rooms)
        .bind(&kp.additional_data)
        .bind(kp.grand_total)
        .bind(kp.status.as_str())
        .bind(serde_json::to_value(&kp.status_history).map_err(StoreError::Decode)?)
        .bind(&kp.doc_type)
        .bind(kp.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Kp>> {
        let row = sqlx::query(&format!("SELECT {KP_COLUMNS} FROM kp WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn find_all(&self) -> StoreResult<Vec<Kp>> {
        let rows = sqlx::query(&format!(
            "SELECT {KP_COLUMNS} FROM kp ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn update_fields(&self, id: &str, payload: &KpPayload) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE kp
            SET title = $2, client = $3, location = $4, date = $5, settings = $6,
                rooms = $7, additional_data = $8, grand_total = $9
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.client)
        .bind(&payload.location)
        .bind(&payload.date)
        .bind(&payload.settings)
        .bind(&payload.rooms)
        .bind(&payload.additional_data)
        .bind(payload.grand_total)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM kp WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn apply_transition(
        &self,
        id: &str,
        status: KpStatus,
        entry: &StatusChange,
    ) -> StoreResult<bool> {
        let appended =
            serde_json::to_value(std::slice::from_ref(entry)).map_err(StoreError::Decode)?;

        let result = sqlx::query(
            r#"
            UPDATE kp
            SET status = $2, status_history = status_history || $3::jsonb
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(appended)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn status_totals(&self) -> StoreResult<Vec<StatusTotal>> {
        let rows = sqlx::query(
            r#"
            SELECT COALESCE(status, 'draft') AS status,
                   COUNT(*) AS count,
                   COALESCE(SUM(grand_total), 0) AS total_sum
            FROM kp
            GROUP BY COALESCE(status, 'draft')
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| StatusTotal {
                status: row.get("status"),
                count: row.get("count"),
                total_sum: row.get("total_sum"),
            })
            .collect())
    }
}
