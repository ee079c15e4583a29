//! Document repository for database operations

use common::error::StoreResult;
use sqlx::{PgPool, Row};

use crate::models::Document;

/// Document repository backed by PostgreSQL
#[derive(Clone)]
pub struct DocumentRepository {
    pool: PgPool,
}

impl DocumentRepository {
    /// Create a new document repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Document {
        Document {
            id: row.get("id"),
            title: row.get("title"),
            doc_type: row.get("doc_type"),
            calculation_id: row.get("calculation_id"),
            content: row.get("content"),
            created_at: row.get("created_at"),
        }
    }

    /// Get all documents
    pub async fn find_all(&self) -> StoreResult<Vec<Document>> {
        let rows = sqlx::query(
            "SELECT id, title, doc_type, calculation_id, content, created_at FROM documents",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    /// Insert a new document
    pub async fn insert(&self, document: &Document) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (id, title, doc_type, calculation_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&document.id)
        .bind(&document.title)
        .bind(&document.doc_type)
        .bind(&document.calculation_id)
        .bind(&document.content)
        .bind(document.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a document, returning whether anything matched
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all documents
    pub async fn count(&self) -> StoreResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM documents")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.get("count"))
    }
}
