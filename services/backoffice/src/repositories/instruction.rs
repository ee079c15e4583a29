//! Instruction repository for database operations

use common::error::StoreResult;
use sqlx::{PgPool, Row};

use crate::models::{Instruction, InstructionPayload};

/// Instruction repository backed by PostgreSQL
#[derive(Clone)]
pub struct InstructionRepository {
    pool: PgPool,
}

const INSTRUCTION_COLUMNS: &str =
    "id, title, category, content, file_name, file_data, file_type, created_at";

impl InstructionRepository {
    /// Create a new instruction repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn from_row(row: &sqlx::postgres::PgRow) -> Instruction {
        Instruction {
            id: row.get("id"),
            title: row.get("title"),
            category: row.get("category"),
            content: row.get("content"),
            file_name: row.get("file_name"),
            file_data: row.get("file_data"),
            file_type: row.get("file_type"),
            created_at: row.get("created_at"),
        }
    }

    /// Get all instructions
    pub async fn find_all(&self) -> StoreResult<Vec<Instruction>> {
        let rows = sqlx::query(&format!("SELECT {INSTRUCTION_COLUMNS} FROM instructions"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::from_row).collect())
    }

    /// Insert a new instruction
    pub async fn insert(&self, instruction: &Instruction) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO instructions (id, title, category, content, file_name, file_data,
                                      file_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&instruction.id)
        .bind(&instruction.title)
        .bind(&instruction.category)
        .bind(&instruction.content)
        .bind(&instruction.file_name)
        .bind(&instruction.file_data)
        .bind(&instruction.file_type)
        .bind(instruction.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replace an instruction's fields, returning the updated row
    pub async fn update(
        &self,
        id: &str,
        payload: &InstructionPayload,
    ) -> StoreResult<Option<Instruction>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE instructions
            SET title = $2, category = $3, content = $4, file_name = $5, file_data = $6,
                file_type = $7
            WHERE id = $1
            RETURNING {INSTRUCTION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&payload.title)
        .bind(&payload.category)
        .bind(&payload.content)
        .bind(&payload.file_name)
        .bind(&payload.file_data)
        .bind(&payload.file_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::from_row))
    }

    /// Delete an instruction, returning whether anything matched
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM instructions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
