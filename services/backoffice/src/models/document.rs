//! Generated document model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generated document (commercial proposal text, technical description)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub doc_type: String,
    pub calculation_id: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Create payload for a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentPayload {
    pub title: String,
    pub doc_type: String,
    #[serde(default)]
    pub calculation_id: Option<String>,
    pub content: String,
}

impl Document {
    pub fn new(payload: DocumentPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            doc_type: payload.doc_type,
            calculation_id: payload.calculation_id,
            content: payload.content,
            created_at: Utc::now(),
        }
    }
}
