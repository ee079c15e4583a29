//! Instruction model and related functionality
//!
//! The `file_data` payload is stored and served verbatim; decoding it is out
//! of scope for this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Application or safety instruction, optionally carrying an attached file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub id: String,
    pub title: String,
    pub category: String,
    pub content: String,
    pub file_name: Option<String>,
    pub file_data: Option<String>,
    pub file_type: String,
    pub created_at: DateTime<Utc>,
}

/// Create/replace payload for an instruction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstructionPayload {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_data: Option<String>,
    #[serde(default = "default_file_type")]
    pub file_type: String,
}

fn default_file_type() -> String {
    "text".to_string()
}

impl Instruction {
    pub fn new(payload: InstructionPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            category: payload.category,
            content: payload.content,
            file_name: payload.file_name,
            file_data: payload.file_data,
            file_type: payload.file_type,
            created_at: Utc::now(),
        }
    }
}
