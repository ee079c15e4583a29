//! Commercial proposal (KP) model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::proposals::KpStatus;

/// One entry of the append-only status audit trail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusChange {
    pub from_status: String,
    pub to_status: String,
    pub changed_at: DateTime<Utc>,
}

/// Commercial proposal entity.
///
/// `settings`, `rooms` and `additionalData` are free-form payloads owned by
/// the client; the service only reads `grandTotal` and `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kp {
    pub id: String,
    pub title: String,
    pub client: String,
    pub location: String,
    pub date: String,
    pub settings: Value,
    pub rooms: Value,
    #[serde(rename = "additionalData")]
    pub additional_data: Value,
    #[serde(rename = "grandTotal")]
    pub grand_total: f64,
    pub status: KpStatus,
    pub status_history: Vec<StatusChange>,
    pub doc_type: String,
    pub created_at: DateTime<Utc>,
}

impl Kp {
    /// Build a fresh proposal from a client payload: status starts at
    /// `draft` with an empty history regardless of what was submitted.
    pub fn new(payload: KpPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            client: payload.client,
            location: payload.location,
            date: payload.date,
            settings: payload.settings,
            rooms: payload.rooms,
            additional_data: payload.additional_data,
            grand_total: payload.grand_total,
            status: KpStatus::Draft,
            status_history: Vec::new(),
            doc_type: "kp".to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Create/update payload for a proposal.
///
/// Field updates never touch `status` or `status_history`; the dedicated
/// transition operation owns those.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KpPayload {
    pub title: String,
    pub client: String,
    #[serde(default)]
    pub location: String,
    pub date: String,
    pub settings: Value,
    pub rooms: Value,
    #[serde(rename = "additionalData")]
    pub additional_data: Value,
    #[serde(rename = "grandTotal")]
    pub grand_total: f64,
}
