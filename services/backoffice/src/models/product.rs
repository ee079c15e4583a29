//! Product model and related functionality

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Coating product in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price_per_kg: f64,
    pub consumption_kg_m2: f64,
    pub description: String,
}

/// Create/replace payload for a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price_per_kg: f64,
    pub consumption_kg_m2: f64,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn new(payload: ProductPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            price_per_kg: payload.price_per_kg,
            consumption_kg_m2: payload.consumption_kg_m2,
            description: payload.description,
        }
    }
}
