//! Price calculation model and related functionality

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Saved price calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    pub id: String,
    pub product_id: String,
    pub product_name: String,
    pub client_name: String,
    pub order_date: String,
    pub order_source: String,
    pub area_m2: f64,
    pub layers: i32,
    pub consumption_kg_m2: f64,
    pub total_kg: f64,
    pub price_per_kg: f64,
    pub total_price: f64,
    pub with_primer: bool,
    pub lac_type: Option<String>,
    pub items: Option<Value>,
    pub include_in_total: bool,
    pub created_at: DateTime<Utc>,
}

/// Create payload for a calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationPayload {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub order_date: String,
    #[serde(default)]
    pub order_source: String,
    pub area_m2: f64,
    pub layers: i32,
    pub consumption_kg_m2: f64,
    pub total_kg: f64,
    pub price_per_kg: f64,
    pub total_price: f64,
    #[serde(default)]
    pub with_primer: bool,
    #[serde(default)]
    pub lac_type: Option<String>,
    #[serde(default)]
    pub items: Option<Value>,
    #[serde(default = "default_include_in_total")]
    pub include_in_total: bool,
}

fn default_include_in_total() -> bool {
    true
}

/// Partial update of the order metadata on a calculation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalculationMetaUpdate {
    pub client_name: Option<String>,
    pub order_date: Option<String>,
    pub order_source: Option<String>,
}

impl Calculation {
    pub fn new(payload: CalculationPayload) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            product_id: payload.product_id,
            product_name: payload.product_name,
            client_name: payload.client_name,
            order_date: payload.order_date,
            order_source: payload.order_source,
            area_m2: payload.area_m2,
            layers: payload.layers,
            consumption_kg_m2: payload.consumption_kg_m2,
            total_kg: payload.total_kg,
            price_per_kg: payload.price_per_kg,
            total_price: payload.total_price,
            with_primer: payload.with_primer,
            lac_type: payload.lac_type,
            items: payload.items,
            include_in_total: payload.include_in_total,
            created_at: Utc::now(),
        }
    }
}
