//! Singleton settings documents
//!
//! Both documents live under fixed ids and are lazily created with their
//! defaults on first read.

use serde::{Deserialize, Serialize};

pub const SETTINGS_ID: &str = "main_settings";
pub const CALCULATOR_PRICES_ID: &str = "calculator_prices";

/// Company-wide display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub id: String,
    pub currency: String,
    pub unit: String,
    pub company_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            id: SETTINGS_ID.to_string(),
            currency: "RUB".to_string(),
            unit: "m2".to_string(),
            company_name: "PoliBest 911".to_string(),
        }
    }
}

/// Partial update of the settings document
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub currency: Option<String>,
    pub unit: Option<String>,
    pub company_name: Option<String>,
}

/// Per-material base prices used by the quick calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorPrices {
    pub id: String,
    pub primer: f64,
    pub paint: f64,
    pub enamel: f64,
    pub floki: f64,
    #[serde(rename = "lacGlossy")]
    pub lac_glossy: f64,
    #[serde(rename = "lacMatte")]
    pub lac_matte: f64,
}

impl Default for CalculatorPrices {
    fn default() -> Self {
        Self {
            id: CALCULATOR_PRICES_ID.to_string(),
            primer: 720.0,
            paint: 990.0,
            enamel: 1260.0,
            floki: 1350.0,
            lac_glossy: 1440.0,
            lac_matte: 1800.0,
        }
    }
}

/// Partial update of the calculator prices document
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalculatorPricesUpdate {
    pub primer: Option<f64>,
    pub paint: Option<f64>,
    pub enamel: Option<f64>,
    pub floki: Option<f64>,
    #[serde(rename = "lacGlossy")]
    pub lac_glossy: Option<f64>,
    #[serde(rename = "lacMatte")]
    pub lac_matte: Option<f64>,
}
