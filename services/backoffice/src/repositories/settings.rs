//! Settings repository for the singleton configuration documents

use common::error::StoreResult;
use sqlx::{PgPool, Row};

use crate::models::{
    CalculatorPrices, CalculatorPricesUpdate, Settings, SettingsUpdate, CALCULATOR_PRICES_ID,
    SETTINGS_ID,
};

/// Repository for the `settings` and `calculator_prices` singletons
#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read the settings document, creating it with defaults on first access
    pub async fn settings(&self) -> StoreResult<Settings> {
        let defaults = Settings::default();
        let row = sqlx::query(
            r#"
            INSERT INTO settings (id, currency, unit, company_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
            RETURNING id, currency, unit, company_name
            "#,
        )
        .bind(SETTINGS_ID)
        .bind(&defaults.currency)
        .bind(&defaults.unit)
        .bind(&defaults.company_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(Settings {
            id: row.get("id"),
            currency: row.get("currency"),
            unit: row.get("unit"),
            company_name: row.get("company_name"),
        })
    }

    /// Apply the provided fields to the settings document
    pub async fn update_settings(&self, update: &SettingsUpdate) -> StoreResult<Settings> {
        // Make sure the singleton exists before patching it.
        self.settings().await?;

        let row = sqlx::query(
            r#"
            UPDATE settings
            SET currency = COALESCE($2, currency),
                unit = COALESCE($3, unit),
                company_name = COALESCE($4, company_name)
            WHERE id = $1
            RETURNING id, currency, unit, company_name
            "#,
        )
        .bind(SETTINGS_ID)
        .bind(&update.currency)
        .bind(&update.unit)
        .bind(&update.company_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(Settings {
            id: row.get("id"),
            currency: row.get("currency"),
            unit: row.get("unit"),
            company_name: row.get("company_name"),
        })
    }

    /// Read the calculator prices, creating them with defaults on first access
    pub async fn calculator_prices(&self) -> StoreResult<CalculatorPrices> {
        let defaults = CalculatorPrices::default();
        let row = sqlx::query(
            r#"
            INSERT INTO calculator_prices (id, primer, paint, enamel, floki, lac_glossy, lac_matte)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
            RETURNING id, primer, paint, enamel, floki, lac_glossy, lac_matte
            "#,
        )
        .bind(CALCULATOR_PRICES_ID)
        .bind(defaults.primer)
        .bind(defaults.paint)
        .bind(defaults.enamel)
        .bind(defaults.floki)
        .bind(defaults.lac_glossy)
        .bind(defaults.lac_matte)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::prices_from_row(&row))
    }

    /// Apply the provided fields to the calculator prices document
    pub async fn update_calculator_prices(
        &self,
        update: &CalculatorPricesUpdate,
    ) -> StoreResult<CalculatorPrices> {
        self.calculator_prices().await?;

        let row = sqlx::query(
            r#"
            UPDATE calculator_prices
            SET primer = COALESCE($2, primer),
                paint = COALESCE($3, paint),
                enamel = COALESCE($4, enamel),
                floki = COALESCE($5, floki),
                lac_glossy = COALESCE($6, lac_glossy),
                lac_matte = COALESCE($7, lac_matte)
            WHERE id = $1
            RETURNING id, primer, paint, enamel, floki, lac_glossy, lac_matte
            "#,
        )
        .bind(CALCULATOR_PRICES_ID)
        .bind(update.primer)
        .bind(update.paint)
        .bind(update.enamel)
        .bind(update.floki)
        .bind(update.lac_glossy)
        .bind(update.lac_matte)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::prices_from_row(&row))
    }

    fn prices_from_row(row: &sqlx::postgres::PgRow) -> CalculatorPrices {
        CalculatorPrices {
            id: row.get("id"),
            primer: row.get("primer"),
            paint: row.get("paint"),
            enamel: row.get("enamel"),
            floki: row.get("floki"),
            lac_glossy: row.get("lac_glossy"),
            lac_matte: row.get("lac_matte"),
        }
    }
}
