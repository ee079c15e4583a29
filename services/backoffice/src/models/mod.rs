//! Back-office service models

pub mod calculation;
pub mod document;
pub mod instruction;
pub mod product;
pub mod proposal;
pub mod session;
pub mod settings;
pub mod user;

// Re-export for convenience
pub use calculation::{Calculation, CalculationMetaUpdate, CalculationPayload};
pub use document::{Document, DocumentPayload};
pub use instruction::{Instruction, InstructionPayload};
pub use product::{Product, ProductPayload};
pub use proposal::{Kp, KpPayload, StatusChange};
pub use session::Session;
pub use settings::{
    CalculatorPrices, CalculatorPricesUpdate, Settings, SettingsUpdate, CALCULATOR_PRICES_ID,
    SETTINGS_ID,
};
pub use user::User;
