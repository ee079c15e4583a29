//! Store contracts and their repositories
//!
//! The core collections (`users`, `sessions`, `kp`) are reached through
//! trait contracts so the authenticator and lifecycle tracker stay agnostic
//! of the backing engine; the remaining collections are plain repositories.

pub mod calculation;
pub mod document;
pub mod instruction;
pub mod memory;
pub mod product;
pub mod proposal;
pub mod session;
pub mod settings;
pub mod user;

// Re-export for convenience
pub use calculation::CalculationRepository;
pub use document::DocumentRepository;
pub use instruction::InstructionRepository;
pub use memory::MemoryStore;
pub use product::ProductRepository;
pub use proposal::{ProposalRepository, ProposalStore, StatusTotal};
pub use session::{SessionRepository, SessionStore};
pub use settings::SettingsRepository;
pub use user::{UserRepository, UserStore};
