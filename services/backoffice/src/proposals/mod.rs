//! Commercial-proposal lifecycle and statistics

pub mod funnel;
pub mod lifecycle;
pub mod status;

pub use funnel::{FunnelReport, FunnelStep, StageTotals};
pub use lifecycle::{ProposalLifecycle, StatusError, TransitionOutcome};
pub use status::KpStatus;
