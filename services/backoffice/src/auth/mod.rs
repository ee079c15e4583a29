//! Authentication: allow-list, upstream identity exchange, sessions

pub mod allowlist;
pub mod authenticator;
pub mod identity;

pub use allowlist::AllowList;
pub use authenticator::{AuthError, AuthenticatedSession, Authenticator};
pub use identity::{HttpIdentityProvider, IdentityError, IdentityProfile, IdentityProvider};
