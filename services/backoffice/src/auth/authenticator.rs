//! Session authenticator
//!
//! Turns the transient proof of identity handed back by the OAuth frontend
//! into a durable, revocable server-side session, gated by the email
//! allow-list.

use chrono::{Duration, Utc};
use common::error::{StoreError, StoreResult};
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::allowlist::AllowList;
use crate::auth::identity::{IdentityError, IdentityProvider};
use crate::models::{Session, User};
use crate::repositories::{SessionStore, UserStore};

/// Length of the URL-safe session token (~256 bits of alphanumeric entropy)
const SESSION_TOKEN_LEN: usize = 43;

/// How long an issued session stays valid
const SESSION_TTL_DAYS: i64 = 30;

/// Login failure modes
#[derive(Error, Debug)]
pub enum AuthError {
    /// The identity provider rejected the exchange or could not be reached.
    /// Detail is logged, never surfaced to the caller.
    #[error("identity exchange failed")]
    Upstream(#[source] IdentityError),

    /// The verified email is not on the allow-list. Unlike upstream
    /// failures this is reported with the rejected email.
    #[error("access denied for {email}")]
    AccessDenied { email: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A freshly issued session together with its user
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub session_token: String,
}

/// Session authenticator over the user and session collections
#[derive(Clone)]
pub struct Authenticator {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    identity: Arc<dyn IdentityProvider>,
    allow_list: AllowList,
    session_ttl: Duration,
}

impl Authenticator {
    /// Create a new authenticator
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        identity: Arc<dyn IdentityProvider>,
        allow_list: AllowList,
    ) -> Self {
        Self {
            users,
            sessions,
            identity,
            allow_list,
            session_ttl: Duration::days(SESSION_TTL_DAYS),
        }
    }

    /// Exchange an external session id for a server-side session.
    ///
    /// On success exactly one live session exists for the user: all prior
    /// sessions are deleted before the new one is inserted. The two steps
    /// are not transactional; a crash in between leaves the user with zero
    /// sessions, which the next login repairs.
    pub async fn create_session(
        &self,
        external_session_id: &str,
    ) -> Result<AuthenticatedSession, AuthError> {
        let profile = self
            .identity
            .verify(external_session_id)
            .await
            .map_err(AuthError::Upstream)?;

        let email = profile.email.to_lowercase();
        info!("Auth attempt for email: {}", email);

        if !self.allow_list.contains(&email) {
            warn!("Access denied for email: {}", email);
            return Err(AuthError::AccessDenied { email });
        }

        let user = match self.users.find_by_email(&email).await? {
            Some(existing) => {
                self.users
                    .update_profile(&email, &profile.name, profile.picture.as_deref())
                    .await?;
                User {
                    name: profile.name,
                    picture: profile.picture,
                    ..existing
                }
            }
            None => {
                let user = User {
                    user_id: new_user_id(),
                    email: email.clone(),
                    name: profile.name,
                    picture: profile.picture,
                    created_at: Utc::now(),
                };
                self.users.insert(&user).await?;
                user
            }
        };

        let session_token = generate_token();
        let now = Utc::now();

        self.sessions.delete_for_user(&user.user_id).await?;
        self.sessions
            .insert(&Session {
                user_id: user.user_id.clone(),
                session_token: session_token.clone(),
                expires_at: now + self.session_ttl,
                created_at: now,
            })
            .await?;

        Ok(AuthenticatedSession {
            user,
            session_token,
        })
    }

    /// Resolve a bearer token back to its user.
    ///
    /// Expired sessions resolve to `None` without being deleted; the stale
    /// row stays behind as inert garbage.
    pub async fn resolve_session(&self, token: &str) -> StoreResult<Option<User>> {
        let Some(session) = self.sessions.find_by_token(token).await? else {
            return Ok(None);
        };

        if session.expires_at < Utc::now() {
            return Ok(None);
        }

        self.users.find_by_id(&session.user_id).await
    }

    /// Delete every session carrying the token. Idempotent: an unknown or
    /// already-removed token is not an error.
    pub async fn logout(&self, token: &str) -> StoreResult<u64> {
        self.sessions.delete_by_token(token).await
    }
}

/// Opaque user id: `user_` plus twelve hex characters
fn new_user_id() -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(12);
    format!("user_{hex}")
}

/// High-entropy URL-safe token with no embedded structure
fn generate_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SESSION_TOKEN_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::identity::IdentityProfile;
    use crate::repositories::MemoryStore;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    enum MockExchange {
        Profile(IdentityProfile),
        Rejected(StatusCode),
    }

    struct MockIdentityProvider {
        outcome: MockExchange,
    }

    impl MockIdentityProvider {
        fn returning(email: &str, name: &str) -> Self {
            Self {
                outcome: MockExchange::Profile(IdentityProfile {
                    email: email.to_string(),
                    name: name.to_string(),
                    picture: Some("https://example.com/avatar.png".to_string()),
                }),
            }
        }

        fn rejecting() -> Self {
            Self {
                outcome: MockExchange::Rejected(StatusCode::UNAUTHORIZED),
            }
        }
    }

    #[async_trait]
    impl IdentityProvider for MockIdentityProvider {
        async fn verify(&self, _id: &str) -> Result<IdentityProfile, IdentityError> {
            match &self.outcome {
                MockExchange::Profile(profile) => Ok(profile.clone()),
                MockExchange::Rejected(status) => Err(IdentityError::Rejected(*status)),
            }
        }
    }

    fn authenticator(store: &MemoryStore, provider: MockIdentityProvider) -> Authenticator {
        Authenticator::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(provider),
            AllowList::new(["owner@example.com"]),
        )
    }

    #[tokio::test]
    async fn rejects_email_outside_the_allow_list_without_writes() {
        let store = MemoryStore::new();
        let auth = authenticator(
            &store,
            MockIdentityProvider::returning("intruder@example.com", "Intruder"),
        );

        let err = auth.create_session("ext-1").await.unwrap_err();
        match err {
            AuthError::AccessDenied { email } => assert_eq!(email, "intruder@example.com"),
            other => panic!("expected AccessDenied, got {other:?}"),
        }
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn surfaces_upstream_rejection_without_writes() {
        let store = MemoryStore::new();
        let auth = authenticator(&store, MockIdentityProvider::rejecting());

        let err = auth.create_session("ext-1").await.unwrap_err();
        assert!(matches!(err, AuthError::Upstream(_)));
        assert_eq!(store.user_count(), 0);
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test]
    async fn issues_one_session_valid_for_thirty_days() {
        let store = MemoryStore::new();
        let auth = authenticator(
            &store,
            MockIdentityProvider::returning("owner@example.com", "Owner"),
        );

        let issued = auth.create_session("ext-1").await.unwrap();
        assert_eq!(issued.user.email, "owner@example.com");
        assert_eq!(issued.session_token.len(), SESSION_TOKEN_LEN);
        assert_eq!(store.session_count(), 1);

        let session = SessionStore::find_by_token(&store, &issued.session_token)
            .await
            .unwrap()
            .expect("session row should exist");
        let ttl = session.expires_at - session.created_at;
        assert_eq!(ttl.num_days(), 30);
    }

    #[tokio::test]
    async fn allow_list_check_ignores_case_and_lowercases_the_email() {
        let store = MemoryStore::new();
        let auth = authenticator(
            &store,
            MockIdentityProvider::returning("OWNER@Example.COM", "Owner"),
        );

        let issued = auth.create_session("ext-1").await.unwrap();
        assert_eq!(issued.user.email, "owner@example.com");
    }

    #[tokio::test]
    async fn relogin_replaces_the_previous_session_and_refreshes_the_profile() {
        let store = MemoryStore::new();
        let first = authenticator(
            &store,
            MockIdentityProvider::returning("owner@example.com", "Owner"),
        )
        .create_session("ext-1")
        .await
        .unwrap();

        let second = authenticator(
            &store,
            MockIdentityProvider::returning("owner@example.com", "Owner Renamed"),
        )
        .create_session("ext-2")
        .await
        .unwrap();

        assert_eq!(store.user_count(), 1);
        assert_eq!(store.session_count(), 1);
        assert_eq!(second.user.user_id, first.user.user_id);
        assert_eq!(second.user.name, "Owner Renamed");
        assert_ne!(second.session_token, first.session_token);

        let auth = authenticator(
            &store,
            MockIdentityProvider::returning("owner@example.com", "Owner"),
        );
        assert!(auth
            .resolve_session(&first.session_token)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn resolve_returns_the_user_for_a_live_token() {
        let store = MemoryStore::new();
        let auth = authenticator(
            &store,
            MockIdentityProvider::returning("owner@example.com", "Owner"),
        );

        let issued = auth.create_session("ext-1").await.unwrap();
        let resolved = auth
            .resolve_session(&issued.session_token)
            .await
            .unwrap()
            .expect("live session should resolve");
        assert_eq!(resolved.user_id, issued.user.user_id);
    }

    #[tokio::test]
    async fn resolve_treats_an_expired_session_as_absent() {
        let store = MemoryStore::new();
        let auth = authenticator(
            &store,
            MockIdentityProvider::returning("owner@example.com", "Owner"),
        );

        let issued = auth.create_session("ext-1").await.unwrap();
        store.put_session(Session {
            user_id: issued.user.user_id.clone(),
            session_token: "stale-token".to_string(),
            expires_at: Utc::now() - Duration::hours(1),
            created_at: Utc::now() - Duration::days(31),
        });

        assert!(auth.resolve_session("stale-token").await.unwrap().is_none());
        // The user itself is still there.
        assert!(auth
            .resolve_session(&issued.session_token)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn resolve_returns_none_for_an_unknown_token() {
        let store = MemoryStore::new();
        let auth = authenticator(
            &store,
            MockIdentityProvider::returning("owner@example.com", "Owner"),
        );

        assert!(auth.resolve_session("never-issued").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let store = MemoryStore::new();
        let auth = authenticator(
            &store,
            MockIdentityProvider::returning("owner@example.com", "Owner"),
        );

        let issued = auth.create_session("ext-1").await.unwrap();
        assert_eq!(auth.logout(&issued.session_token).await.unwrap(), 1);
        assert_eq!(auth.logout(&issued.session_token).await.unwrap(), 0);
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn user_ids_carry_the_expected_shape() {
        let id = new_user_id();
        assert!(id.starts_with("user_"));
        assert_eq!(id.len(), "user_".len() + 12);
    }

    #[test]
    fn tokens_are_unique_and_url_safe() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
