//! In-memory document store
//!
//! Implements the store contracts over process-local maps for tests and
//! local development without a running PostgreSQL instance.

use async_trait::async_trait;
use common::error::StoreResult;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::{Kp, KpPayload, Session, StatusChange, User};
use crate::proposals::KpStatus;
use crate::repositories::proposal::StatusTotal;
use crate::repositories::{ProposalStore, SessionStore, UserStore};

/// In-memory store implementing every collection contract
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    sessions: Vec<Session>,
    proposals: Vec<Kp>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub fn session_count(&self) -> usize {
        self.state.lock().unwrap().sessions.len()
    }

    /// Number of stored users
    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    /// Insert a raw session row, for tests that need a pre-expired session
    pub fn put_session(&self, session: Session) {
        self.state.lock().unwrap().sessions.push(session);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: &str) -> StoreResult<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn insert(&self, user: &User) -> StoreResult<()> {
        self.state.lock().unwrap().users.push(user.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        email: &str,
        name: &str,
        picture: Option<&str>,
    ) -> StoreResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(user) = state.users.iter_mut().find(|u| u.email == email) {
            user.name = name.to_string();
            user.picture = picture.map(str::to_string);
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn insert(&self, session: &Session) -> StoreResult<()> {
        self.state.lock().unwrap().sessions.push(session.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> StoreResult<Option<Session>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .sessions
            .iter()
            .find(|s| s.session_token == token)
            .cloned())
    }

    async fn delete_for_user(&self, user_id: &str) -> StoreResult<u64> {
        let mut state = self.state.lock().unwrap();
        let before = state.sessions.len();
        state.sessions.retain(|s| s.user_id != user_id);
        Ok((before - state.sessions.len()) as u64)
    }

    async fn delete_by_token(&self, token: &str) -> StoreResult<u64> {
        let mut state = self.state.lock().unwrap();
        let before = state.sessions.len();
        state.sessions.retain(|s| s.session_token != token);
        Ok((before - state.sessions.len()) as u64)
    }
}

#[async_trait]
impl ProposalStore for MemoryStore {
    async fn insert(&self, kp: &Kp) -> StoreResult<()> {
        self.state.lock().unwrap().proposals.push(kp.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Kp>> {
        let state = self.state.lock().unwrap();
        Ok(state.proposals.iter().find(|kp| kp.id == id).cloned())
    }

    async fn find_all(&self) -> StoreResult<Vec<Kp>> {
        Ok(self.state.lock().unwrap().proposals.clone())
    }

    async fn update_fields(&self, id: &str, payload: &KpPayload) -> StoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        match state.proposals.iter_mut().find(|kp| kp.id == id) {
            Some(kp) => {
                kp.title = payload.title.clone();
                kp.client = payload.client.clone();
                kp.location = payload.location.clone();
                kp.date = payload.date.clone();
                kp.settings = payload.settings.clone();
                kp.rooms = payload.rooms.clone();
                kp.additional_data = payload.additional_data.clone();
                kp.grand_total = payload.grand_total;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        let before = state.proposals.len();
        state.proposals.retain(|kp| kp.id != id);
        Ok(state.proposals.len() < before)
    }

    async fn apply_transition(
        &self,
        id: &str,
        status: KpStatus,
        entry: &StatusChange,
    ) -> StoreResult<bool> {
        let mut state = self.state.lock().unwrap();
        match state.proposals.iter_mut().find(|kp| kp.id == id) {
            Some(kp) => {
                kp.status = status;
                kp.status_history.push(entry.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn status_totals(&self) -> StoreResult<Vec<StatusTotal>> {
        let state = self.state.lock().unwrap();
        let mut grouped: HashMap<&'static str, (i64, f64)> = HashMap::new();
        for kp in &state.proposals {
            let slot = grouped.entry(kp.status.as_str()).or_default();
            slot.0 += 1;
            slot.1 += kp.grand_total;
        }

        Ok(grouped
            .into_iter()
            .map(|(status, (count, total_sum))| StatusTotal {
                status: status.to_string(),
                count,
                total_sum,
            })
            .collect())
    }
}
