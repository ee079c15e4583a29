//! Proposal lifecycle tracking
//!
//! Enforces that status transitions name a known status, appends the audit
//! trail, and derives the funnel report.

use chrono::Utc;
use common::error::StoreError;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::models::StatusChange;
use crate::proposals::funnel::{build_report, FunnelReport};
use crate::proposals::KpStatus;
use crate::repositories::ProposalStore;

/// Failure modes of a status transition
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("proposal not found")]
    NotFound,

    #[error("unknown status: {0}")]
    InvalidStatus(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of a successful transition
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub id: String,
    pub status: KpStatus,
    pub label: &'static str,
}

/// Lifecycle tracker over the proposal collection
#[derive(Clone)]
pub struct ProposalLifecycle {
    proposals: Arc<dyn ProposalStore>,
}

impl ProposalLifecycle {
    /// Create a new lifecycle tracker
    pub fn new(proposals: Arc<dyn ProposalStore>) -> Self {
        Self { proposals }
    }

    /// Move a proposal to a new status, appending one history entry.
    ///
    /// Any known status may follow any other; the history is an audit log,
    /// not a strict state machine. The previous status is read just before
    /// the update and nothing serializes concurrent transitions on the same
    /// proposal, so racing requests may interleave in the history.
    pub async fn set_status(
        &self,
        id: &str,
        requested: &str,
    ) -> Result<TransitionOutcome, StatusError> {
        let status = KpStatus::parse(requested)
            .ok_or_else(|| StatusError::InvalidStatus(requested.to_string()))?;

        let existing = self
            .proposals
            .find_by_id(id)
            .await?
            .ok_or(StatusError::NotFound)?;

        let entry = StatusChange {
            from_status: existing.status.as_str().to_string(),
            to_status: status.as_str().to_string(),
            changed_at: Utc::now(),
        };

        if !self.proposals.apply_transition(id, status, &entry).await? {
            return Err(StatusError::NotFound);
        }

        info!(
            "Proposal {} moved {} -> {}",
            id, entry.from_status, entry.to_status
        );

        Ok(TransitionOutcome {
            id: id.to_string(),
            status,
            label: status.label(),
        })
    }

    /// Funnel statistics over all proposals
    pub async fn funnel(&self) -> Result<FunnelReport, StatusError> {
        let totals = self.proposals.status_totals().await?;
        Ok(build_report(&totals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Kp, KpPayload};
    use crate::repositories::MemoryStore;
    use serde_json::json;

    fn payload(title: &str, grand_total: f64) -> KpPayload {
        KpPayload {
            title: title.to_string(),
            client: "Клієнт".to_string(),
            location: String::new(),
            date: "2024-06-01".to_string(),
            settings: json!({}),
            rooms: json!([]),
            additional_data: json!({}),
            grand_total,
        }
    }

    async fn seed(store: &MemoryStore, title: &str, grand_total: f64) -> String {
        let kp = Kp::new(payload(title, grand_total));
        let id = kp.id.clone();
        ProposalStore::insert(store, &kp).await.unwrap();
        id
    }

    #[tokio::test]
    async fn transition_appends_one_history_entry_and_updates_status() {
        let store = MemoryStore::new();
        let id = seed(&store, "КП-1", 100.0).await;
        let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

        let outcome = lifecycle.set_status(&id, "sent").await.unwrap();
        assert_eq!(outcome.status, KpStatus::Sent);
        assert_eq!(outcome.label, "Відправлено");

        let kp = ProposalStore::find_by_id(&store, &id).await.unwrap().unwrap();
        assert_eq!(kp.status, KpStatus::Sent);
        assert_eq!(kp.status_history.len(), 1);
        assert_eq!(kp.status_history[0].from_status, "draft");
        assert_eq!(kp.status_history[0].to_status, "sent");
    }

    #[tokio::test]
    async fn unknown_status_is_rejected_and_history_untouched() {
        let store = MemoryStore::new();
        let id = seed(&store, "КП-1", 100.0).await;
        let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

        let err = lifecycle.set_status(&id, "archived").await.unwrap_err();
        match err {
            StatusError::InvalidStatus(raw) => assert_eq!(raw, "archived"),
            other => panic!("expected InvalidStatus, got {other:?}"),
        }

        let kp = ProposalStore::find_by_id(&store, &id).await.unwrap().unwrap();
        assert_eq!(kp.status, KpStatus::Draft);
        assert!(kp.status_history.is_empty());
    }

    #[tokio::test]
    async fn missing_proposal_reports_not_found() {
        let lifecycle = ProposalLifecycle::new(Arc::new(MemoryStore::new()));
        let err = lifecycle.set_status("missing", "sent").await.unwrap_err();
        assert!(matches!(err, StatusError::NotFound));
    }

    #[tokio::test]
    async fn any_known_status_may_follow_any_other() {
        let store = MemoryStore::new();
        let id = seed(&store, "КП-1", 100.0).await;
        let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

        // draft -> paid skips "sent"; the permissive graph records it as-is
        lifecycle.set_status(&id, "paid").await.unwrap();
        // and a terminal status can still be left again
        lifecycle.set_status(&id, "cancelled").await.unwrap();

        let kp = ProposalStore::find_by_id(&store, &id).await.unwrap().unwrap();
        assert_eq!(kp.status, KpStatus::Cancelled);
        assert_eq!(kp.status_history.len(), 2);
        assert_eq!(kp.status_history[1].from_status, "paid");
    }

    #[tokio::test]
    async fn status_always_matches_the_last_history_entry() {
        let store = MemoryStore::new();
        let id = seed(&store, "КП-1", 100.0).await;
        let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

        for step in ["sent", "paid", "cancelled", "draft"] {
            lifecycle.set_status(&id, step).await.unwrap();
            let kp = ProposalStore::find_by_id(&store, &id).await.unwrap().unwrap();
            assert_eq!(
                kp.status.as_str(),
                kp.status_history.last().unwrap().to_status
            );
        }
    }

    #[tokio::test]
    async fn funnel_aggregates_counts_and_sums_by_status() {
        let store = MemoryStore::new();
        seed(&store, "КП-1", 100.0).await;
        seed(&store, "КП-2", 200.0).await;
        let sent = seed(&store, "КП-3", 300.0).await;
        let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));
        lifecycle.set_status(&sent, "sent").await.unwrap();

        let report = lifecycle.funnel().await.unwrap();
        assert_eq!(report.funnel[0].count, 2);
        assert_eq!(report.funnel[0].total_sum, 300.0);
        assert_eq!(report.funnel[1].count, 1);
        assert_eq!(report.funnel[1].total_sum, 300.0);
        assert_eq!(report.funnel[1].conversion, 50.0);
        assert_eq!(report.total_count, 3);
    }
}
