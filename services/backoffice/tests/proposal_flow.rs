//! End-to-end proposal lifecycle over the in-memory store

use serde_json::json;
use std::sync::Arc;

use backoffice::models::{Kp, KpPayload};
use backoffice::proposals::{KpStatus, ProposalLifecycle, StatusError};
use backoffice::repositories::{MemoryStore, ProposalStore};

fn payload(title: &str, grand_total: f64) -> KpPayload {
    KpPayload {
        title: title.to_string(),
        client: "ТОВ Замовник".to_string(),
        location: "Одеса".to_string(),
        date: "2024-07-15".to_string(),
        settings: json!({"currency": "UAH", "includeVat": true, "vatRate": 20}),
        rooms: json!([{"id": 1, "name": "Цех", "area": 400.0, "materials": []}]),
        additional_data: json!({"description": "Підлогове покриття"}),
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
async fn funnel_over_a_mixed_collection() {
    let store = MemoryStore::new();
    let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

    seed(&store, "КП-1", 100.0).await;
    seed(&store, "КП-2", 200.0).await;
    let sent = seed(&store, "КП-3", 300.0).await;
    lifecycle.set_status(&sent, "sent").await.unwrap();

    let report = lifecycle.funnel().await.unwrap();

    let draft = &report.funnel[0];
    assert_eq!((draft.count, draft.total_sum, draft.conversion), (2, 300.0, 100.0));

    let sent = &report.funnel[1];
    assert_eq!((sent.count, sent.total_sum, sent.conversion), (1, 300.0, 50.0));

    assert_eq!(report.total_count, 3);
    assert_eq!(report.total_sum, 600.0);
}

#[tokio::test]
async fn funnel_skips_an_empty_sent_stage_without_dividing_by_zero() {
    let store = MemoryStore::new();
    let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

    seed(&store, "КП-1", 500.0).await;
    seed(&store, "КП-2", 500.0).await;
    let paid = seed(&store, "КП-3", 900.0).await;
    // straight draft -> paid, leaving "sent" empty
    lifecycle.set_status(&paid, "paid").await.unwrap();

    let report = lifecycle.funnel().await.unwrap();
    assert_eq!(report.funnel[1].count, 0);
    assert_eq!(report.funnel[1].conversion, 0.0);
    // paid converts against the two drafts, not the empty sent stage
    assert_eq!(report.funnel[2].count, 1);
    assert_eq!(report.funnel[2].conversion, 50.0);
}

#[tokio::test]
async fn cancelled_proposals_leave_the_funnel_but_keep_their_money_visible() {
    let store = MemoryStore::new();
    let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

    seed(&store, "КП-1", 100.0).await;
    let cancelled = seed(&store, "КП-2", 2500.0).await;
    lifecycle.set_status(&cancelled, "cancelled").await.unwrap();

    let report = lifecycle.funnel().await.unwrap();
    assert_eq!(report.cancelled.count, 1);
    assert_eq!(report.cancelled.total_sum, 2500.0);
    assert_eq!(report.funnel[0].count, 1);
    assert_eq!(report.total_count, 2);
    assert_eq!(report.total_sum, 2600.0);
}

#[tokio::test]
async fn field_updates_never_touch_the_audit_trail() {
    let store = MemoryStore::new();
    let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

    let id = seed(&store, "КП-1", 100.0).await;
    lifecycle.set_status(&id, "sent").await.unwrap();

    let updated = ProposalStore::update_fields(&store, &id, &payload("КП-1 (нова ціна)", 150.0))
        .await
        .unwrap();
    assert!(updated);

    let kp = ProposalStore::find_by_id(&store, &id).await.unwrap().unwrap();
    assert_eq!(kp.title, "КП-1 (нова ціна)");
    assert_eq!(kp.grand_total, 150.0);
    // the rewrite of business fields left status and history alone
    assert_eq!(kp.status, KpStatus::Sent);
    assert_eq!(kp.status_history.len(), 1);
}

#[tokio::test]
async fn invalid_status_never_reaches_the_store() {
    let store = MemoryStore::new();
    let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

    let id = seed(&store, "КП-1", 100.0).await;
    let err = lifecycle.set_status(&id, "archived").await.unwrap_err();
    assert!(matches!(err, StatusError::InvalidStatus(_)));

    let kp = ProposalStore::find_by_id(&store, &id).await.unwrap().unwrap();
    assert_eq!(kp.status, KpStatus::Draft);
    assert!(kp.status_history.is_empty());
}

#[tokio::test]
async fn history_grows_one_entry_per_transition() {
    let store = MemoryStore::new();
    let lifecycle = ProposalLifecycle::new(Arc::new(store.clone()));

    let id = seed(&store, "КП-1", 100.0).await;
    for (i, step) in ["sent", "paid", "cancelled"].iter().enumerate() {
        lifecycle.set_status(&id, step).await.unwrap();
        let kp = ProposalStore::find_by_id(&store, &id).await.unwrap().unwrap();
        assert_eq!(kp.status_history.len(), i + 1);
    }

    let kp = ProposalStore::find_by_id(&store, &id).await.unwrap().unwrap();
    let trail: Vec<(&str, &str)> = kp
        .status_history
        .iter()
        .map(|entry| (entry.from_status.as_str(), entry.to_status.as_str()))
        .collect();
    assert_eq!(
        trail,
        vec![("draft", "sent"), ("sent", "paid"), ("paid", "cancelled")]
    );
}
