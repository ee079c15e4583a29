//! Funnel statistics over the proposal collection

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;

use crate::proposals::KpStatus;
use crate::repositories::StatusTotal;

/// Count and grand-total sum for one status bucket
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct StageTotals {
    pub count: i64,
    pub total_sum: f64,
}

/// One ordered step of the conversion funnel
#[derive(Debug, Clone, Serialize)]
pub struct FunnelStep {
    pub status: KpStatus,
    pub label: &'static str,
    pub count: i64,
    pub total_sum: f64,
    pub conversion: f64,
}

/// Aggregate funnel report over all proposals
#[derive(Debug, Clone, Serialize)]
pub struct FunnelReport {
    pub funnel: Vec<FunnelStep>,
    pub cancelled: StageTotals,
    pub total_count: i64,
    pub total_sum: f64,
    pub status_labels: Map<String, Value>,
}

/// Build the funnel report from per-status aggregates.
///
/// Steps run in the fixed order draft, sent, paid. The first step converts at
/// 100%; each later step converts against the last preceding step with a
/// nonzero count, so an empty intermediate stage neither divides by zero nor
/// reads as a misleading 0%. Cancelled proposals sit outside the chain.
/// Aggregates for statuses outside the known four are dropped.
pub fn build_report(totals: &[StatusTotal]) -> FunnelReport {
    let mut stats: HashMap<KpStatus, StageTotals> = HashMap::new();
    let mut total_count = 0;
    let mut total_sum = 0.0;

    for row in totals {
        let Some(status) = KpStatus::parse(&row.status) else {
            continue;
        };
        stats.insert(
            status,
            StageTotals {
                count: row.count,
                total_sum: row.total_sum,
            },
        );
        total_count += row.count;
        total_sum += row.total_sum;
    }

    let mut funnel = Vec::with_capacity(KpStatus::FUNNEL.len());
    let mut prev_count: Option<i64> = None;

    for status in KpStatus::FUNNEL {
        let stage = stats.get(&status).copied().unwrap_or_default();
        let conversion = match prev_count {
            None => 100.0,
            Some(prev) if prev > 0 => round_one_decimal(stage.count as f64 / prev as f64 * 100.0),
            Some(_) => 0.0,
        };

        funnel.push(FunnelStep {
            status,
            label: status.label(),
            count: stage.count,
            total_sum: stage.total_sum,
            conversion,
        });

        if stage.count > 0 {
            prev_count = Some(stage.count);
        }
    }

    FunnelReport {
        funnel,
        cancelled: stats.get(&KpStatus::Cancelled).copied().unwrap_or_default(),
        total_count,
        total_sum,
        status_labels: status_labels(),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn status_labels() -> Map<String, Value> {
    KpStatus::ALL
        .iter()
        .map(|status| (status.as_str().to_string(), json!(status.label())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(status: &str, count: i64, total_sum: f64) -> StatusTotal {
        StatusTotal {
            status: status.to_string(),
            count,
            total_sum,
        }
    }

    #[test]
    fn computes_step_conversions_against_the_previous_stage() {
        let report = build_report(&[total("draft", 2, 300.0), total("sent", 1, 300.0)]);

        assert_eq!(report.funnel[0].count, 2);
        assert_eq!(report.funnel[0].total_sum, 300.0);
        assert_eq!(report.funnel[0].conversion, 100.0);

        assert_eq!(report.funnel[1].count, 1);
        assert_eq!(report.funnel[1].total_sum, 300.0);
        assert_eq!(report.funnel[1].conversion, 50.0);

        assert_eq!(report.total_count, 3);
        assert_eq!(report.total_sum, 600.0);
    }

    #[test]
    fn empty_intermediate_stage_carries_the_denominator_forward() {
        let report = build_report(&[total("draft", 4, 1000.0), total("paid", 1, 250.0)]);

        let sent = &report.funnel[1];
        assert_eq!(sent.count, 0);
        assert_eq!(sent.conversion, 0.0);

        // paid converts against draft's count, not the empty sent stage
        let paid = &report.funnel[2];
        assert_eq!(paid.conversion, 25.0);
    }

    #[test]
    fn cancelled_is_reported_outside_the_chain() {
        let report = build_report(&[
            total("draft", 1, 100.0),
            total("cancelled", 3, 900.0),
            total("paid", 1, 100.0),
        ]);

        assert_eq!(report.cancelled, StageTotals { count: 3, total_sum: 900.0 });
        assert_eq!(report.funnel.len(), 3);
        assert!(report
            .funnel
            .iter()
            .all(|step| step.status != KpStatus::Cancelled));
        // but cancelled still counts toward the overall totals
        assert_eq!(report.total_count, 5);
        assert_eq!(report.total_sum, 1100.0);
    }

    #[test]
    fn unknown_status_buckets_are_dropped() {
        let report = build_report(&[total("draft", 2, 100.0), total("archived", 7, 7000.0)]);

        assert_eq!(report.total_count, 2);
        assert_eq!(report.total_sum, 100.0);
    }

    #[test]
    fn empty_collection_yields_an_all_zero_report() {
        let report = build_report(&[]);

        assert_eq!(report.total_count, 0);
        assert_eq!(report.funnel[0].conversion, 100.0);
        assert_eq!(report.funnel[1].count, 0);
        assert_eq!(report.cancelled, StageTotals::default());
    }

    #[test]
    fn conversion_is_rounded_to_one_decimal() {
        let report = build_report(&[total("draft", 3, 0.0), total("sent", 1, 0.0)]);
        assert_eq!(report.funnel[1].conversion, 33.3);
    }

    #[test]
    fn labels_cover_every_known_status() {
        let report = build_report(&[]);
        for status in KpStatus::ALL {
            assert_eq!(
                report.status_labels[status.as_str()],
                json!(status.label())
            );
        }
    }
}
