//! Commercial-proposal statuses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a commercial proposal.
///
/// The transition graph is deliberately permissive: any known status can be
/// set from any other, and the history records whatever happened. Only
/// membership in this set is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpStatus {
    Draft,
    Sent,
    Paid,
    Cancelled,
}

impl KpStatus {
    /// All recognized statuses, in funnel order with `cancelled` last
    pub const ALL: [KpStatus; 4] = [
        KpStatus::Draft,
        KpStatus::Sent,
        KpStatus::Paid,
        KpStatus::Cancelled,
    ];

    /// The non-terminal-failure chain the funnel is built over
    pub const FUNNEL: [KpStatus; 3] = [KpStatus::Draft, KpStatus::Sent, KpStatus::Paid];

    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            KpStatus::Draft => "draft",
            KpStatus::Sent => "sent",
            KpStatus::Paid => "paid",
            KpStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label shown to operators
    pub fn label(&self) -> &'static str {
        match self {
            KpStatus::Draft => "Чернетка",
            KpStatus::Sent => "Відправлено",
            KpStatus::Paid => "Оплачено",
            KpStatus::Cancelled => "Скасовано",
        }
    }

    /// Parse a wire status, returning `None` for anything unrecognized
    pub fn parse(raw: &str) -> Option<KpStatus> {
        match raw {
            "draft" => Some(KpStatus::Draft),
            "sent" => Some(KpStatus::Sent),
            "paid" => Some(KpStatus::Paid),
            "cancelled" => Some(KpStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for KpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_status() {
        for status in KpStatus::ALL {
            assert_eq!(KpStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert_eq!(KpStatus::parse("archived"), None);
        assert_eq!(KpStatus::parse(""), None);
        assert_eq!(KpStatus::parse("Draft"), None);
    }

    #[test]
    fn serde_uses_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&KpStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        let status: KpStatus = serde_json::from_str("\"sent\"").unwrap();
        assert_eq!(status, KpStatus::Sent);
    }
}
