//! Outbound notification types for sync monitoring
//!
//! These events are the monitor's entire external surface:
//! - progress: fraction and message changes, de-duplicated by the gauge
//! - lifecycle: clean and degraded completion, wallet reset
//! - errors: classified connectivity faults

use serde::{Deserialize, Serialize};

use crate::classify::ErrorCategory;

/// Notification published on the event bus
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SyncEvent {
    /// The unified progress fraction advanced
    ProgressChanged { fraction: f64 },
    /// The human-facing progress message changed
    MessageChanged { message: String },
    /// The scan phase reached its terminal condition
    SyncCompleted,
    /// An unhandled fault forced the attempt into a degraded completion
    SyncCompletedWithError,
    /// A connectivity fault was classified and reported
    ErrorRaised {
        category: ErrorCategory,
        description: String,
    },
    /// The wallet reset requested earlier has finished
    WalletReset,
}

impl SyncEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            SyncEvent::ProgressChanged { .. } => "ProgressChanged",
            SyncEvent::MessageChanged { .. } => "MessageChanged",
            SyncEvent::SyncCompleted => "SyncCompleted",
            SyncEvent::SyncCompletedWithError => "SyncCompletedWithError",
            SyncEvent::ErrorRaised { .. } => "ErrorRaised",
            SyncEvent::WalletReset => "WalletReset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type() {
        let event = SyncEvent::ProgressChanged { fraction: 0.5 };
        assert_eq!(event.event_type(), "ProgressChanged");
        assert_eq!(SyncEvent::WalletReset.event_type(), "WalletReset");
    }

    #[test]
    fn test_unit_event_serializes_with_tag() {
        let json = serde_json::to_string(&SyncEvent::SyncCompleted).unwrap();
        assert_eq!(json, r#"{"type":"SyncCompleted"}"#);
    }

    #[test]
    fn test_error_raised_carries_category_and_description() {
        let event = SyncEvent::ErrorRaised {
            category: ErrorCategory::ConnectionError,
            description: "connection refused by 127.0.0.1:10000".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"type":"ErrorRaised","category":"ConnectionError","description":"connection refused by 127.0.0.1:10000"}"#
        );

        let parsed: SyncEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
