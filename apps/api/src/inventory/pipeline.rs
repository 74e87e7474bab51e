#![allow(dead_code)]

//! Resale inventory status pipeline: AVAILABLE → PENDING → SOLD.
//!
//! Same shape as the job pipeline, three stages instead of seven. The sold
//! timestamp is managed by the status-transition handler, not stored state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryStatus {
    Available,
    Pending,
    Sold,
}

pub const INVENTORY_STATUS_ORDER: [InventoryStatus; 3] = [
    InventoryStatus::Available,
    InventoryStatus::Pending,
    InventoryStatus::Sold,
];

impl InventoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryStatus::Available => "AVAILABLE",
            InventoryStatus::Pending => "PENDING",
            InventoryStatus::Sold => "SOLD",
        }
    }

    /// Strict parse of the stored string form; unknown values are `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        INVENTORY_STATUS_ORDER
            .iter()
            .copied()
            .find(|s| s.as_str() == raw)
    }

    /// Zero-based position in the pipeline.
    pub fn index(&self) -> usize {
        INVENTORY_STATUS_ORDER
            .iter()
            .position(|s| s == self)
            .unwrap_or(0)
    }

    /// The stage immediately after this one, or `None` at SOLD.
    pub fn next(&self) -> Option<Self> {
        INVENTORY_STATUS_ORDER.get(self.index() + 1).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            InventoryStatus::Available => "Available",
            InventoryStatus::Pending => "Pending",
            InventoryStatus::Sold => "Sold",
        }
    }

    /// Badge color tag for UI consumption.
    pub fn color(&self) -> &'static str {
        match self {
            InventoryStatus::Available => "emerald",
            InventoryStatus::Pending => "yellow",
            InventoryStatus::Sold => "gray",
        }
    }
}

/// Position of a raw status string in the pipeline, or -1 when unknown.
pub fn inventory_status_index(raw: &str) -> i32 {
    InventoryStatus::parse(raw).map_or(-1, |s| s.index() as i32)
}

/// Next stage for a raw status string; `None` when unknown or terminal.
pub fn next_inventory_status(raw: &str) -> Option<InventoryStatus> {
    InventoryStatus::parse(raw).and_then(|s| s.next())
}

/// New sold-at value for a status write: stamped on entering SOLD, kept while
/// staying SOLD, cleared on any other status.
pub fn sold_at_transition(
    current: InventoryStatus,
    next: InventoryStatus,
    sold_at: Option<DateTime<Utc>>,
    at: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if next == InventoryStatus::Sold {
        if current == InventoryStatus::Sold {
            sold_at
        } else {
            Some(at)
        }
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_order_and_terminal() {
        assert_eq!(
            next_inventory_status("AVAILABLE"),
            Some(InventoryStatus::Pending)
        );
        assert_eq!(
            next_inventory_status("PENDING"),
            Some(InventoryStatus::Sold)
        );
        assert_eq!(next_inventory_status("SOLD"), None);
        assert_eq!(next_inventory_status("CONSIGNED"), None);
    }

    #[test]
    fn test_status_index_degrades_to_negative_one() {
        assert_eq!(inventory_status_index("AVAILABLE"), 0);
        assert_eq!(inventory_status_index("SOLD"), 2);
        assert_eq!(inventory_status_index("sold"), -1);
    }

    #[test]
    fn test_entering_sold_stamps_timestamp() {
        let now = Utc::now();
        let stamped =
            sold_at_transition(InventoryStatus::Pending, InventoryStatus::Sold, None, now);
        assert_eq!(stamped, Some(now));
    }

    #[test]
    fn test_leaving_sold_clears_timestamp() {
        let now = Utc::now();
        let earlier = now - chrono::Duration::days(3);
        let cleared = sold_at_transition(
            InventoryStatus::Sold,
            InventoryStatus::Pending,
            Some(earlier),
            now,
        );
        assert_eq!(cleared, None);
    }

    #[test]
    fn test_staying_sold_keeps_original_timestamp() {
        let now = Utc::now();
        let earlier = now - chrono::Duration::days(3);
        let kept = sold_at_transition(
            InventoryStatus::Sold,
            InventoryStatus::Sold,
            Some(earlier),
            now,
        );
        assert_eq!(kept, Some(earlier));
    }

    #[test]
    fn test_non_sold_transitions_never_stamp() {
        let now = Utc::now();
        let none = sold_at_transition(
            InventoryStatus::Available,
            InventoryStatus::Pending,
            None,
            now,
        );
        assert_eq!(none, None);
    }
}
