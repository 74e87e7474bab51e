#![allow(dead_code)]

//! Invoice statuses. Unlike the job stages these are independent states, not
//! an ordered pipeline — an invoice can go SENT → OVERDUE → PAID or straight
//! to PAID. The only managed side effect is the paid-at timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
}

pub const INVOICE_STATUSES: [InvoiceStatus; 4] = [
    InvoiceStatus::Draft,
    InvoiceStatus::Sent,
    InvoiceStatus::Paid,
    InvoiceStatus::Overdue,
];

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "DRAFT",
            InvoiceStatus::Sent => "SENT",
            InvoiceStatus::Paid => "PAID",
            InvoiceStatus::Overdue => "OVERDUE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Overdue => "Overdue",
        }
    }

    /// Badge color tag for UI consumption.
    pub fn color(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "gray",
            InvoiceStatus::Sent => "blue",
            InvoiceStatus::Paid => "emerald",
            InvoiceStatus::Overdue => "red",
        }
    }
}

/// New paid-at value for a status write: stamped on entering PAID, kept while
/// staying PAID, cleared on any other status. Mirrors the inventory sold-at
/// rule so dashboard revenue only counts invoices that are currently PAID.
pub fn paid_at_transition(
    current: InvoiceStatus,
    next: InvoiceStatus,
    paid_at: Option<DateTime<Utc>>,
    at: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    if next == InvoiceStatus::Paid {
        if current == InvoiceStatus::Paid {
            paid_at
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
    fn test_entering_paid_stamps_timestamp() {
        let now = Utc::now();
        let stamped = paid_at_transition(InvoiceStatus::Sent, InvoiceStatus::Paid, None, now);
        assert_eq!(stamped, Some(now));
    }

    #[test]
    fn test_leaving_paid_clears_timestamp() {
        let now = Utc::now();
        let earlier = now - chrono::Duration::days(10);
        let cleared =
            paid_at_transition(InvoiceStatus::Paid, InvoiceStatus::Overdue, Some(earlier), now);
        assert_eq!(cleared, None);
    }

    #[test]
    fn test_staying_paid_keeps_original_timestamp() {
        let now = Utc::now();
        let earlier = now - chrono::Duration::days(10);
        let kept = paid_at_transition(InvoiceStatus::Paid, InvoiceStatus::Paid, Some(earlier), now);
        assert_eq!(kept, Some(earlier));
    }

    #[test]
    fn test_non_paid_transitions_never_stamp() {
        let now = Utc::now();
        assert_eq!(
            paid_at_transition(InvoiceStatus::Draft, InvoiceStatus::Sent, None, now),
            None
        );
    }

    #[test]
    fn test_serde_uses_stored_strings() {
        assert_eq!(
            serde_json::to_string(&InvoiceStatus::Overdue).unwrap(),
            "\"OVERDUE\""
        );
        assert!(serde_json::from_str::<InvoiceStatus>("\"VOID\"").is_err());
    }
}
