#![allow(dead_code)]

//! Campaign statuses. Independent states, no ordering; the send handler is
//! the only writer that moves a campaign to SENT.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketingStatus {
    Draft,
    Scheduled,
    Sent,
}

pub const MARKETING_STATUSES: [MarketingStatus; 3] = [
    MarketingStatus::Draft,
    MarketingStatus::Scheduled,
    MarketingStatus::Sent,
];

impl MarketingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketingStatus::Draft => "DRAFT",
            MarketingStatus::Scheduled => "SCHEDULED",
            MarketingStatus::Sent => "SENT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarketingStatus::Draft => "Draft",
            MarketingStatus::Scheduled => "Scheduled",
            MarketingStatus::Sent => "Sent",
        }
    }

    /// Badge color tag for UI consumption.
    pub fn color(&self) -> &'static str {
        match self {
            MarketingStatus::Draft => "gray",
            MarketingStatus::Scheduled => "blue",
            MarketingStatus::Sent => "emerald",
        }
    }
}
