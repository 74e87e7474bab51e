#![allow(dead_code)]

//! Job status pipeline and job type registry.
//!
//! The shop process is strictly linear — inquiry through invoicing with no
//! branching or skips — so stages are a flat ordered list and "advance" is an
//! index lookup, not a state-machine graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The seven job stages, in pipeline order.
/// Stored as the SCREAMING_SNAKE string in a TEXT column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Inquiry,
    Quoted,
    Scheduled,
    InProgress,
    Qc,
    Complete,
    Invoiced,
}

pub const JOB_STATUS_ORDER: [JobStatus; 7] = [
    JobStatus::Inquiry,
    JobStatus::Quoted,
    JobStatus::Scheduled,
    JobStatus::InProgress,
    JobStatus::Qc,
    JobStatus::Complete,
    JobStatus::Invoiced,
];

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Inquiry => "INQUIRY",
            JobStatus::Quoted => "QUOTED",
            JobStatus::Scheduled => "SCHEDULED",
            JobStatus::InProgress => "IN_PROGRESS",
            JobStatus::Qc => "QC",
            JobStatus::Complete => "COMPLETE",
            JobStatus::Invoiced => "INVOICED",
        }
    }

    /// Strict parse of the stored string form. Unknown values are `None`,
    /// never an error — raw strings degrade at this boundary.
    pub fn parse(raw: &str) -> Option<Self> {
        JOB_STATUS_ORDER.iter().copied().find(|s| s.as_str() == raw)
    }

    /// Zero-based position in the pipeline.
    pub fn index(&self) -> usize {
        JOB_STATUS_ORDER
            .iter()
            .position(|s| s == self)
            .unwrap_or(0)
    }

    /// The stage immediately after this one, or `None` at INVOICED.
    pub fn next(&self) -> Option<Self> {
        JOB_STATUS_ORDER.get(self.index() + 1).copied()
    }

    /// Whether the job is currently being worked on (IN_PROGRESS or QC).
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::InProgress | JobStatus::Qc)
    }

    /// Whether the job is still in the sales pipeline, not yet committed to a
    /// bay (INQUIRY or QUOTED).
    pub fn is_pipeline(&self) -> bool {
        matches!(self, JobStatus::Inquiry | JobStatus::Quoted)
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Inquiry => "Inquiry",
            JobStatus::Quoted => "Quoted",
            JobStatus::Scheduled => "Scheduled",
            JobStatus::InProgress => "In Progress",
            JobStatus::Qc => "Quality Check",
            JobStatus::Complete => "Complete",
            JobStatus::Invoiced => "Invoiced",
        }
    }

    /// Badge color tag for UI consumption.
    pub fn color(&self) -> &'static str {
        match self {
            JobStatus::Inquiry => "slate",
            JobStatus::Quoted => "blue",
            JobStatus::Scheduled => "violet",
            JobStatus::InProgress => "amber",
            JobStatus::Qc => "orange",
            JobStatus::Complete => "emerald",
            JobStatus::Invoiced => "gold",
        }
    }
}

/// Position of a raw status string in the pipeline, or -1 when unknown.
pub fn status_index(raw: &str) -> i32 {
    JobStatus::parse(raw).map_or(-1, |s| s.index() as i32)
}

/// Next stage for a raw status string; `None` when unknown or terminal.
pub fn next_status(raw: &str) -> Option<JobStatus> {
    JobStatus::parse(raw).and_then(|s| s.next())
}

/// Completion timestamp to stamp alongside a status write: set exactly when
/// the job enters COMPLETE, untouched otherwise.
pub fn completion_stamp(next: JobStatus, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    (next == JobStatus::Complete).then_some(at)
}

/// The six kinds of work the shop takes on. Closed set, no ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    Wrap,
    Ppf,
    Ceramic,
    Tint,
    Custom,
    Dealership,
}

pub const JOB_TYPES: [JobType; 6] = [
    JobType::Wrap,
    JobType::Ppf,
    JobType::Ceramic,
    JobType::Tint,
    JobType::Custom,
    JobType::Dealership,
];

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Wrap => "WRAP",
            JobType::Ppf => "PPF",
            JobType::Ceramic => "CERAMIC",
            JobType::Tint => "TINT",
            JobType::Custom => "CUSTOM",
            JobType::Dealership => "DEALERSHIP",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobType::Wrap => "Wrap",
            JobType::Ppf => "PPF",
            JobType::Ceramic => "Ceramic",
            JobType::Tint => "Tint",
            JobType::Custom => "Custom",
            JobType::Dealership => "Dealership",
        }
    }

    /// Badge color tag for UI consumption.
    pub fn color(&self) -> &'static str {
        match self {
            JobType::Wrap => "purple",
            JobType::Ppf => "blue",
            JobType::Ceramic => "emerald",
            JobType::Tint => "amber",
            JobType::Custom => "pink",
            JobType::Dealership => "cyan",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_index_covers_all_known_statuses() {
        for (i, status) in JOB_STATUS_ORDER.iter().enumerate() {
            assert_eq!(status.index(), i);
            assert_eq!(status_index(status.as_str()), i as i32);
        }
    }

    #[test]
    fn test_status_index_unknown_is_negative_one() {
        assert_eq!(status_index("PAINTING"), -1);
        assert_eq!(status_index(""), -1);
        assert_eq!(status_index("inquiry"), -1, "statuses are case-sensitive");
    }

    #[test]
    fn test_next_status_advances_in_order() {
        assert_eq!(next_status("INQUIRY"), Some(JobStatus::Quoted));
        assert_eq!(next_status("QC"), Some(JobStatus::Complete));
    }

    #[test]
    fn test_next_status_terminal_and_unknown_are_none() {
        assert_eq!(next_status("INVOICED"), None);
        assert_eq!(next_status("NOT_A_STATUS"), None);
    }

    #[test]
    fn test_is_active_only_for_in_progress_and_qc() {
        for status in JOB_STATUS_ORDER {
            let expected = matches!(status, JobStatus::InProgress | JobStatus::Qc);
            assert_eq!(status.is_active(), expected, "{status:?}");
        }
    }

    #[test]
    fn test_is_pipeline_only_for_inquiry_and_quoted() {
        for status in JOB_STATUS_ORDER {
            let expected = matches!(status, JobStatus::Inquiry | JobStatus::Quoted);
            assert_eq!(status.is_pipeline(), expected, "{status:?}");
        }
    }

    /// A new job starts at INQUIRY and reaches INVOICED in exactly six
    /// advances, never revisiting a stage.
    #[test]
    fn test_full_pipeline_walk() {
        let mut current = JobStatus::Inquiry;
        let mut visited = vec![current];
        let mut advances = 0;

        while let Some(next) = current.next() {
            assert!(!visited.contains(&next), "revisited {next:?}");
            visited.push(next);
            current = next;
            advances += 1;
        }

        assert_eq!(advances, 6);
        assert_eq!(current, JobStatus::Invoiced);
    }

    #[test]
    fn test_completion_stamp_only_on_complete() {
        let now = Utc::now();
        assert_eq!(completion_stamp(JobStatus::Complete, now), Some(now));
        assert_eq!(completion_stamp(JobStatus::Invoiced, now), None);
        assert_eq!(completion_stamp(JobStatus::InProgress, now), None);
    }

    #[test]
    fn test_serde_round_trips_screaming_snake_case() {
        let json = serde_json::to_string(&JobStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        let parsed: JobStatus = serde_json::from_str("\"QC\"").unwrap();
        assert_eq!(parsed, JobStatus::Qc);
        assert!(serde_json::from_str::<JobStatus>("\"PAINTING\"").is_err());
    }

    #[test]
    fn test_job_type_strings() {
        assert_eq!(JobType::Ppf.as_str(), "PPF");
        let parsed: JobType = serde_json::from_str("\"DEALERSHIP\"").unwrap();
        assert_eq!(parsed, JobType::Dealership);
    }
}
