//! Week math for the schedule view: ISO week bounds (Monday-start) and
//! day-of-week bucketing.
//!
//! All arithmetic happens on the underlying instants, so weeks that straddle
//! a month or year boundary need no special casing.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};

/// Display labels for the seven day slots, Monday first.
pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Returns Monday 00:00:00.000 and Sunday 23:59:59.999 of the week containing
/// `anchor`. Closed-form: with Sunday=0..Saturday=6, a Sunday anchor offsets
/// -6 days to Monday, any other day offsets `1 - dow`.
pub fn week_bounds(anchor: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let dow = anchor.weekday().num_days_from_sunday() as i64;
    let diff_to_monday = if dow == 0 { -6 } else { 1 - dow };

    let monday_date = anchor.date_naive() + Duration::days(diff_to_monday);
    let monday = monday_date.and_time(NaiveTime::MIN).and_utc();
    let sunday = monday + Duration::days(7) - Duration::milliseconds(1);

    (monday, sunday)
}

/// Partitions items into seven buckets keyed by the weekday of their
/// scheduled date, index 0 = Monday .. 6 = Sunday. Items without a scheduled
/// date are dropped. No date-range filtering happens here — callers pre-select
/// the week they want bucketed.
pub fn bucket_by_day_of_week<T>(
    items: impl IntoIterator<Item = T>,
    scheduled_date: impl Fn(&T) -> Option<DateTime<Utc>>,
) -> [Vec<T>; 7] {
    let mut buckets: [Vec<T>; 7] = std::array::from_fn(|_| Vec::new());

    for item in items {
        if let Some(date) = scheduled_date(&item) {
            let dow = date.weekday().num_days_from_sunday() as usize; // 0=Sun
            let idx = if dow == 0 { 6 } else { dow - 1 }; // remap to 0=Mon
            buckets[idx].push(item);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_week_bounds_mid_week_anchor() {
        // Wednesday 2025-03-12
        let (monday, sunday) = week_bounds(at(2025, 3, 12, 15, 30, 0));
        assert_eq!(monday, at(2025, 3, 10, 0, 0, 0));
        assert_eq!(sunday, at(2025, 3, 16, 23, 59, 59) + Duration::milliseconds(999));
    }

    #[test]
    fn test_week_bounds_sunday_belongs_to_preceding_monday() {
        // Sunday 2025-03-16 maps back six days, not forward
        let (monday, _) = week_bounds(at(2025, 3, 16, 8, 0, 0));
        assert_eq!(monday, at(2025, 3, 10, 0, 0, 0));
    }

    #[test]
    fn test_week_bounds_monday_anchor_is_its_own_start() {
        let (monday, sunday) = week_bounds(at(2025, 3, 10, 0, 0, 0));
        assert_eq!(monday, at(2025, 3, 10, 0, 0, 0));
        assert_eq!(sunday, at(2025, 3, 16, 23, 59, 59) + Duration::milliseconds(999));
    }

    /// Any two instants inside the same Monday-Sunday span yield identical
    /// bounds.
    #[test]
    fn test_week_bounds_idempotent_within_week() {
        let first = week_bounds(at(2025, 3, 10, 0, 0, 0));
        let last = week_bounds(at(2025, 3, 16, 23, 59, 59) + Duration::milliseconds(999));
        let midweek = week_bounds(at(2025, 3, 13, 12, 0, 0));
        assert_eq!(first, last);
        assert_eq!(first, midweek);
    }

    /// The last millisecond of a Sunday and the following midnight land in
    /// adjacent, non-overlapping weeks.
    #[test]
    fn test_week_bounds_adjacent_across_sunday_midnight() {
        let end_of_week = at(2025, 3, 16, 23, 59, 59) + Duration::milliseconds(999);
        let next_monday = at(2025, 3, 17, 0, 0, 0);

        let (_, sunday_a) = week_bounds(end_of_week);
        let (monday_b, _) = week_bounds(next_monday);

        assert_eq!(sunday_a + Duration::milliseconds(1), monday_b);
    }

    #[test]
    fn test_week_bounds_crosses_year_boundary() {
        // Wednesday 2025-01-01: the week starts Monday 2024-12-30
        let (monday, sunday) = week_bounds(at(2025, 1, 1, 10, 0, 0));
        assert_eq!(monday, at(2024, 12, 30, 0, 0, 0));
        assert_eq!(sunday, at(2025, 1, 5, 23, 59, 59) + Duration::milliseconds(999));
    }

    #[test]
    fn test_bucket_places_items_by_weekday() {
        // Mon 2025-03-10, Wed 2025-03-12, Sun 2025-03-16
        let items = vec![
            ("mon", Some(at(2025, 3, 10, 9, 0, 0))),
            ("wed", Some(at(2025, 3, 12, 14, 0, 0))),
            ("sun", Some(at(2025, 3, 16, 11, 0, 0))),
        ];
        let buckets = bucket_by_day_of_week(items, |(_, d)| *d);

        assert_eq!(buckets[0].len(), 1);
        assert_eq!(buckets[0][0].0, "mon");
        assert_eq!(buckets[2][0].0, "wed");
        assert_eq!(buckets[6][0].0, "sun", "Sunday remaps to the last slot");
        assert!(buckets[1].is_empty());
    }

    /// Total-count law: bucket sizes sum to the number of dated items; undated
    /// items are dropped, never an error.
    #[test]
    fn test_bucket_drops_undated_items() {
        let items = vec![
            ("a", Some(at(2025, 3, 11, 9, 0, 0))),
            ("b", None),
            ("c", Some(at(2025, 3, 14, 9, 0, 0))),
            ("d", None),
        ];
        let buckets = bucket_by_day_of_week(items, |(_, d)| *d);
        let total: usize = buckets.iter().map(Vec::len).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_bucket_of_empty_input_is_seven_empty_slots() {
        let buckets = bucket_by_day_of_week(Vec::<(&str, Option<DateTime<Utc>>)>::new(), |(_, d)| *d);
        assert!(buckets.iter().all(Vec::is_empty));
        assert_eq!(buckets.len(), 7);
    }
}
