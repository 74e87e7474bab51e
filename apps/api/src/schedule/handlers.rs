//! Axum route handler for the weekly schedule board.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::{JobListRow, JobWithRefs};
use crate::schedule::week::{bucket_by_day_of_week, week_bounds, DAY_LABELS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    /// Any date inside the week to show; defaults to the current week.
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleDay {
    pub label: &'static str,
    pub date: NaiveDate,
    pub jobs: Vec<JobWithRefs>,
}

#[derive(Debug, Serialize)]
pub struct ScheduleWeekResponse {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub days: Vec<ScheduleDay>,
}

/// GET /api/v1/schedule?date=
///
/// Seven day slots, Monday through Sunday, each holding the jobs scheduled
/// on that day of the requested week.
pub async fn handle_get_schedule(
    State(state): State<AppState>,
    Query(params): Query<ScheduleQuery>,
) -> Result<Json<ScheduleWeekResponse>, AppError> {
    let anchor = match params.date {
        Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };
    let (week_start, week_end) = week_bounds(anchor);

    let rows = sqlx::query_as::<_, JobListRow>(
        r#"
        SELECT j.*,
               c.name AS customer_name,
               v.year AS vehicle_year, v.make AS vehicle_make, v.model AS vehicle_model
        FROM jobs j
        JOIN customers c ON c.id = j.customer_id
        JOIN vehicles v ON v.id = j.vehicle_id
        WHERE j.scheduled_date >= $1 AND j.scheduled_date <= $2
        ORDER BY j.scheduled_date ASC
        "#,
    )
    .bind(week_start)
    .bind(week_end)
    .fetch_all(&state.db)
    .await?;

    let buckets = bucket_by_day_of_week(
        rows.into_iter().map(JobWithRefs::from),
        |j| j.job.scheduled_date,
    );

    let monday = week_start.date_naive();
    let days = DAY_LABELS
        .into_iter()
        .zip(buckets)
        .enumerate()
        .map(|(i, (label, jobs))| ScheduleDay {
            label,
            date: monday + Duration::days(i as i64),
            jobs,
        })
        .collect();

    Ok(Json(ScheduleWeekResponse {
        week_start,
        week_end,
        days,
    }))
}
