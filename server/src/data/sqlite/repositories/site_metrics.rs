//! Site daily metrics repository for SQLite operations

use chrono::NaiveDate;
use sqlx::{SqliteConnection, SqlitePool};

use super::{bind_params, build_select};
use crate::data::filters::FilterQuery;
use crate::data::sqlite::SqliteError;
use crate::data::types::SiteDailyMetrics;

const SELECT_METRICS: &str = "SELECT id, date_for, cumulative_active_user_count, \
     todays_active_user_count, total_user_count, course_count, total_enrollment_count \
     FROM site_daily_metrics";

type MetricsTuple = (i64, NaiveDate, Option<i64>, Option<i64>, i64, i64, i64);

/// Insert or update the metrics row for one day
pub async fn upsert_site_daily_metrics(
    conn: &mut SqliteConnection,
    metrics: &SiteDailyMetrics,
) -> Result<(), SqliteError> {
    sqlx::query(
        r#"
        INSERT INTO site_daily_metrics
            (id, date_for, cumulative_active_user_count, todays_active_user_count,
             total_user_count, course_count, total_enrollment_count)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            date_for = excluded.date_for,
            cumulative_active_user_count = excluded.cumulative_active_user_count,
            todays_active_user_count = excluded.todays_active_user_count,
            total_user_count = excluded.total_user_count,
            course_count = excluded.course_count,
            total_enrollment_count = excluded.total_enrollment_count
        "#,
    )
    .bind(metrics.id)
    .bind(metrics.date_for)
    .bind(metrics.cumulative_active_user_count)
    .bind(metrics.todays_active_user_count)
    .bind(metrics.total_user_count)
    .bind(metrics.course_count)
    .bind(metrics.total_enrollment_count)
    .execute(conn)
    .await?;

    Ok(())
}

/// List metrics rows matching the filter, ordered by ID
pub async fn list_site_daily_metrics(
    pool: &SqlitePool,
    filter: &FilterQuery,
) -> Result<Vec<SiteDailyMetrics>, SqliteError> {
    let (sql, params) = build_select(SELECT_METRICS, filter, |field, _| field, "id");

    let rows = bind_params(sqlx::query_as::<_, MetricsTuple>(&sql), &params)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .into_iter()
        .map(
            |(
                id,
                date_for,
                cumulative_active_user_count,
                todays_active_user_count,
                total_user_count,
                course_count,
                total_enrollment_count,
            )| SiteDailyMetrics {
                id,
                date_for,
                cumulative_active_user_count,
                todays_active_user_count,
                total_user_count,
                course_count,
                total_enrollment_count,
            },
        )
        .collect())
}
