//! Site daily metrics API types

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::SiteDailyMetrics;

#[derive(Debug, Serialize, ToSchema)]
pub struct SiteDailyMetricsDto {
    pub id: i64,
    pub date_for: NaiveDate,
    pub cumulative_active_user_count: Option<i64>,
    pub todays_active_user_count: Option<i64>,
    pub total_user_count: i64,
    pub course_count: i64,
    pub total_enrollment_count: i64,
}

impl From<SiteDailyMetrics> for SiteDailyMetricsDto {
    fn from(row: SiteDailyMetrics) -> Self {
        Self {
            id: row.id,
            date_for: row.date_for,
            cumulative_active_user_count: row.cumulative_active_user_count,
            todays_active_user_count: row.todays_active_user_count,
            total_user_count: row.total_user_count,
            course_count: row.course_count,
            total_enrollment_count: row.total_enrollment_count,
        }
    }
}
