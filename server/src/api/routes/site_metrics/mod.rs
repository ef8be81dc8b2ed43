//! Site daily metrics API endpoints

pub mod types;

use axum::Json;
use axum::extract::{Query, State};

use super::RecordsApiState;
use crate::api::types::ApiError;
use crate::data::filters::SITE_DAILY_METRICS_FILTER;

use types::SiteDailyMetricsDto;

/// List site daily metrics matching the supplied filters
#[utoipa::path(
    get,
    path = "/api/v1/site-daily-metrics",
    tag = "site-daily-metrics",
    params(
        ("date_for" = Option<String>, Query, description = "Exact day (YYYY-MM-DD, MM/DD/YYYY or MM/DD/YY)"),
        ("date_0" = Option<String>, Query, description = "Earliest day, inclusive"),
        ("date_1" = Option<String>, Query, description = "Latest day, inclusive")
    ),
    responses(
        (status = 200, description = "Matching metrics rows", body = Vec<SiteDailyMetricsDto>),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn list_site_daily_metrics(
    State(state): State<RecordsApiState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<SiteDailyMetricsDto>>, ApiError> {
    let filter = SITE_DAILY_METRICS_FILTER.compile(&params)?;
    state.log_filter(SITE_DAILY_METRICS_FILTER.resource(), &filter);

    let rows = state
        .reporting
        .list_site_daily_metrics(&filter)
        .await
        .map_err(ApiError::from_data)?;

    Ok(Json(rows.into_iter().map(SiteDailyMetricsDto::from).collect()))
}
