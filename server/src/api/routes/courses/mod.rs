//! Course API endpoints

pub mod types;

use axum::Json;
use axum::extract::{Query, State};

use super::RecordsApiState;
use crate::api::types::ApiError;
use crate::data::filters::COURSE_FILTER;

use types::CourseDto;

/// List courses matching the supplied filters
#[utoipa::path(
    get,
    path = "/api/v1/courses",
    tag = "courses",
    params(
        ("display_name" = Option<String>, Query, description = "Substring of the display name, case-insensitive"),
        ("org" = Option<String>, Query, description = "Organization, case-insensitive exact match"),
        ("number" = Option<String>, Query, description = "Course number, case-insensitive exact match"),
        ("number_contains" = Option<String>, Query, description = "Substring of the course number, case-insensitive")
    ),
    responses(
        (status = 200, description = "Matching courses", body = Vec<CourseDto>),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn list_courses(
    State(state): State<RecordsApiState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<CourseDto>>, ApiError> {
    let filter = COURSE_FILTER.compile(&params)?;
    state.log_filter(COURSE_FILTER.resource(), &filter);

    let courses = state
        .reporting
        .list_courses(&filter)
        .await
        .map_err(ApiError::from_data)?;

    Ok(Json(courses.into_iter().map(CourseDto::from).collect()))
}
