//! User API endpoints

pub mod types;

use axum::Json;
use axum::extract::{Query, State};

use super::RecordsApiState;
use crate::api::types::ApiError;
use crate::data::filters::USER_FILTER;

use types::UserDto;

/// List users matching the supplied filters
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(
        ("is_active" = Option<String>, Query, description = "true, false, 1 or 0"),
        ("username" = Option<String>, Query, description = "Substring of the username, case-insensitive"),
        ("email" = Option<String>, Query, description = "Substring of the email, case-insensitive"),
        ("country" = Option<String>, Query, description = "Profile country code, case-insensitive exact match"),
        ("is_staff" = Option<String>, Query, description = "true, false, 1 or 0"),
        ("is_superuser" = Option<String>, Query, description = "true, false, 1 or 0")
    ),
    responses(
        (status = 200, description = "Matching users", body = Vec<UserDto>),
        (status = 400, description = "Invalid filter value")
    )
)]
pub async fn list_users(
    State(state): State<RecordsApiState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let filter = USER_FILTER.compile(&params)?;
    state.log_filter(USER_FILTER.resource(), &filter);

    let users = state
        .reporting
        .list_users(&filter)
        .await
        .map_err(ApiError::from_data)?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}
