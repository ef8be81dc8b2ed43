//! Filter schema discovery endpoint

use axum::Json;
use axum::extract::Path;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::types::ApiError;
use crate::data::filters::sets::{RESOURCES, by_resource};
use crate::data::filters::{ComparisonKind, FieldDeclaration, ValueType};

/// One accepted filter of a resource
#[derive(Debug, Serialize, ToSchema)]
pub struct FilterFieldDto {
    pub name: &'static str,
    pub kind: ComparisonKind,
    pub case_sensitive: bool,
    pub value_type: ValueType,
    /// Query parameter names the filter responds to
    pub parameters: Vec<String>,
}

impl From<&FieldDeclaration> for FilterFieldDto {
    fn from(field: &FieldDeclaration) -> Self {
        Self {
            name: field.name,
            kind: field.kind,
            case_sensitive: field.case_sensitive,
            value_type: field.value_type,
            parameters: field.parameters(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FilterSchemaResponse {
    pub resource: &'static str,
    pub fields: Vec<FilterFieldDto>,
}

/// Describe the filters a resource accepts
#[utoipa::path(
    get,
    path = "/api/v1/filters/{resource}",
    tag = "filters",
    params(
        ("resource" = String, Path, description = "courses, users or site-daily-metrics")
    ),
    responses(
        (status = 200, description = "Declared filters", body = FilterSchemaResponse),
        (status = 404, description = "Unknown resource")
    )
)]
pub async fn get_filter_schema(
    Path(resource): Path<String>,
) -> Result<Json<FilterSchemaResponse>, ApiError> {
    let filter_set = by_resource(&resource).ok_or_else(|| {
        ApiError::not_found(
            "UNKNOWN_RESOURCE",
            format!(
                "Unknown resource '{}'. Expected one of: {}",
                resource,
                RESOURCES.join(", ")
            ),
        )
    })?;

    Ok(Json(FilterSchemaResponse {
        resource: filter_set.resource(),
        fields: filter_set.fields().iter().map(FilterFieldDto::from).collect(),
    }))
}
