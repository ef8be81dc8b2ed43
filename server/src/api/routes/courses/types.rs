//! Course API types

use serde::Serialize;
use utoipa::ToSchema;

use crate::data::types::CourseOverview;

/// Course summary for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDto {
    pub id: String,
    pub display_name: Option<String>,
    pub org: String,
    pub number: String,
    pub display_org_with_default: String,
    pub display_number_with_default: String,
}

impl From<CourseOverview> for CourseDto {
    fn from(course: CourseOverview) -> Self {
        Self {
            id: course.id,
            display_name: course.display_name,
            org: course.org,
            number: course.number,
            display_org_with_default: course.display_org_with_default,
            display_number_with_default: course.display_number_with_default,
        }
    }
}
