//! Reporting record types shared by all backends
//!
//! Each type implements `Filterable` so the resolver can read its fields by
//! source-field name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::data::filters::{FieldValue, Filterable};

// ============================================================================
// Course types
// ============================================================================

/// Course summary row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseOverview {
    /// Course key, e.g. `course-v1:edX+DemoX+Demo_Course`
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    pub org: String,
    pub number: String,
    pub display_org_with_default: String,
    pub display_number_with_default: String,
}

impl Filterable for CourseOverview {
    fn field_value(&self, source_field: &str) -> Option<FieldValue<'_>> {
        match source_field {
            "id" => Some(FieldValue::Text(&self.id)),
            "display_name" => self.display_name.as_deref().map(FieldValue::Text),
            "org" => Some(FieldValue::Text(&self.org)),
            "number" => Some(FieldValue::Text(&self.number)),
            "display_org_with_default" => Some(FieldValue::Text(&self.display_org_with_default)),
            "display_number_with_default" => {
                Some(FieldValue::Text(&self.display_number_with_default))
            }
            _ => None,
        }
    }
}

// ============================================================================
// User types
// ============================================================================

/// Profile attached to a user account
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    /// ISO 3166-1 alpha-2 code
    #[serde(default)]
    pub country: Option<String>,
}

/// User account row, with its profile when one exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
    /// Unix timestamp (seconds)
    pub date_joined: i64,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

fn default_true() -> bool {
    true
}

impl Filterable for User {
    fn field_value(&self, source_field: &str) -> Option<FieldValue<'_>> {
        match source_field {
            "username" => Some(FieldValue::Text(&self.username)),
            "email" => Some(FieldValue::Text(&self.email)),
            "is_active" => Some(FieldValue::Bool(self.is_active)),
            "is_staff" => Some(FieldValue::Bool(self.is_staff)),
            "is_superuser" => Some(FieldValue::Bool(self.is_superuser)),
            "profile.country" => self
                .profile
                .as_ref()
                .and_then(|p| p.country.as_deref())
                .map(FieldValue::Text),
            _ => None,
        }
    }
}

// ============================================================================
// Site metrics types
// ============================================================================

/// Site-wide metrics captured for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDailyMetrics {
    pub id: i64,
    pub date_for: NaiveDate,
    #[serde(default)]
    pub cumulative_active_user_count: Option<i64>,
    #[serde(default)]
    pub todays_active_user_count: Option<i64>,
    #[serde(default)]
    pub total_user_count: i64,
    #[serde(default)]
    pub course_count: i64,
    #[serde(default)]
    pub total_enrollment_count: i64,
}

impl Filterable for SiteDailyMetrics {
    fn field_value(&self, source_field: &str) -> Option<FieldValue<'_>> {
        match source_field {
            "date_for" => Some(FieldValue::Date(self.date_for)),
            _ => None,
        }
    }
}
