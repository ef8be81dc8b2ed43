//! Declared filter sets
//!
//! Built on first use and shared read-only by every request.

use std::sync::LazyLock;

use super::types::{FieldDeclaration, FilterSet, ValueType};

pub const COURSES: &str = "courses";
pub const USERS: &str = "users";
pub const SITE_DAILY_METRICS: &str = "site-daily-metrics";

/// Course overview filters
pub static COURSE_FILTER: LazyLock<FilterSet> = LazyLock::new(|| {
    FilterSet::new(
        COURSES,
        vec![
            FieldDeclaration::icontains("display_name"),
            FieldDeclaration::iexact("org").source("display_org_with_default"),
            FieldDeclaration::iexact("number").source("display_number_with_default"),
            FieldDeclaration::icontains("number_contains").source("display_number_with_default"),
        ],
    )
});

/// User account filters. `country` reads the attached profile.
pub static USER_FILTER: LazyLock<FilterSet> = LazyLock::new(|| {
    FilterSet::new(
        USERS,
        vec![
            FieldDeclaration::boolean("is_active"),
            FieldDeclaration::icontains("username"),
            FieldDeclaration::icontains("email"),
            FieldDeclaration::iexact("country").source("profile.country"),
            FieldDeclaration::exact("is_staff", ValueType::Boolean),
            FieldDeclaration::exact("is_superuser", ValueType::Boolean),
        ],
    )
});

/// Site daily metrics filters. `date_for` and the `date` range share a field.
pub static SITE_DAILY_METRICS_FILTER: LazyLock<FilterSet> = LazyLock::new(|| {
    FilterSet::new(
        SITE_DAILY_METRICS,
        vec![
            FieldDeclaration::exact("date_for", ValueType::Date),
            FieldDeclaration::range("date", ValueType::Date).source("date_for"),
        ],
    )
});

/// Resource names with a declared filter set
pub const RESOURCES: &[&str] = &[COURSES, USERS, SITE_DAILY_METRICS];

/// Filter set for a resource name, as used in URLs
pub fn by_resource(resource: &str) -> Option<&'static FilterSet> {
    match resource {
        COURSES => Some(&COURSE_FILTER),
        USERS => Some(&USER_FILTER),
        SITE_DAILY_METRICS => Some(&SITE_DAILY_METRICS_FILTER),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::types::ComparisonKind;

    #[test]
    fn test_sets_build() {
        assert_eq!(COURSE_FILTER.fields().len(), 4);
        assert_eq!(USER_FILTER.fields().len(), 6);
        assert_eq!(SITE_DAILY_METRICS_FILTER.fields().len(), 2);
    }

    #[test]
    fn test_by_resource() {
        for resource in RESOURCES {
            let set = by_resource(resource).unwrap();
            assert_eq!(set.resource(), *resource);
        }
        assert!(by_resource("enrollments").is_none());
    }

    #[test]
    fn test_course_aliases() {
        let org = COURSE_FILTER.field("org").unwrap();
        assert_eq!(org.source_field, "display_org_with_default");
        assert!(!org.case_sensitive);
        let number_contains = COURSE_FILTER.field("number_contains").unwrap();
        assert_eq!(number_contains.kind, ComparisonKind::Contains);
        assert_eq!(number_contains.source_field, "display_number_with_default");
    }

    #[test]
    fn test_user_staff_flags_are_boolean_exact() {
        let staff = USER_FILTER.field("is_staff").unwrap();
        assert_eq!(staff.kind, ComparisonKind::Exact);
        assert_eq!(staff.value_type, ValueType::Boolean);
        assert_eq!(USER_FILTER.field("country").unwrap().source_field, "profile.country");
    }

    #[test]
    fn test_metrics_date_parameters() {
        let date = SITE_DAILY_METRICS_FILTER.field("date").unwrap();
        assert_eq!(date.parameters(), vec!["date_0", "date_1"]);
        assert_eq!(date.source_field, "date_for");
    }
}
