//! JSON fixture files
//!
//! A fixture holds every record type in one document:
//! `{ "courses": [...], "users": [...], "site_daily_metrics": [...] }`.
//! It seeds the in-memory backend and feeds `system import`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::DataError;
use super::types::{CourseOverview, SiteDailyMetrics, User};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub courses: Vec<CourseOverview>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub site_daily_metrics: Vec<SiteDailyMetrics>,
}

impl Fixture {
    /// Read and parse a fixture file
    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DataError::fixture(path.display().to_string(), e.to_string()))?;
        let fixture = Self::parse(&content)
            .map_err(|e| DataError::fixture(path.display().to_string(), e.to_string()))?;

        tracing::debug!(
            path = %path.display(),
            courses = fixture.courses.len(),
            users = fixture.users.len(),
            site_daily_metrics = fixture.site_daily_metrics.len(),
            "Fixture loaded"
        );
        Ok(fixture)
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "courses": [{
            "id": "course-v1:edX+DemoX+2020",
            "display_name": "Demo",
            "org": "edX",
            "number": "DemoX",
            "display_org_with_default": "edX",
            "display_number_with_default": "DemoX"
        }],
        "users": [{
            "id": 1,
            "username": "alice",
            "email": "alice@example.com",
            "date_joined": 1577836800,
            "profile": { "name": "Alice", "country": "US" }
        }]
    }"#;

    #[test]
    fn test_parse_missing_sections_default_empty() {
        let fixture = Fixture::parse(SAMPLE).unwrap();
        assert_eq!(fixture.courses.len(), 1);
        assert_eq!(fixture.users.len(), 1);
        assert!(fixture.site_daily_metrics.is_empty());
        assert_eq!(
            fixture.users[0].profile.as_ref().unwrap().country.as_deref(),
            Some("US")
        );
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let json = r#"{ "site_daily_metrics": [{ "id": 1, "date_for": "Jan 1" }] }"#;
        assert!(Fixture::parse(json).is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let fixture = Fixture::load(file.path()).await.unwrap();
        assert_eq!(fixture.courses[0].org, "edX");
    }

    #[tokio::test]
    async fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        let err = Fixture::load(&path).await.unwrap_err();
        assert!(matches!(err, DataError::Fixture { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
