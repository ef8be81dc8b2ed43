//! In-memory record store
//!
//! Holds a fixture for the lifetime of the process and evaluates filters in
//! process. Records are immutable after load, so the store is shared without
//! locking. Results keep fixture order.

use std::path::Path;

use super::error::DataError;
use super::filters::FilterQuery;
use super::fixture::Fixture;
use super::types::{CourseOverview, SiteDailyMetrics, User};

pub struct MemoryStore {
    fixture: Fixture,
}

impl MemoryStore {
    pub fn new(fixture: Fixture) -> Self {
        Self { fixture }
    }

    pub async fn load(path: &Path) -> Result<Self, DataError> {
        let fixture = Fixture::load(path).await?;
        tracing::debug!(path = %path.display(), "MemoryStore initialized");
        Ok(Self::new(fixture))
    }

    pub fn list_courses(&self, filter: &FilterQuery) -> Vec<CourseOverview> {
        filter.apply(&self.fixture.courses).into_iter().cloned().collect()
    }

    pub fn list_users(&self, filter: &FilterQuery) -> Vec<User> {
        filter.apply(&self.fixture.users).into_iter().cloned().collect()
    }

    pub fn list_site_daily_metrics(&self, filter: &FilterQuery) -> Vec<SiteDailyMetrics> {
        filter
            .apply(&self.fixture.site_daily_metrics)
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{COURSE_FILTER, SITE_DAILY_METRICS_FILTER, USER_FILTER};

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn store() -> MemoryStore {
        let fixture = Fixture::parse(
            r#"{
            "courses": [
                {"id": "c1", "display_name": "Intro Python", "org": "MITx", "number": "6.0001",
                 "display_org_with_default": "MITx", "display_number_with_default": "6.0001"},
                {"id": "c2", "display_name": "Python Data", "org": "HarvardX", "number": "PH125",
                 "display_org_with_default": "HarvardX", "display_number_with_default": "PH125"}
            ],
            "users": [
                {"id": 1, "username": "ann", "email": "ann@a.org", "date_joined": 0,
                 "profile": {"name": "Ann", "country": "DE"}},
                {"id": 2, "username": "ben", "email": "ben@b.org", "date_joined": 0,
                 "is_active": false}
            ],
            "site_daily_metrics": [
                {"id": 1, "date_for": "2020-01-01"},
                {"id": 2, "date_for": "2020-01-15"},
                {"id": 3, "date_for": "2020-02-01"}
            ]
        }"#,
        )
        .unwrap();
        MemoryStore::new(fixture)
    }

    #[test]
    fn test_list_courses() {
        let store = store();
        let filter = COURSE_FILTER.compile(&params(&[("display_name", "python")])).unwrap();
        assert_eq!(store.list_courses(&filter).len(), 2);

        let filter = COURSE_FILTER.compile(&params(&[("org", "mitx")])).unwrap();
        let found = store.list_courses(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "c1");
    }

    #[test]
    fn test_list_users_country_and_active() {
        let store = store();
        let filter = USER_FILTER.compile(&params(&[("country", "de")])).unwrap();
        let found = store.list_users(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].username, "ann");

        let filter = USER_FILTER.compile(&params(&[("is_active", "0")])).unwrap();
        assert_eq!(store.list_users(&filter)[0].username, "ben");
    }

    #[test]
    fn test_list_metrics_range() {
        let store = store();
        let filter = SITE_DAILY_METRICS_FILTER
            .compile(&params(&[("date_0", "2020-01-10"), ("date_1", "2020-01-20")]))
            .unwrap();
        let found = store.list_site_daily_metrics(&filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }
}
