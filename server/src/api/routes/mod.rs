//! API route handlers

pub mod courses;
pub mod filters;
pub mod health;
pub mod site_metrics;
pub mod users;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::data::ReportingService;
use crate::data::filters::FilterQuery;

/// Shared state for the record listing endpoints
#[derive(Clone)]
pub struct RecordsApiState {
    pub reporting: Arc<ReportingService>,
    /// Log every compiled filter at info level
    pub debug: bool,
}

impl RecordsApiState {
    fn log_filter(&self, resource: &'static str, filter: &FilterQuery) {
        if self.debug {
            tracing::info!(
                resource,
                backend = %self.reporting.backend(),
                predicates = ?filter.predicates(),
                "Resolved filter"
            );
        } else {
            tracing::debug!(
                resource,
                predicates = filter.predicates().len(),
                "Resolved filter"
            );
        }
    }
}

/// Build the record listing routes
pub fn routes(reporting: Arc<ReportingService>, debug: bool) -> Router<()> {
    let state = RecordsApiState { reporting, debug };

    Router::new()
        .route("/courses", get(courses::list_courses))
        .route("/users", get(users::list_users))
        .route(
            "/site-daily-metrics",
            get(site_metrics::list_site_daily_metrics),
        )
        .with_state(state)
}
