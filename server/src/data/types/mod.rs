//! Shared data types for all record store backends
//!
//! Row types used by both the SQLite and in-memory backends so that API
//! handlers see one data model.

mod records;

pub use records::{CourseOverview, SiteDailyMetrics, User, UserProfile};
