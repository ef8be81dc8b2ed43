//! Data storage layer
//!
//! Provides the record store for the reporting API:
//! - `filters` - query filter resolver and the declared filter sets
//! - `sqlite` - SQLite backend with filter pushdown
//! - `memory` - in-memory backend loaded from a JSON fixture
//! - `fixture` - fixture file format shared by `memory` and `system import`
//! - `types` - record types shared by all backends
//! - `error` - unified error type for all backends

pub mod error;
pub mod filters;
pub mod fixture;
pub mod memory;
pub mod sqlite;
pub mod types;

pub use error::DataError;
pub use fixture::Fixture;
pub use memory::MemoryStore;
pub use sqlite::SqliteService;

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::{DatabaseConfig, RecordBackend};
use crate::core::storage::AppStorage;
use filters::FilterQuery;
use types::{CourseOverview, SiteDailyMetrics, User};

/// Record store service enum
///
/// Wraps the backend-specific store. List operations take a compiled
/// `FilterQuery`, so parameter errors are raised before any backend work.
pub enum ReportingService {
    /// SQLite backend (default, persistent)
    Sqlite(Arc<SqliteService>),
    /// Fixture-backed store (read-only, for demos and tests)
    Memory(Arc<MemoryStore>),
}

impl ReportingService {
    /// Initialize the record store based on configuration
    ///
    /// For SQLite, uses the storage path. The memory backend requires a
    /// fixture path.
    pub async fn init(config: &DatabaseConfig, storage: &AppStorage) -> Result<Self, DataError> {
        match config.backend {
            RecordBackend::Sqlite => {
                let service = SqliteService::init(storage).await?;
                Ok(Self::Sqlite(Arc::new(service)))
            }
            RecordBackend::Memory => {
                let path = config.fixture.as_deref().ok_or_else(|| {
                    DataError::Config("A fixture file is required for the memory backend".into())
                })?;
                let store = MemoryStore::load(path).await?;
                Ok(Self::Memory(Arc::new(store)))
            }
        }
    }

    /// Get the backend type
    pub fn backend(&self) -> RecordBackend {
        match self {
            Self::Sqlite(_) => RecordBackend::Sqlite,
            Self::Memory(_) => RecordBackend::Memory,
        }
    }

    pub async fn list_courses(&self, filter: &FilterQuery) -> Result<Vec<CourseOverview>, DataError> {
        match self {
            Self::Sqlite(s) => sqlite::repositories::list_courses(s.pool(), filter)
                .await
                .map_err(Into::into),
            Self::Memory(m) => Ok(m.list_courses(filter)),
        }
    }

    pub async fn list_users(&self, filter: &FilterQuery) -> Result<Vec<User>, DataError> {
        match self {
            Self::Sqlite(s) => sqlite::repositories::list_users(s.pool(), filter)
                .await
                .map_err(Into::into),
            Self::Memory(m) => Ok(m.list_users(filter)),
        }
    }

    pub async fn list_site_daily_metrics(
        &self,
        filter: &FilterQuery,
    ) -> Result<Vec<SiteDailyMetrics>, DataError> {
        match self {
            Self::Sqlite(s) => sqlite::repositories::list_site_daily_metrics(s.pool(), filter)
                .await
                .map_err(Into::into),
            Self::Memory(m) => Ok(m.list_site_daily_metrics(filter)),
        }
    }

    /// Run a WAL checkpoint (SQLite only)
    pub async fn checkpoint(&self) -> Result<(), DataError> {
        match self {
            Self::Sqlite(s) => s.checkpoint().await.map_err(Into::into),
            Self::Memory(_) => Ok(()),
        }
    }

    /// Close the store gracefully
    pub async fn close(&self) {
        match self {
            Self::Sqlite(s) => s.close().await,
            Self::Memory(_) => {}
        }
    }

    /// Start the background checkpoint task (SQLite only)
    pub fn start_checkpoint_task(&self, shutdown_rx: watch::Receiver<bool>) -> Option<JoinHandle<()>> {
        match self {
            Self::Sqlite(s) => Some(s.start_checkpoint_task(shutdown_rx)),
            Self::Memory(_) => None,
        }
    }
}
