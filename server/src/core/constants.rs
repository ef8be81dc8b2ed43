// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "Figures";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "figures";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".figures";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "figures.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "FIGURES_CONFIG";

// =============================================================================
// Environment Variables - Debug
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "FIGURES_DEBUG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "FIGURES_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "FIGURES_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "FIGURES_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8020;

/// Request body limit. The API is read-only, so requests carry no payload.
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "FIGURES_DATA_DIR";

/// Environment variable for the record store backend (sqlite or memory)
pub const ENV_BACKEND: &str = "FIGURES_BACKEND";

/// Environment variable for the fixture file used by the memory backend
pub const ENV_FIXTURE: &str = "FIGURES_FIXTURE";

// =============================================================================
// SQLite Database
// =============================================================================

/// SQLite database filename
pub const SQLITE_DB_FILENAME: &str = "figures.db";

/// SQLite connection pool max connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// SQLite busy timeout in seconds
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// SQLite cache size (negative = KB, so -64000 = 64MB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// SQLite WAL auto-checkpoint threshold (pages, ~4MB at 1000)
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// WAL checkpoint interval in seconds (5 minutes)
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
