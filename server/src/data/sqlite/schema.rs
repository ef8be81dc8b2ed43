//! SQLite schema definitions
//!
//! `SCHEMA` is the full current schema, applied in one step to fresh
//! databases. Existing databases are brought forward by the incremental
//! migrations in `migrations.rs`.
//!
//! Text columns filtered case-insensitively carry a `*_lower` companion
//! written by the repositories with Unicode lower-casing.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Course overviews
-- =============================================================================
CREATE TABLE IF NOT EXISTS course_overviews (
    id TEXT PRIMARY KEY CHECK(length(id) >= 1),
    display_name TEXT,
    org TEXT NOT NULL,
    number TEXT NOT NULL,
    display_org_with_default TEXT NOT NULL,
    display_number_with_default TEXT NOT NULL,
    display_name_lower TEXT,
    display_org_with_default_lower TEXT NOT NULL,
    display_number_with_default_lower TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_course_overviews_org_lower
    ON course_overviews(display_org_with_default_lower);

-- =============================================================================
-- 2. Users
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL UNIQUE CHECK(length(username) >= 1),
    email TEXT NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT 1,
    is_staff BOOLEAN NOT NULL DEFAULT 0,
    is_superuser BOOLEAN NOT NULL DEFAULT 0,
    date_joined INTEGER NOT NULL,
    username_lower TEXT NOT NULL,
    email_lower TEXT NOT NULL
);

-- =============================================================================
-- 3. User profiles (one per user at most)
-- =============================================================================
CREATE TABLE IF NOT EXISTS user_profiles (
    user_id INTEGER PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
    name TEXT NOT NULL DEFAULT '',
    country TEXT,
    country_lower TEXT
);

CREATE INDEX IF NOT EXISTS idx_user_profiles_country_lower ON user_profiles(country_lower);

-- =============================================================================
-- 4. Site daily metrics (one row per day)
-- =============================================================================
CREATE TABLE IF NOT EXISTS site_daily_metrics (
    id INTEGER PRIMARY KEY,
    date_for TEXT NOT NULL UNIQUE,
    cumulative_active_user_count INTEGER,
    todays_active_user_count INTEGER,
    total_user_count INTEGER NOT NULL DEFAULT 0,
    course_count INTEGER NOT NULL DEFAULT 0,
    total_enrollment_count INTEGER NOT NULL DEFAULT 0
);
"#;
