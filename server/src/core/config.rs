use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT};

// =============================================================================
// Record Backend Enum (SQLite or in-memory fixture)
// =============================================================================

/// Record store backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordBackend {
    #[default]
    Sqlite,
    Memory,
}

impl fmt::Display for RecordBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordBackend::Sqlite => write!(f, "sqlite"),
            RecordBackend::Memory => write!(f, "memory"),
        }
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Database configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DatabaseFileConfig {
    /// Record backend: sqlite (default) or memory
    pub backend: Option<RecordBackend>,
    /// Fixture file for the memory backend
    pub fixture: Option<String>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub database: Option<DatabaseFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        tracing::trace!(config = ?config, "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        // Server
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        // Database
        if let Some(database) = other.database {
            let current = self
                .database
                .get_or_insert_with(DatabaseFileConfig::default);
            if database.backend.is_some() {
                tracing::trace!(backend = ?database.backend, "Merging database.backend");
                current.backend = database.backend;
            }
            if database.fixture.is_some() {
                tracing::trace!(fixture = ?database.fixture, "Merging database.fixture");
                current.fixture = database.fixture;
            }
        }

        if other.debug.is_some() {
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration (final/runtime)
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Record backend: sqlite (default) or memory
    pub backend: RecordBackend,
    /// Fixture file (required when backend = memory)
    pub fixture: Option<PathBuf>,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.figures/figures.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");
        tracing::trace!(cli = ?cli, "CLI config");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        // 1. Load from profile dir (~/.figures/figures.json) - skip if not exists
        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        // 2. Load from CLI-specified path OR local directory
        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        // 3. Extract file config values with defaults
        let file_server = file_config.server.unwrap_or_default();
        let file_database = file_config.database.unwrap_or_default();

        // 4. Layer configs: defaults -> file config -> CLI/env overrides
        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let debug = cli.debug || file_config.debug.unwrap_or(false);

        let backend = cli
            .backend
            .or(file_database.backend)
            .unwrap_or_default();

        let fixture = cli
            .fixture
            .as_ref()
            .map(|p| expand_path(&p.to_string_lossy()))
            .or_else(|| file_database.fixture.as_deref().map(expand_path));

        let config = Self {
            server: ServerConfig { host, port },
            database: DatabaseConfig { backend, fixture },
            debug,
        };

        // Validate configuration
        config.validate()?;

        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            debug = config.debug,
            backend = %config.database.backend,
            fixture = ?config.database.fixture,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        // Host must not be empty
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        // Port must be non-zero (port 0 would cause bind failure)
        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if self.database.backend == RecordBackend::Memory {
            match &self.database.fixture {
                None => anyhow::bail!(
                    "Configuration error: database.fixture is required when database.backend is 'memory'"
                ),
                Some(path) if !path.is_file() => anyhow::bail!(
                    "Configuration error: fixture file not found: {}",
                    path.display()
                ),
                Some(_) => {}
            }
        } else if self.database.fixture.is_some() {
            tracing::warn!("database.fixture is ignored unless database.backend is 'memory'");
        }

        Ok(())
    }
}

/// Get the profile config path (~/.figures/figures.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub(crate) fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_record_backend_serde() {
        let backend: RecordBackend = serde_json::from_str(r#""sqlite""#).unwrap();
        assert_eq!(backend, RecordBackend::Sqlite);

        let backend: RecordBackend = serde_json::from_str(r#""memory""#).unwrap();
        assert_eq!(backend, RecordBackend::Memory);

        assert!(serde_json::from_str::<RecordBackend>(r#""postgres""#).is_err());
    }

    #[test]
    fn test_record_backend_display() {
        assert_eq!(RecordBackend::Sqlite.to_string(), "sqlite");
        assert_eq!(RecordBackend::Memory.to_string(), "memory");
    }

    #[test]
    fn test_file_config_parse_full() {
        let json = r#"{
            "server": { "host": "0.0.0.0", "port": 8080 },
            "database": { "backend": "memory", "fixture": "./seed.json" },
            "debug": true
        }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            config.server.as_ref().unwrap().host,
            Some("0.0.0.0".to_string())
        );
        assert_eq!(config.server.as_ref().unwrap().port, Some(8080));
        let database = config.database.as_ref().unwrap();
        assert_eq!(database.backend, Some(RecordBackend::Memory));
        assert_eq!(database.fixture.as_deref(), Some("./seed.json"));
        assert_eq!(config.debug, Some(true));
    }

    #[test]
    fn test_file_config_parse_empty() {
        let config: FileConfig = serde_json::from_str("{}").unwrap();

        assert!(config.server.is_none());
        assert!(config.database.is_none());
    }

    #[test]
    fn test_file_config_parse_extra_fields() {
        let json = r#"{ "server": { "host": "localhost" }, "unknown_field": 123 }"#;
        let config: FileConfig = serde_json::from_str(json).unwrap();

        assert_eq!(
            config.server.as_ref().unwrap().host,
            Some("localhost".to_string())
        );
        assert_eq!(config.extra.get("unknown_field").unwrap(), 123);
    }

    #[test]
    fn test_file_config_merge() {
        let mut base = FileConfig {
            server: Some(ServerFileConfig {
                host: Some("base.host".to_string()),
                port: Some(1000),
            }),
            database: Some(DatabaseFileConfig {
                backend: Some(RecordBackend::Memory),
                fixture: Some("base.json".to_string()),
            }),
            debug: Some(false),
            extra: serde_json::Value::Null,
        };

        let overlay = FileConfig {
            server: Some(ServerFileConfig {
                host: None,
                port: Some(2000),
            }),
            database: Some(DatabaseFileConfig {
                backend: None,
                fixture: Some("overlay.json".to_string()),
            }),
            debug: Some(true),
            extra: serde_json::Value::Null,
        };

        base.merge(overlay);

        assert_eq!(
            base.server.as_ref().unwrap().host,
            Some("base.host".to_string())
        );
        assert_eq!(base.server.as_ref().unwrap().port, Some(2000));
        let database = base.database.as_ref().unwrap();
        assert_eq!(database.backend, Some(RecordBackend::Memory));
        assert_eq!(database.fixture.as_deref(), Some("overlay.json"));
        assert_eq!(base.debug, Some(true));
    }

    #[test]
    fn test_app_config_defaults() {
        let cli = CliConfig::default();
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.server.host, DEFAULT_HOST);
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.database.backend, RecordBackend::Sqlite);
        assert!(!config.debug);
    }

    #[test]
    fn test_app_config_cli_override() {
        let mut fixture = tempfile::NamedTempFile::new().unwrap();
        fixture.write_all(b"{}").unwrap();

        let cli = CliConfig {
            host: Some("cli.host".to_string()),
            port: Some(3000),
            debug: true,
            config: None,
            backend: Some(RecordBackend::Memory),
            fixture: Some(fixture.path().to_path_buf()),
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.server.host, "cli.host");
        assert_eq!(config.server.port, 3000);
        assert!(config.debug);
        assert_eq!(config.database.backend, RecordBackend::Memory);
        assert_eq!(config.database.fixture.as_deref(), Some(fixture.path()));
    }

    #[test]
    fn test_app_config_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let fixture_path = dir.path().join("seed.json");
        std::fs::write(&fixture_path, "{}").unwrap();
        let config_path = dir.path().join("figures.json");
        std::fs::write(
            &config_path,
            format!(
                r#"{{ "server": {{ "port": 9100 }}, "database": {{ "backend": "memory", "fixture": "{}" }} }}"#,
                fixture_path.display()
            ),
        )
        .unwrap();

        let cli = CliConfig {
            config: Some(config_path),
            port: Some(9200),
            ..Default::default()
        };
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.server.port, 9200);
        assert_eq!(config.database.backend, RecordBackend::Memory);
        assert_eq!(config.database.fixture, Some(fixture_path));
    }

    #[test]
    fn test_app_config_missing_config_file() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/nonexistent/figures.json")),
            ..Default::default()
        };
        let result = AppConfig::load(&cli);
        assert!(result.unwrap_err().to_string().contains("Config file not found"));
    }

    #[test]
    fn test_app_config_validation_server_port_zero() {
        let cli = CliConfig {
            port: Some(0),
            ..Default::default()
        };
        let result = AppConfig::load(&cli);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("server.port must be greater than 0")
        );
    }

    #[test]
    fn test_app_config_validation_empty_host() {
        let cli = CliConfig {
            host: Some(String::new()),
            ..Default::default()
        };
        let result = AppConfig::load(&cli);
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("server.host must not be empty")
        );
    }

    #[test]
    fn test_app_config_validation_memory_requires_fixture() {
        let cli = CliConfig {
            backend: Some(RecordBackend::Memory),
            ..Default::default()
        };
        let result = AppConfig::load(&cli);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("database.fixture is required")
        );

        let cli = CliConfig {
            backend: Some(RecordBackend::Memory),
            fixture: Some(PathBuf::from("/nonexistent/seed.json")),
            ..Default::default()
        };
        assert!(
            AppConfig::load(&cli)
                .unwrap_err()
                .to_string()
                .contains("fixture file not found")
        );
    }

    #[test]
    fn test_is_all_interfaces() {
        assert!(is_all_interfaces("0.0.0.0"));
        assert!(is_all_interfaces("::"));
        assert!(is_all_interfaces("[::]"));

        assert!(!is_all_interfaces("127.0.0.1"));
        assert!(!is_all_interfaces("localhost"));
        assert!(!is_all_interfaces("::1"));
    }
}
