//! Core application

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig, Commands, SystemCommands};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::core::storage::AppStorage;
use crate::data::{Fixture, ReportingService, SqliteService};

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub storage: AppStorage,
    pub reporting: Arc<ReportingService>,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        match command {
            Some(Commands::System {
                command: system_cmd,
            }) => {
                return Self::handle_system_command(&cli_config, system_cmd).await;
            }
            Some(Commands::Start) | None => {}
        }

        let app = Self::init(&cli_config).await?;
        Self::start_server(app).await
    }

    async fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        let storage = AppStorage::init(&config).await?;

        let reporting = Arc::new(
            ReportingService::init(&config.database, &storage)
                .await
                .context("Failed to initialize record store")?,
        );
        tracing::debug!(backend = %reporting.backend(), "Record store initialized");

        let shutdown = ShutdownService::new(reporting.clone());

        Ok(Self {
            shutdown,
            config,
            storage,
            reporting,
        })
    }

    async fn handle_system_command(cli: &CliConfig, cmd: SystemCommands) -> Result<()> {
        match cmd {
            SystemCommands::Prune { yes } => Self::prune_data(yes),
            SystemCommands::Import { file } => Self::import_fixture(cli, &file).await,
        }
    }

    fn prune_data(skip_confirm: bool) -> Result<()> {
        let data_dir = AppStorage::resolve_data_dir();

        if !data_dir.exists() {
            println!(
                "Nothing to prune. Data directory does not exist: {}",
                data_dir.display()
            );
            return Ok(());
        }

        let data_dir = data_dir.canonicalize().unwrap_or(data_dir);

        println!("This will permanently delete the local data directory:");
        println!("  {}", data_dir.display());
        println!();
        println!(
            "Make sure the server is not running. \
             Deleting data while the server is running will cause data corruption."
        );

        if !skip_confirm {
            print!("\nContinue? [y/N] ");
            std::io::Write::flush(&mut std::io::stdout())?;

            let mut input = String::new();
            std::io::stdin().read_line(&mut input)?;

            if !matches!(input.trim().to_lowercase().as_str(), "y" | "yes") {
                println!("Aborted.");
                return Ok(());
            }
        }

        std::fs::remove_dir_all(&data_dir)
            .with_context(|| format!("Failed to delete data directory: {}", data_dir.display()))?;
        println!("Pruned: {}", data_dir.display());
        Ok(())
    }

    /// Load a fixture file into the SQLite store regardless of the configured backend
    async fn import_fixture(cli: &CliConfig, file: &Path) -> Result<()> {
        let config = AppConfig::load(cli)?;
        let storage = AppStorage::init(&config).await?;

        let fixture = Fixture::load(file).await?;
        let service = SqliteService::init(&storage)
            .await
            .context("Failed to open SQLite database")?;

        let result = service.import_fixture(&fixture).await;
        if let Err(e) = service.checkpoint().await {
            tracing::warn!("SQLite checkpoint failed: {}", e);
        }
        service.close().await;

        let summary = result
            .with_context(|| format!("Failed to import fixture: {}", file.display()))?;
        tracing::info!(
            file = %file.display(),
            courses = summary.courses,
            users = summary.users,
            site_daily_metrics = summary.site_daily_metrics,
            "Fixture imported"
        );
        println!(
            "Imported {} courses, {} users, {} site daily metrics into {}",
            summary.courses,
            summary.users,
            summary.site_daily_metrics,
            storage.data_dir().display()
        );
        Ok(())
    }

    fn init_logging() {
        let default_filter = format!("info,{}=info", APP_NAME_LOWER);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Install signal handlers FIRST (before any blocking calls)
        app.shutdown.install_signal_handlers();

        app.start_background_tasks().await;

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            app.reporting.backend(),
            &app.storage.data_dir().display().to_string(),
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        app.shutdown.shutdown().await;

        Ok(())
    }

    pub async fn start_background_tasks(&self) {
        if let Some(h) = self
            .reporting
            .start_checkpoint_task(self.shutdown.subscribe())
        {
            self.shutdown.register(h).await;
        }

        tracing::debug!("Background tasks started");
    }
}
