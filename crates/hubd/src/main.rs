// # hubd - Hobby Hub demo binary
//
// Thin integration layer over hub-core. No business logic lives here; the
// binary only:
// 1. Reads configuration from environment variables
// 2. Initializes tracing and the runtime
// 3. Builds the store through the backend registry and seeds demo data
// 4. Runs a short scripted dashboard session and flushes the store
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `HUB_STORE_TYPE`: Store backend (memory, file). Default: memory
// - `HUB_STORE_PATH`: Path to the store file (required for file)
// - `HUB_SEED`: Insert demo data into empty collections (true/false)
// - `HUB_LOG_LEVEL`: trace, debug, info, warn, error. Default: info
//
// ## Example
//
// ```bash
// export HUB_STORE_TYPE=file
// export HUB_STORE_PATH=/var/lib/hub/store.json
// hubd
// ```

use std::env;
use std::process::ExitCode;

use anyhow::Result;
use hub_core::dashboard::DashboardEvent;
use hub_core::{Dashboard, HubConfig, StoreConfig, StoreRegistry};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum HubExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<HubExitCode> for ExitCode {
    fn from(code: HubExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    store_type: String,
    store_path: Option<String>,
    seed: bool,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            store_type: env::var("HUB_STORE_TYPE").unwrap_or_else(|_| "memory".to_string()),
            store_path: env::var("HUB_STORE_PATH").ok(),
            seed: env::var("HUB_SEED")
                .map(|s| s.to_lowercase() != "false")
                .unwrap_or(true),
            log_level: env::var("HUB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        match self.store_type.as_str() {
            "memory" | "file" => {}
            _ => anyhow::bail!(
                "HUB_STORE_TYPE '{}' is not supported. Supported types: memory, file",
                self.store_type
            ),
        }

        if self.store_type == "file" {
            match &self.store_path {
                Some(path) if !path.is_empty() => {}
                _ => anyhow::bail!(
                    "HUB_STORE_PATH is required when HUB_STORE_TYPE=file. \
                    Set it via: export HUB_STORE_PATH=/var/lib/hub/store.json"
                ),
            }
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "HUB_LOG_LEVEL '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    /// Build the library configuration
    fn hub_config(&self) -> HubConfig {
        let store = match self.store_type.as_str() {
            "file" => StoreConfig::File {
                path: self.store_path.clone().unwrap_or_default(),
            },
            _ => StoreConfig::Memory,
        };

        HubConfig {
            store,
            seed_demo_data: self.seed,
            ..HubConfig::default()
        }
    }
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return HubExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return HubExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return HubExitCode::ConfigError.into();
    }

    info!("Starting hubd");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return HubExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run(config).await {
            error!("Runtime error: {}", e);
            HubExitCode::RuntimeError
        } else {
            HubExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Run the demo session
async fn run(config: Config) -> Result<()> {
    let hub_config = config.hub_config();
    hub_config.validate()?;

    let registry = StoreRegistry::with_builtins();
    let store = registry.create(&hub_config.store).await?;
    info!("Store backend: {}", hub_config.store.type_name());

    if hub_config.seed_demo_data {
        hub_core::seed::seed_demo_data(&*store).await?;
    }

    let (mut dashboard, mut events) = Dashboard::new(store.clone(), &hub_config.dashboard);

    // Log every re-render event the walkthrough produces
    let event_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                DashboardEvent::SessionStarted { name, role } => {
                    info!("Session started: {} ({})", name, role)
                }
                DashboardEvent::SessionEnded => info!("Session ended"),
                other => info!("Dashboard event: {:?}", other),
            }
        }
    });

    // Browse as a guest
    dashboard.enter_guest().await?;
    let feed = dashboard.feed("").await?;
    info!(
        "Guest browsing {}: {} post(s)",
        dashboard.current_community(),
        feed.len()
    );

    // Log in as the seeded admin and look at the moderation panel
    dashboard.login("admin@hub.com", "admin123").await?;
    dashboard.select_community("coding").await?;
    dashboard.create_post("Welcome to the coding community!").await?;

    let overview = dashboard.moderation_overview().await?;
    info!(
        "Moderation panel: {} account(s), {} recent post(s)",
        overview.accounts.len(),
        overview.recent_posts.len()
    );

    for view in dashboard.events("").await? {
        info!(
            "Event: {} on {} at {} ({} participant(s))",
            view.event.title, view.event.date, view.event.location, view.participant_count
        );
    }

    dashboard.logout().await?;
    store.flush().await?;
    drop(dashboard);
    let _ = event_task.await;

    info!("Demo run complete");
    Ok(())
}
