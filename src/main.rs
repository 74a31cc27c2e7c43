//! LexVault server binary: authorization and cross-firm sharing engine
//! for the LexVault document platform.
//!
//! Loads configuration, initializes logging, connects to the database,
//! and hands off to the API crate.

use tracing_subscriber::{EnvFilter, fmt};

use lexvault_core::config::AppConfig;
use lexvault_core::error::AppError;
use lexvault_database::DatabasePool;

#[tokio::main]
async fn main() {
    let env = std::env::var("LEXVAULT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!("Loaded configuration (env: {})", env);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting LexVault v{}", env!("CARGO_PKG_VERSION"));

    let pool = DatabasePool::connect(&config.database).await?;
    pool.run_migrations().await?;

    lexvault_api::run_server(config, pool.into_pool()).await
}
