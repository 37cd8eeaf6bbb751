use anyhow::{Context, Result};
use neighborhood_config::AppConfig;
use neighborhood_database::{prepare_database, run_migrations};
use neighborhood_gateway::GatewayState;
use sqlx::SqlitePool;
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::DEBUG)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

#[derive(Clone)]
pub struct BackendServices {
    pub db_pool: SqlitePool,
    pub gateway: GatewayState,
}

impl BackendServices {
    /// Opens the database, applies pending migrations and wires the services.
    pub async fn initialise(config: &AppConfig) -> Result<Self> {
        let db_pool = open_database(config).await?;
        let gateway = GatewayState::new(db_pool.clone(), config);

        info!(
            database = %config.database.url,
            utc_offset_minutes = config.locale.utc_offset_minutes,
            "backend services ready"
        );

        Ok(Self { db_pool, gateway })
    }
}

/// Connects to the configured database and brings its schema up to date.
pub async fn open_database(config: &AppConfig) -> Result<SqlitePool> {
    let db_pool = prepare_database(&config.database)
        .await
        .context("failed to connect to database")?;
    run_migrations(&db_pool).await?;
    Ok(db_pool)
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
