use std::sync::Arc;

use crate::config::{Config, LogFormat};
use assetledger_core::{AssetLedgerService, AssetLedgerServiceTrait};
use assetledger_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, AssetRepository, ValueHistoryRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub ledger_service: Arc<dyn AssetLedgerServiceTrait>,
    /// Resolved database file; backups land in a `backups/` directory beside it.
    pub db_path: String,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let asset_repository = Arc::new(AssetRepository::new(pool.clone(), writer.clone()));
    let value_history_repository = Arc::new(ValueHistoryRepository::new(pool.clone(), writer));
    let ledger_service: Arc<dyn AssetLedgerServiceTrait> = Arc::new(AssetLedgerService::new(
        asset_repository,
        value_history_repository,
    ));

    Ok(Arc::new(AppState {
        ledger_service,
        db_path,
    }))
}
