use std::{path::Path as StdPath, sync::Arc};

use crate::{
    config::Config,
    error::ApiResult,
    main_lib::AppState,
};
use anyhow::Context;
use axum::{
    extract::State,
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use assetledger_storage_sqlite::backup_database;
use tokio::task;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod assets;

pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct BackupDatabaseResponse {
    path: String,
    filename: String,
}

async fn backup_database_route(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<BackupDatabaseResponse>> {
    let db_path = state.db_path.clone();
    let backup_path = task::spawn_blocking(move || backup_database(&db_path))
        .await
        .context("Failed to execute backup task")??;

    let filename = StdPath::new(&backup_path)
        .file_name()
        .and_then(|f| f.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid backup filename"))?
        .to_string();

    Ok(Json(BackupDatabaseResponse {
        path: backup_path,
        filename,
    }))
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    if config.cors_allow.iter().any(|o| o == "*") {
        return Ok(CorsLayer::new().allow_origin(Any));
    }
    let origins = config
        .cors_allow
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", o))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(CorsLayer::new().allow_origin(origins))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = cors_layer(config)?;

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/utilities/database/backup", post(backup_database_route))
        .merge(assets::router());

    Ok(Router::new()
        .nest("/api/v1", api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
}
