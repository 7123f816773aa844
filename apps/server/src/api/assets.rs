//! REST endpoints for the asset ledger.

use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::NaiveDateTime;
use serde::Deserialize;
use assetledger_core::{
    Asset, AssetFilter, NewAsset, PortfolioSummary, UpdateAssetDetails, UpdateAssetValue,
    ValueHistoryEntry,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListAssetsQuery {
    include_removed: Option<bool>,
    category: Option<String>,
}

impl From<ListAssetsQuery> for AssetFilter {
    fn from(query: ListAssetsQuery) -> Self {
        AssetFilter {
            include_removed: query.include_removed.unwrap_or(false),
            category: query.category.filter(|c| !c.is_empty()),
        }
    }
}

/// Body of `POST /assets/{id}/remove`. Both the body and the date are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveAssetRequest {
    removal_date: Option<NaiveDateTime>,
}

async fn list_assets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListAssetsQuery>,
) -> ApiResult<Json<Vec<Asset>>> {
    let assets = state.ledger_service.list_assets(&query.into())?;
    Ok(Json(assets))
}

async fn create_asset(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewAsset>,
) -> ApiResult<(StatusCode, Json<Asset>)> {
    let created = state.ledger_service.create_asset(payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn get_asset(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Asset>> {
    Ok(Json(state.ledger_service.get_asset(id)?))
}

async fn update_asset_details(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateAssetDetails>,
) -> ApiResult<Json<Asset>> {
    let updated = state.ledger_service.update_details(id, payload).await?;
    Ok(Json(updated))
}

async fn update_asset_value(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    Json(payload): Json<UpdateAssetValue>,
) -> ApiResult<Json<Asset>> {
    let updated = state.ledger_service.update_value(id, payload).await?;
    Ok(Json(updated))
}

async fn remove_asset(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    payload: Option<Json<RemoveAssetRequest>>,
) -> ApiResult<Json<Asset>> {
    let request = payload.map(|Json(body)| body).unwrap_or_default();
    let removed = state
        .ledger_service
        .remove_asset(id, request.removal_date)
        .await?;
    Ok(Json(removed))
}

async fn restore_asset(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Asset>> {
    Ok(Json(state.ledger_service.restore_asset(id).await?))
}

async fn get_value_history(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ValueHistoryEntry>>> {
    Ok(Json(state.ledger_service.get_value_history(id)?))
}

async fn get_summary(State(state): State<Arc<AppState>>) -> ApiResult<Json<PortfolioSummary>> {
    Ok(Json(state.ledger_service.get_summary()?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/assets", get(list_assets).post(create_asset))
        .route("/assets/summary", get(get_summary))
        .route("/assets/{id}", get(get_asset).put(update_asset_details))
        .route("/assets/{id}/value", put(update_asset_value))
        .route("/assets/{id}/remove", post(remove_asset))
        .route("/assets/{id}/restore", post(restore_asset))
        .route("/assets/{id}/history", get(get_value_history))
}
