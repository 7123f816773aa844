//! SQLite repository implementation for assets.
//!
//! Every write runs as a single job on the writer actor, so the asset row
//! mutation and the matching value history append share one transaction.

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;

use assetledger_core::assets::{
    Asset, AssetFilter, AssetRepositoryTrait, NewAsset, UpdateAssetDetails, UpdateAssetValue,
    INITIAL_VALUE_NOTE,
};
use assetledger_core::{Error, Result};

use super::model::{AssetDB, AssetDetailsChangeset, NewAssetDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::assets;
use crate::utils::format_decimal;
use crate::value_history::{insert_entry, NewValueHistoryDB};

/// Repository for managing asset data in the database.
pub struct AssetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl AssetRepository {
    /// Creates a new AssetRepository instance.
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

/// Loads an asset on the given connection, failing with not found.
fn load_asset(conn: &mut SqliteConnection, asset_id: i32) -> Result<Asset> {
    let asset_db = assets::table
        .find(asset_id)
        .select(AssetDB::as_select())
        .first::<AssetDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(format!("Asset not found: {}", asset_id)))?;
    Ok(Asset::try_from(asset_db)?)
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

#[async_trait]
impl AssetRepositoryTrait for AssetRepository {
    async fn create(&self, new_asset: NewAsset) -> Result<Asset> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let created_at = now();
                let asset_db = diesel::insert_into(assets::table)
                    .values(&NewAssetDB::from_domain(new_asset, created_at))
                    .returning(AssetDB::as_returning())
                    .get_result(conn)
                    .into_core()?;

                insert_entry(
                    conn,
                    NewValueHistoryDB {
                        asset_id: asset_db.id,
                        value: asset_db.current_value.clone(),
                        recorded_at: created_at,
                        notes: Some(INITIAL_VALUE_NOTE.to_string()),
                        created_at,
                    },
                )?;

                debug!("Created asset {} with initial value", asset_db.id);
                Ok(Asset::try_from(asset_db)?)
            })
            .await
    }

    async fn update_value(&self, asset_id: i32, update: UpdateAssetValue) -> Result<Asset> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                load_asset(conn, asset_id)?.ensure_active()?;

                let updated_at = now();
                let value = format_decimal(&update.value);

                diesel::update(assets::table.find(asset_id))
                    .set((
                        assets::current_value.eq(&value),
                        assets::last_updated.eq(updated_at),
                    ))
                    .execute(conn)
                    .into_core()?;

                insert_entry(
                    conn,
                    NewValueHistoryDB {
                        asset_id,
                        value,
                        recorded_at: updated_at,
                        notes: update.notes,
                        created_at: updated_at,
                    },
                )?;

                load_asset(conn, asset_id)
            })
            .await
    }

    async fn update_details(&self, asset_id: i32, details: UpdateAssetDetails) -> Result<Asset> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let current = load_asset(conn, asset_id)?;
                // A removed asset keeps its last_updated so removed_at stays >= last_updated.
                let touched_at = current.is_active().then(now);
                let changes = AssetDetailsChangeset::from_domain(details, touched_at);

                if !changes.has_changes() {
                    return Ok(current);
                }

                diesel::update(assets::table.find(asset_id))
                    .set(&changes)
                    .execute(conn)
                    .into_core()?;

                load_asset(conn, asset_id)
            })
            .await
    }

    async fn remove(&self, asset_id: i32, removal_date: Option<NaiveDateTime>) -> Result<Asset> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let current = load_asset(conn, asset_id)?;
                if !current.is_active() {
                    debug!("Asset {} is already removed", asset_id);
                    return Ok(current);
                }

                let removed_at = current.resolve_removal_time(removal_date, now())?;
                diesel::update(assets::table.find(asset_id))
                    .set((
                        assets::removed.eq(true),
                        assets::removed_at.eq(Some(removed_at)),
                    ))
                    .execute(conn)
                    .into_core()?;

                load_asset(conn, asset_id)
            })
            .await
    }

    async fn restore(&self, asset_id: i32) -> Result<Asset> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Asset> {
                let affected = diesel::update(assets::table.find(asset_id))
                    .set((
                        assets::removed.eq(false),
                        assets::removed_at.eq(None::<NaiveDateTime>),
                    ))
                    .execute(conn)
                    .into_core()?;

                if affected == 0 {
                    return Err(Error::not_found(format!("Asset not found: {}", asset_id)));
                }

                load_asset(conn, asset_id)
            })
            .await
    }

    fn get_by_id(&self, asset_id: i32) -> Result<Asset> {
        let mut conn = get_connection(&self.pool)?;
        load_asset(&mut conn, asset_id)
    }

    fn list(&self, filter: &AssetFilter) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = assets::table.into_boxed();
        if !filter.include_removed {
            query = query.filter(assets::removed.eq(false));
        }
        if let Some(category) = &filter.category {
            query = query.filter(assets::category.eq(category.clone()));
        }

        let rows = query
            .order((assets::last_updated.desc(), assets::id.desc()))
            .select(AssetDB::as_select())
            .load::<AssetDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| Asset::try_from(row).map_err(Error::from))
            .collect()
    }
}
