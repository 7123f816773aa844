use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use assetledger_core::value_history::{
    NewValueHistoryEntry, ValueHistoryEntry, ValueHistoryRepositoryTrait,
};
use assetledger_core::{Error, Result};

use super::model::{NewValueHistoryDB, ValueHistoryDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::asset_value_history;

/// Appends one history row on the given connection.
///
/// Used by the asset repository inside its own transaction so that the
/// asset row and its history entry are committed together.
pub fn insert_entry(
    conn: &mut SqliteConnection,
    new_entry: NewValueHistoryDB,
) -> Result<ValueHistoryEntry> {
    let entry_db = diesel::insert_into(asset_value_history::table)
        .values(&new_entry)
        .returning(ValueHistoryDB::as_returning())
        .get_result(conn)
        .into_core()?;
    Ok(ValueHistoryEntry::try_from(entry_db)?)
}

/// Repository for the append-only value history.
pub struct ValueHistoryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl ValueHistoryRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ValueHistoryRepositoryTrait for ValueHistoryRepository {
    async fn append(&self, entry: NewValueHistoryEntry) -> Result<ValueHistoryEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<ValueHistoryEntry> {
                let now = Utc::now().naive_utc();
                insert_entry(conn, NewValueHistoryDB::from_domain(entry, now))
            })
            .await
    }

    fn list_by_asset(&self, target_asset_id: i32) -> Result<Vec<ValueHistoryEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = asset_value_history::table
            .filter(asset_value_history::asset_id.eq(target_asset_id))
            .order((
                asset_value_history::recorded_at.desc(),
                asset_value_history::id.desc(),
            ))
            .select(ValueHistoryDB::as_select())
            .load::<ValueHistoryDB>(&mut conn)
            .into_core()?;

        rows.into_iter()
            .map(|row| ValueHistoryEntry::try_from(row).map_err(Error::from))
            .collect()
    }
}
