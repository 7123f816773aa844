//! Database setup: file location, pragmas, connection pool, migrations and backups.

use chrono::Local;
use log::{error, info};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, Pool, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use assetledger_core::errors::{DatabaseError, Error, Result};

use crate::errors::{IntoCore, StorageError};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub type DbPool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub mod write_actor;
pub use write_actor::{spawn_writer, WriteHandle};

/// Resolves the database file and prepares it for use.
///
/// Creates the parent directory when missing and switches the file to WAL
/// mode. Returns the resolved database path.
pub fn init(app_data_dir: &str) -> Result<String> {
    let db_path = get_db_path(app_data_dir);

    if let Some(db_dir) = Path::new(&db_path).parent() {
        if !db_dir.as_os_str().is_empty() && !db_dir.exists() {
            fs::create_dir_all(db_dir)?;
        }
    }

    let mut conn = SqliteConnection::establish(&db_path).map_err(StorageError::from)?;
    conn.batch_execute(
        "
            PRAGMA journal_mode = WAL;
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous  = NORMAL;
        ",
    )
    .map_err(StorageError::from)?;

    Ok(db_path)
}

/// Builds the connection pool. Every connection enforces foreign keys.
pub fn create_pool(db_path: &str) -> Result<Arc<DbPool>> {
    let manager = ConnectionManager::<SqliteConnection>::new(db_path);
    let pool = r2d2::Pool::builder()
        .max_size(8)
        .min_idle(Some(1))
        .connection_timeout(Duration::from_secs(30))
        .connection_customizer(Box::new(ConnectionCustomizer))
        .build(manager)
        .map_err(|e| DatabaseError::PoolCreationFailed(e.to_string()))?;
    Ok(Arc::new(pool))
}

pub fn run_migrations(pool: &DbPool) -> Result<()> {
    info!("Running database migrations");
    let mut connection = get_connection(pool)?;

    let applied = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
        error!("Database migration failed: {}", e);
        Error::Database(DatabaseError::MigrationFailed(e.to_string()))
    })?;

    if applied.is_empty() {
        info!("No pending migrations to apply.");
    } else {
        info!("Applied the following migrations:");
        for migration_version in &applied {
            info!("  - {}", migration_version);
        }
    }

    Ok(())
}

const DB_FILE_EXTENSIONS: [&str; 3] = ["db", "sqlite", "sqlite3"];

/// True when `path` names a database file rather than a data directory.
fn is_db_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| DB_FILE_EXTENSIONS.contains(&ext))
}

/// Database file inside `app_data_dir`, unless `DATABASE_URL` overrides it.
///
/// A path ending in `.db`, `.sqlite` or `.sqlite3` is used as is; anything
/// else is treated as a directory holding `app.db`.
pub fn get_db_path(app_data_dir: &str) -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| {
        let dir = Path::new(app_data_dir);
        if is_db_file(dir) {
            app_data_dir.to_string()
        } else {
            dir.join("app.db").to_string_lossy().into_owned()
        }
    })
}

/// Gets a connection from the pool
pub fn get_connection(pool: &Pool<ConnectionManager<SqliteConnection>>) -> Result<DbConnection> {
    pool.get().into_core()
}

fn create_backup_path(app_data_dir: &str) -> Result<String> {
    let backup_dir = Path::new(app_data_dir)
        .parent()
        .filter(|_| is_db_file(Path::new(app_data_dir)))
        .unwrap_or_else(|| Path::new(app_data_dir))
        .join("backups");
    fs::create_dir_all(&backup_dir).map_err(|e| {
        error!("Failed to create backup directory: {}", e);
        Error::Database(DatabaseError::BackupFailed(e.to_string()))
    })?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let backup_file = format!("assetledger_backup_{}.db", timestamp);
    Ok(backup_dir.join(backup_file).to_string_lossy().into_owned())
}

/// Copies the database file, and its WAL/SHM companions when present, into
/// a timestamped file under `backups/`. Returns the backup path.
pub fn backup_database(app_data_dir: &str) -> Result<String> {
    let db_path = get_db_path(app_data_dir);
    let backup_path = create_backup_path(app_data_dir)?;

    info!(
        "Creating database backup from {} to {}",
        db_path, backup_path
    );

    copy_file(&db_path, &backup_path)?;
    for suffix in ["-wal", "-shm"] {
        let source = format!("{}{}", db_path, suffix);
        if Path::new(&source).exists() {
            copy_file(&source, &format!("{}{}", backup_path, suffix))?;
        }
    }

    info!("Database backup created successfully");
    Ok(backup_path)
}

fn copy_file(from: &str, to: &str) -> Result<()> {
    fs::copy(from, to).map_err(|e| {
        error!("Failed to copy {} to {}: {}", from, to, e);
        Error::Database(DatabaseError::BackupFailed(e.to_string()))
    })?;
    Ok(())
}

#[derive(Debug)]
struct ConnectionCustomizer;

impl r2d2::CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), r2d2::Error> {
        conn.batch_execute(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA busy_timeout = 30000;
            PRAGMA synchronous = NORMAL;
        ",
        )
        .map_err(r2d2::Error::QueryError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_migrate_and_backup() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        let data_dir_str = data_dir.to_string_lossy().to_string();

        let db_path = init(&data_dir_str).expect("init");
        assert!(Path::new(&db_path).exists());

        let pool = create_pool(&db_path).expect("pool");
        run_migrations(&pool).expect("migrations");
        // Second run has nothing left to apply.
        run_migrations(&pool).expect("idempotent migrations");

        let backup = backup_database(&data_dir_str).expect("backup");
        assert!(Path::new(&backup).exists());
        assert!(backup.contains("assetledger_backup_"));
    }

    #[test]
    fn test_sqlite_extensions_are_database_files() {
        assert_eq!(get_db_path("./data/ledger.sqlite"), "./data/ledger.sqlite");
        assert_eq!(get_db_path("./data/ledger.sqlite3"), "./data/ledger.sqlite3");
        assert_eq!(get_db_path("./data/ledger.db"), "./data/ledger.db");
        assert_eq!(
            Path::new(&get_db_path("./data")),
            Path::new("./data").join("app.db")
        );
    }

    #[test]
    fn test_backup_of_sqlite_file_lands_beside_it() {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_file = temp_dir.path().join("ledger.sqlite");
        let db_file_str = db_file.to_string_lossy().to_string();

        let db_path = init(&db_file_str).expect("init");
        assert_eq!(db_path, db_file_str);
        assert!(db_file.is_file());

        let backup = backup_database(&db_file_str).expect("backup");
        assert!(Path::new(&backup).starts_with(temp_dir.path().join("backups")));
    }
}
