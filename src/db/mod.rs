pub mod events;
pub mod pool;
pub mod tables;

use sqlx::SqlitePool;
use std::path::Path;

use crate::config::Config;

// `fetch_*` list raw rows for inspection; the integration tests rely on them.
pub use events::{
    fetch_behaviors, fetch_interactions, fetch_uploads, record_behavior, record_interaction,
    record_upload,
};
pub use pool::create_pool;

/// Database handle type (pool is internally reference counted)
pub type Db = SqlitePool;

/// Open or create the SQLite database named by the configuration
///
/// Creates all required tables on first run.
pub async fn open_database(config: &Config) -> Result<Db, sqlx::Error> {
    let path = Path::new(&config.database_path);
    tracing::info!("Opening database at: {:?}", path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                sqlx::Error::Io(e)
            })?;
        }
    }

    let db = create_pool(path, config.database_max_connections).await?;
    init_schema(&db).await?;

    Ok(db)
}

/// Create the tables if they don't exist yet; safe to run repeatedly
pub async fn init_schema(db: &Db) -> Result<(), sqlx::Error> {
    for statement in tables::SCHEMA {
        sqlx::query(*statement).execute(db).await?;
    }

    tracing::info!("Database initialized: tables {:?}", tables::ALL);

    Ok(())
}
