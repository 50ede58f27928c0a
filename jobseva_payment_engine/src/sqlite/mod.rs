pub mod db;
mod sqlite_impl;

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
pub use sqlite_impl::SqliteDatabase;

use crate::traits::LedgerError;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, LedgerError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| LedgerError::DatabaseError(format!("Invalid database URL ({url}): {e}")))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect_with(options).await?;
    db::create_tables(&pool).await?;
    Ok(pool)
}
