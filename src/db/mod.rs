//! Database layer: connection pool and the user directory for PostgreSQL.

mod users;

use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use crate::config::Config;

pub use users::{PgUserStore, UserRecord, UserStore};

pub type DbPool = sqlx::PgPool;

/// Open the Postgres pool, sized from configuration.
pub async fn connect(config: &Config) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await
}
