//! Database pool and schema migrations.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup creates the shared SQLx pool and brings the schema up to date
//! before the router accepts traffic. Pool sizing comes from the environment
//! so deployments can tune it without a rebuild.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

/// Schema migrations embedded at compile time, applied in order on startup.
static MIGRATOR: Migrator = sqlx::migrate!("src/db/migrations");

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

fn db_max_connections() -> u32 {
    std::env::var("DB_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
}

/// Create the `PostgreSQL` pool and run pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(db_max_connections())
        .connect(database_url)
        .await?;

    MIGRATOR.run(&pool).await?;

    Ok(pool)
}
