use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::{AppError, AppResult};

/// Opens a connection pool. Fails fast if the database is unreachable.
pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await?;
    log::info!("Connected to database (max {} connections)", max_connections);
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn migrate(pool: &PgPool) -> AppResult<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Migration failed: {}", e)))?;
    log::info!("Database migrations applied");
    Ok(())
}
