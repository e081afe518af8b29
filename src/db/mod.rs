// src/db/mod.rs

use sqlx::{Pool, Postgres};

/// Builds the process-wide pool. The URL is passed in so configuration
/// stays in `main` and the backup route can reuse the same string.
pub async fn connect(database_url: &str) -> anyhow::Result<Pool<Postgres>> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    println!("✅ Connected to PostgreSQL");
    Ok(pool)
}
