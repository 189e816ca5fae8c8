use secrecy::ExposeSecret;
use sqlx::{PgPool, postgres::PgPoolOptions};
use warbler_adapters::config::PostgresSetting;

/// Connect to PostgreSQL and bring the schema up to date.
///
/// # Errors
/// Fails when the database is unreachable or a migration cannot be applied.
pub async fn configure_postgresql(setting: &PostgresSetting) -> Result<PgPool, sqlx::Error> {
    let pg_pool = get_postgres_pool(setting.url.expose_secret(), setting.max_connections).await?;

    sqlx::migrate!("../warbler_adapters/migrations")
        .run(&pg_pool)
        .await?;

    Ok(pg_pool)
}

/// Create a PostgreSQL connection pool
///
/// # Arguments
/// * `url` - Database connection URL
/// * `max_connections` - Upper bound on pooled connections
pub async fn get_postgres_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
}
