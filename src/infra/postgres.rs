pub mod event_repo;
pub mod person_repo;
pub mod store;

pub use store::PgTimelineStore;

use {
    crate::{config::Config, domain::error::TimelineError},
    sqlx::{PgPool, postgres::PgPoolOptions},
};

pub async fn connect(config: &Config) -> Result<PgPool, TimelineError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}

/// Applies the embedded migrations in `migrations/`.
pub async fn migrate(pool: &PgPool) -> Result<(), TimelineError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| TimelineError::Database(sqlx::Error::Migrate(Box::new(e))))
}
