use std::str::FromStr;

use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    PgPool,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("unable to parse DATABASE_URL")]
    InvalidUrl(#[source] sqlx::Error),
    #[error("unable to create connection pool")]
    Pool(#[source] sqlx::Error),
    #[error("unable to ping database")]
    Ping(#[source] sqlx::Error),
}

/// Opens the shared pool and checks the database answers before any traffic is served.
pub async fn connect(cfg: &DatabaseConfig) -> Result<PgPool, ConnectError> {
    let options = PgConnectOptions::from_str(&cfg.url).map_err(ConnectError::InvalidUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(cfg.max_connections)
        .acquire_timeout(cfg.acquire_timeout)
        .connect_with(options)
        .await
        .map_err(ConnectError::Pool)?;

    ping(&pool).await.map_err(ConnectError::Ping)?;

    info!(
        max_connections = cfg.max_connections,
        "connected to PostgreSQL"
    );
    Ok(pool)
}

pub async fn ping(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    debug!("database ping ok");
    Ok(())
}
