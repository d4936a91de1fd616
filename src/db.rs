use crate::config::AppConfig;
use crate::errors::{ServiceError, ServiceResult};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, error, info};

/// Pool settings for the part store.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub acquire_timeout: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            acquire_timeout: Duration::from_secs(8),
        }
    }
}

impl From<&AppConfig> for DbConfig {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            url: cfg.database_url.clone(),
            max_connections: cfg.db_max_connections,
            min_connections: cfg.db_min_connections,
            connect_timeout: Duration::from_secs(cfg.db_connect_timeout_secs),
            idle_timeout: Duration::from_secs(cfg.db_idle_timeout_secs),
            acquire_timeout: Duration::from_secs(cfg.db_acquire_timeout_secs),
        }
    }
}

/// Opens a pool; fails with `ServiceError::DatabaseError` when the database
/// is unreachable.
pub async fn establish_connection_with_config(
    config: &DbConfig,
) -> ServiceResult<DatabaseConnection> {
    debug!(?config, "Opening database pool");

    let mut opt = ConnectOptions::new(config.url.clone());
    opt.max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .idle_timeout(config.idle_timeout)
        .sqlx_logging(false);

    let pool = Database::connect(opt).await.map_err(|e| {
        error!(error = %e, "Could not open database pool");
        ServiceError::DatabaseError(e)
    })?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Opens a pool tuned by the `db_*` settings of `cfg`.
pub async fn establish_connection_from_app_config(
    cfg: &AppConfig,
) -> ServiceResult<DatabaseConnection> {
    establish_connection_with_config(&DbConfig::from(cfg)).await
}

/// Applies every pending migration to the `parts` schema.
pub async fn run_migrations(pool: &DatabaseConnection) -> ServiceResult<()> {
    let start = std::time::Instant::now();

    let result = crate::migrator::Migrator::up(pool, None)
        .await
        .map_err(ServiceError::DatabaseError);

    match &result {
        Ok(()) => info!(elapsed = ?start.elapsed(), "Migrations applied"),
        Err(e) => error!(elapsed = ?start.elapsed(), error = %e, "Migrations failed"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Parts;
    use sea_orm::EntityTrait;

    #[tokio::test]
    async fn migrations_create_parts_table() {
        let pool = establish_connection_with_config(&DbConfig {
            url: "sqlite::memory:".into(),
            max_connections: 1,
            ..Default::default()
        })
        .await
        .unwrap();

        run_migrations(&pool).await.unwrap();
        // Idempotent on a second run
        run_migrations(&pool).await.unwrap();

        let rows = Parts::find().all(&pool).await.unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn db_config_follows_app_config() {
        let mut cfg = AppConfig::new(
            "sqlite::memory:".into(),
            "127.0.0.1".into(),
            8080,
            "development".into(),
        );
        cfg.db_max_connections = 3;
        cfg.db_acquire_timeout_secs = 2;

        let db_cfg = DbConfig::from(&cfg);
        assert_eq!(db_cfg.url, "sqlite::memory:");
        assert_eq!(db_cfg.max_connections, 3);
        assert_eq!(db_cfg.acquire_timeout, Duration::from_secs(2));
    }
}
