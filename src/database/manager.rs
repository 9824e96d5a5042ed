use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the data-access layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL: {0}")]
    InvalidDatabaseUrl(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Unexpected row format in {0}")]
    RowFormat(&'static str),

    #[error(transparent)]
    Sqlx(sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DatabaseError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db) if db.constraint().is_some() => {
                DatabaseError::Constraint(db.message().to_string())
            }
            _ => DatabaseError::Sqlx(err),
        }
    }
}

/// Builds the connection pool shared by every request.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connection options from `DATABASE_URL` when set, else from the discrete settings
    pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions, DatabaseError> {
        let options = match &config.url {
            Some(url) => PgConnectOptions::from_str(url)
                .map_err(|e| DatabaseError::InvalidDatabaseUrl(e.to_string()))?,
            None => PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .database(&config.name)
                .username(&config.user)
                .password(&config.password),
        };

        if config.enable_query_logging {
            Ok(options)
        } else {
            Ok(options.disable_statement_logging())
        }
    }

    /// Create the pool. Connections are opened lazily on first acquire.
    pub fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let options = Self::connect_options(config)?;
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect_lazy_with(options);

        info!(target_db = %config.display_target(), "Created database pool");
        Ok(pool)
    }

    /// Apply the bundled schema migrations
    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }
}
