//! Factory adapter and pool initialization.

use crate::config::MySqlConfig;
use crate::contract::DbFactory;
use crate::db::connection::MySqlConnection;
use crate::db::session::SessionSource;
use crate::error::{DbError, DbResult};
use crate::logging::{SharedLogger, default_logger};
use crate::result::DEFAULT_PATH_DELIMITER;
use sqlx::MySqlPool;
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

/// Hands out [`MySqlConnection`]s, one per physical connection acquired from
/// the pool.
pub struct MySqlFactory<P: SessionSource = MySqlPool> {
    source: P,
    logger: SharedLogger,
    path_delimiter: char,
}

impl<P: SessionSource> MySqlFactory<P> {
    /// Factory over `source` logging through `tracing`.
    pub fn new(source: P) -> Self {
        Self::with_logger(source, default_logger())
    }

    pub fn with_logger(source: P, logger: SharedLogger) -> Self {
        Self {
            source,
            logger,
            path_delimiter: DEFAULT_PATH_DELIMITER,
        }
    }

    /// Delimiter handed to every connection created from now on.
    pub fn with_path_delimiter(mut self, delimiter: char) -> Self {
        self.path_delimiter = delimiter;
        self
    }

    pub fn source(&self) -> &P {
        &self.source
    }
}

impl<P: SessionSource> std::fmt::Debug for MySqlFactory<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlFactory")
            .field("path_delimiter", &self.path_delimiter)
            .finish_non_exhaustive()
    }
}

impl<P: SessionSource> DbFactory for MySqlFactory<P> {
    type Connection = MySqlConnection<P::Session>;

    async fn create_db_connection(&self) -> DbResult<Self::Connection> {
        let session = self.source.acquire().await.map_err(DbError::pool)?;
        debug!("Acquired connection from pool");
        Ok(MySqlConnection::new(session, self.logger.clone())
            .with_path_delimiter(self.path_delimiter))
    }
}

/// Build a lazily connecting pool from `config` and wrap it in a factory.
///
/// No connection is opened here: an unreachable server is reported by the
/// first [`create_db_connection`](DbFactory::create_db_connection). Must be
/// called inside a Tokio runtime.
pub fn initialize_mysql(config: MySqlConfig) -> DbResult<MySqlFactory> {
    initialize_mysql_with_logger(config, default_logger())
}

pub fn initialize_mysql_with_logger(
    config: MySqlConfig,
    logger: SharedLogger,
) -> DbResult<MySqlFactory> {
    let options = connect_options(&config)?;

    let pool_opts = &config.pool;
    let pool = MySqlPoolOptions::new()
        .min_connections(pool_opts.min_connections_or_default())
        .max_connections(pool_opts.max_connections_or_default())
        .acquire_timeout(pool_opts.acquire_timeout())
        .idle_timeout(Some(pool_opts.idle_timeout()))
        .test_before_acquire(pool_opts.test_before_acquire_or_default())
        .connect_lazy_with(options);

    info!(
        max_connections = pool_opts.max_connections_or_default(),
        "MySQL pool initialized"
    );

    Ok(MySqlFactory::with_logger(pool, logger).with_path_delimiter(config.path_delimiter))
}

/// Driver options from the configured URL. Every option the driver
/// understands, `charset` and `collation` included, is taken as given; the
/// driver's own default charset is utf8mb4.
fn connect_options(config: &MySqlConfig) -> DbResult<MySqlConnectOptions> {
    MySqlConnectOptions::from_str(&config.url)
        .map_err(|e| DbError::config(format!("Invalid MySQL connection string: {e}")))
}
