//! Error types for the MySQL adapter.
//!
//! Every variant keeps the driver error it came from as its source. The
//! variant only records *where* the failure happened (pool acquire,
//! transaction control, statement execution); the driver error itself is
//! never rewritten.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    /// Acquiring a connection from the pool failed (exhaustion, timeout,
    /// connectivity).
    #[error("Connection pool error: {source}")]
    Pool {
        #[source]
        source: sqlx::Error,
    },

    /// Transaction control (begin/commit/rollback) failed.
    #[error("Driver error during {operation}: {source}")]
    Driver {
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Statement execution failed (syntax, placeholder mismatch, constraint).
    #[error("Statement error: {source}")]
    Statement {
        #[source]
        source: sqlx::Error,
    },

    /// The connection configuration could not be turned into driver options.
    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl DbError {
    /// Create a pool acquisition error.
    pub fn pool(source: sqlx::Error) -> Self {
        Self::Pool { source }
    }

    /// Create a transaction control error.
    pub fn driver(operation: &'static str, source: sqlx::Error) -> Self {
        Self::Driver { operation, source }
    }

    /// Create a statement execution error.
    pub fn statement(source: sqlx::Error) -> Self {
        Self::Statement { source }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The underlying driver error, if this error came from the driver.
    pub fn driver_error(&self) -> Option<&sqlx::Error> {
        match self {
            Self::Pool { source } | Self::Driver { source, .. } | Self::Statement { source } => {
                Some(source)
            }
            Self::Config { .. } => None,
        }
    }

    /// Consume this error and return the underlying driver error.
    pub fn into_driver_error(self) -> Option<sqlx::Error> {
        match self {
            Self::Pool { source } | Self::Driver { source, .. } | Self::Statement { source } => {
                Some(source)
            }
            Self::Config { .. } => None,
        }
    }

    /// SQLSTATE reported by the server, e.g. "42000" for a syntax error.
    pub fn sql_state(&self) -> Option<String> {
        match self.driver_error()? {
            sqlx::Error::Database(db_err) => db_err.code().map(|c| c.to_string()),
            _ => None,
        }
    }

    /// Check if this error came from pool acquisition.
    pub fn is_pool(&self) -> bool {
        matches!(self, Self::Pool { .. })
    }

    /// Check if this error came from statement execution.
    pub fn is_statement(&self) -> bool {
        matches!(self, Self::Statement { .. })
    }
}

/// Result type alias for database operations.
pub type DbResult<T> = Result<T, DbError>;
