//! Statement logging hook.
//!
//! The connection adapter reports every statement it dispatches, and every
//! rollback failure it swallows, through a [`StatementLogger`] handed to it at
//! construction. [`TracingLogger`] forwards both to `tracing`.

use crate::error::DbError;
use crate::models::QueryParam;
use std::sync::Arc;
use tracing::{debug, warn};

/// Observability hook injected into connections.
pub trait StatementLogger: Send + Sync {
    /// Called immediately before a statement is sent to the driver.
    fn statement(&self, sql: &str, params: &[QueryParam]);

    /// Called when a rollback failed and the error was suppressed.
    fn rollback_failed(&self, error: &DbError);
}

/// Default logger: debug record per statement, warning per failed rollback.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl StatementLogger for TracingLogger {
    fn statement(&self, sql: &str, params: &[QueryParam]) {
        debug!(sql = %sql, params = ?params, "Executing statement");
    }

    fn rollback_failed(&self, error: &DbError) {
        warn!(error = %error, "Rollback failed; error suppressed");
    }
}

/// Shared logger handle.
pub type SharedLogger = Arc<dyn StatementLogger>;

/// The logger used when none is supplied.
pub fn default_logger() -> SharedLogger {
    Arc::new(TracingLogger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracing_logger_without_subscriber() {
        let logger = default_logger();
        logger.statement("SELECT ?", &[QueryParam::Int(1)]);
        logger.rollback_failed(&DbError::driver("rollback", sqlx::Error::PoolClosed));
    }
}
