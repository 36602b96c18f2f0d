//! Connection adapter.
//!
//! [`MySqlConnection`] implements [`DbConnection`] over one exclusively owned
//! physical connection. Transaction control is passed straight through;
//! statements are classified, logged, dispatched and returned as
//! [`ExecResult`]s that the normalization functions understand.

use crate::contract::DbConnection;
use crate::db::session::{SqlSession, StatementOutput};
use crate::db::statement::StatementKind;
use crate::error::{DbError, DbResult};
use crate::logging::SharedLogger;
use crate::models::{ExecResult, NestedRow, QueryParam, QueryResult, RawResult};
use crate::result::{self, DEFAULT_PATH_DELIMITER};
use sqlx::MySql;
use sqlx::pool::PoolConnection;
use tracing::{debug, trace};

/// A framework connection bound to one physical MySQL connection.
///
/// Dropping the adapter (or calling [`close`](DbConnection::close)) returns
/// the physical connection to its pool.
pub struct MySqlConnection<S: SqlSession = PoolConnection<MySql>> {
    session: S,
    logger: SharedLogger,
    path_delimiter: char,
}

impl<S: SqlSession> MySqlConnection<S> {
    /// Wrap an acquired session.
    pub fn new(session: S, logger: SharedLogger) -> Self {
        Self {
            session,
            logger,
            path_delimiter: DEFAULT_PATH_DELIMITER,
        }
    }

    /// Set the delimiter used by first-row projections.
    pub fn with_path_delimiter(mut self, delimiter: char) -> Self {
        self.path_delimiter = delimiter;
        self
    }

    pub fn path_delimiter(&self) -> char {
        self.path_delimiter
    }

    async fn execute_projecting_first_row(
        &mut self,
        sql: &str,
        params: &[QueryParam],
    ) -> DbResult<Option<NestedRow>> {
        let result = self.execute(sql, params).await?;
        Ok(self.get_first_row(&result))
    }
}

impl<S: SqlSession> std::fmt::Debug for MySqlConnection<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlConnection")
            .field("path_delimiter", &self.path_delimiter)
            .finish_non_exhaustive()
    }
}

impl<S: SqlSession> DbConnection for MySqlConnection<S> {
    async fn begin_transaction(&mut self) -> DbResult<()> {
        trace!("Beginning transaction");
        self.session
            .begin()
            .await
            .map_err(|e| DbError::driver("begin", e))
    }

    async fn commit(&mut self) -> DbResult<()> {
        trace!("Committing transaction");
        self.session
            .commit()
            .await
            .map_err(|e| DbError::driver("commit", e))
    }

    async fn rollback(&mut self) {
        trace!("Rolling back transaction");
        if let Err(e) = self.session.rollback().await {
            self.logger
                .rollback_failed(&DbError::driver("rollback", e));
        }
    }

    async fn close(self) {
        debug!("Releasing connection to pool");
        drop(self.session);
    }

    async fn execute(&mut self, sql: &str, params: &[QueryParam]) -> DbResult<ExecResult> {
        let kind = StatementKind::classify(sql);
        self.logger.statement(sql, params);

        let output = self
            .session
            .run_statement(sql, params, kind)
            .await
            .map_err(DbError::statement)?;

        Ok(match output {
            StatementOutput::Rows(set) => ExecResult::Rows {
                rows: set.rows,
                fields: set.columns,
            },
            StatementOutput::Mutation(summary) => {
                ExecResult::mutation(summary.affected_rows, summary.last_insert_id)
            }
        })
    }

    async fn execute_update(&mut self, sql: &str, params: &[QueryParam]) -> DbResult<u64> {
        let result = self.execute(sql, params).await?;
        Ok(result::get_affect_rows(&result))
    }

    async fn fetch_data(&mut self, sql: &str, params: &[QueryParam]) -> DbResult<QueryResult> {
        let result = self.execute(sql, params).await?;
        Ok(result.into())
    }

    async fn insert_record(
        &mut self,
        sql: &str,
        params: &[QueryParam],
    ) -> DbResult<Option<NestedRow>> {
        self.execute_projecting_first_row(sql, params).await
    }

    async fn update_record(
        &mut self,
        sql: &str,
        params: &[QueryParam],
    ) -> DbResult<Option<NestedRow>> {
        self.execute_projecting_first_row(sql, params).await
    }

    async fn delete_record(&mut self, sql: &str, params: &[QueryParam]) -> DbResult<u64> {
        self.execute_update(sql, params).await
    }

    fn get_first_row<R: RawResult + ?Sized>(&self, result: &R) -> Option<NestedRow> {
        result::get_first_row_with(result, self.path_delimiter)
    }
}
