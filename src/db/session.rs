//! Physical connection and pool seams.
//!
//! [`SqlSession`] is the set of primitives the connection adapter needs from
//! one physical connection; [`SessionSource`] is what the factory needs from
//! the pool. Both are implemented for sqlx's MySQL pool types, and the
//! adapter is written only against the traits.

use crate::db::params::bind_all;
use crate::db::statement::StatementKind;
use crate::db::types::{RowToJson, column_metadata};
use crate::models::{ColumnMetadata, QueryParam, Row};
use futures_util::TryStreamExt;
use sqlx::mysql::{MySqlQueryResult, MySqlRow};
use sqlx::pool::PoolConnection;
use sqlx::{Either, Executor, MySql, MySqlConnection, MySqlPool, Statement as _};
use std::future::Future;
use tracing::debug;

/// Rows and column metadata of a row-returning statement, in driver order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnMetadata>,
}

impl RowSet {
    /// Convert driver rows. Column metadata is taken from the first row; an
    /// empty result has to be described separately.
    pub fn from_mysql_rows(rows: &[MySqlRow]) -> Self {
        Self {
            columns: rows
                .first()
                .map(RowToJson::get_column_metadata)
                .unwrap_or_default(),
            rows: rows.iter().map(RowToJson::to_json_map).collect(),
        }
    }
}

/// Server summary of a mutating statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationSummary {
    pub affected_rows: u64,
    /// 0 when the statement generated no id
    pub last_insert_id: u64,
}

impl MutationSummary {
    /// Fold in one server OK packet. Affected rows add up; the last non-zero
    /// insert id wins.
    pub fn absorb(&mut self, done: &MySqlQueryResult) {
        self.affected_rows += done.rows_affected();
        if done.last_insert_id() != 0 {
            self.last_insert_id = done.last_insert_id();
        }
    }
}

/// What the server sent back for one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum StatementOutput {
    Rows(RowSet),
    Mutation(MutationSummary),
}

/// One exclusively owned physical connection.
pub trait SqlSession: Send {
    fn begin(&mut self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn commit(&mut self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    fn rollback(&mut self) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Run a statement and read everything the server sends back.
    ///
    /// Any rows make the output [`StatementOutput::Rows`]. Without rows the
    /// output is a mutation summary, unless `kind` says the statement always
    /// produces a result set, in which case it is an empty row set carrying
    /// the statement's columns.
    fn run_statement(
        &mut self,
        sql: &str,
        params: &[QueryParam],
        kind: StatementKind,
    ) -> impl Future<Output = Result<StatementOutput, sqlx::Error>> + Send;
}

/// A pool handing out [`SqlSession`]s.
pub trait SessionSource: Send + Sync {
    type Session: SqlSession;

    fn acquire(&self) -> impl Future<Output = Result<Self::Session, sqlx::Error>> + Send;
}

// =============================================================================
// sqlx MySQL implementations
// =============================================================================

/// Transaction control is sent as plain SQL over the text protocol, so the
/// server alone tracks whether a transaction is open.
impl SqlSession for PoolConnection<MySql> {
    async fn begin(&mut self) -> Result<(), sqlx::Error> {
        let conn: &mut MySqlConnection = self;
        conn.execute("START TRANSACTION").await.map(|_| ())
    }

    async fn commit(&mut self) -> Result<(), sqlx::Error> {
        let conn: &mut MySqlConnection = self;
        conn.execute("COMMIT").await.map(|_| ())
    }

    async fn rollback(&mut self) -> Result<(), sqlx::Error> {
        let conn: &mut MySqlConnection = self;
        conn.execute("ROLLBACK").await.map(|_| ())
    }

    async fn run_statement(
        &mut self,
        sql: &str,
        params: &[QueryParam],
        kind: StatementKind,
    ) -> Result<StatementOutput, sqlx::Error> {
        let conn: &mut MySqlConnection = self;
        let mut rows = Vec::new();
        let mut summary = MutationSummary::default();

        {
            // When params is empty, use raw SQL to avoid prepared statement issues
            // (e.g. CREATE PROCEDURE cannot be prepared)
            let mut stream = if params.is_empty() {
                Executor::fetch_many(&mut *conn, sql)
            } else {
                Executor::fetch_many(&mut *conn, bind_all(sql, params))
            };
            while let Some(item) = stream.try_next().await? {
                match item {
                    Either::Left(done) => summary.absorb(&done),
                    Either::Right(row) => rows.push(row),
                }
            }
        }

        if !rows.is_empty() {
            return Ok(StatementOutput::Rows(RowSet::from_mysql_rows(&rows)));
        }
        match kind {
            StatementKind::Rows => Ok(StatementOutput::Rows(RowSet {
                rows: Vec::new(),
                columns: prepared_columns(conn, sql).await,
            })),
            StatementKind::Mutation => Ok(StatementOutput::Mutation(summary)),
        }
    }
}

/// Column metadata of a statement that returned no rows, read from the
/// server's prepare response. Statements the server refuses to prepare
/// report no columns.
async fn prepared_columns(conn: &mut MySqlConnection, sql: &str) -> Vec<ColumnMetadata> {
    match Executor::prepare(conn, sql).await {
        Ok(statement) => column_metadata(statement.columns()),
        Err(e) => {
            debug!(error = %e, "Could not describe empty result");
            Vec::new()
        }
    }
}

impl SessionSource for MySqlPool {
    type Session = PoolConnection<MySql>;

    async fn acquire(&self) -> Result<Self::Session, sqlx::Error> {
        sqlx::Pool::acquire(self).await
    }
}
