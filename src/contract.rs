//! Generic database connection contract.
//!
//! Application code is written against [`DbConnection`] and [`DbFactory`];
//! [`MySqlConnection`](crate::db::MySqlConnection) and
//! [`MySqlFactory`](crate::db::MySqlFactory) implement them.
//!
//! A connection is used by one caller at a time (every operation takes
//! `&mut self`). Transactional sequences should end in `rollback()` or
//! `commit()` followed by `close()` on every exit path; nothing is cleaned up
//! automatically except returning the connection to the pool when it is
//! dropped.

use crate::error::DbResult;
use crate::models::{ExecResult, Field, NestedRow, QueryParam, QueryResult, RawResult, Row};
use crate::result;
use std::future::Future;

/// Transaction control and statement execution over one connection.
pub trait DbConnection: Send {
    /// Start a transaction. The server decides what happens if one is
    /// already open.
    fn begin_transaction(&mut self) -> impl Future<Output = DbResult<()>> + Send;

    fn commit(&mut self) -> impl Future<Output = DbResult<()>> + Send;

    /// Roll back the current transaction.
    ///
    /// Never fails: a rollback error is logged and dropped, so that calling
    /// this from an error path cannot hide the original error.
    fn rollback(&mut self) -> impl Future<Output = ()> + Send;

    /// Release the connection back to the pool.
    fn close(self) -> impl Future<Output = ()> + Send
    where
        Self: Sized;

    /// Execute one statement and return its raw result.
    fn execute(
        &mut self,
        sql: &str,
        params: &[QueryParam],
    ) -> impl Future<Output = DbResult<ExecResult>> + Send;

    /// Execute a mutating statement and return the affected-row count.
    fn execute_update(
        &mut self,
        sql: &str,
        params: &[QueryParam],
    ) -> impl Future<Output = DbResult<u64>> + Send;

    /// Execute a read statement and return rows and fields in raw form.
    fn fetch_data(
        &mut self,
        sql: &str,
        params: &[QueryParam],
    ) -> impl Future<Output = DbResult<QueryResult>> + Send;

    /// Execute an INSERT and project the first returned row.
    ///
    /// MySQL INSERT statements return no rows, so this is normally `None`;
    /// use [`execute`](Self::execute) to get the affected rows and insert id.
    fn insert_record(
        &mut self,
        sql: &str,
        params: &[QueryParam],
    ) -> impl Future<Output = DbResult<Option<NestedRow>>> + Send;

    /// Execute an UPDATE and project the first returned row (normally `None`).
    fn update_record(
        &mut self,
        sql: &str,
        params: &[QueryParam],
    ) -> impl Future<Output = DbResult<Option<NestedRow>>> + Send;

    /// Execute a DELETE and return the affected-row count. Same path as
    /// [`execute_update`](Self::execute_update).
    fn delete_record(
        &mut self,
        sql: &str,
        params: &[QueryParam],
    ) -> impl Future<Output = DbResult<u64>> + Send;

    fn get_affect_rows<R: RawResult + ?Sized>(&self, result: &R) -> u64 {
        result::get_affect_rows(result)
    }

    fn get_row_set<'r, R: RawResult + ?Sized>(&self, result: &'r R) -> &'r [Row] {
        result::get_row_set(result)
    }

    fn get_fields<R: RawResult + ?Sized>(&self, result: &R) -> Vec<Field> {
        result::get_fields(result)
    }

    fn get_first_row<R: RawResult + ?Sized>(&self, result: &R) -> Option<NestedRow> {
        result::get_first_row(result)
    }
}

/// Hands out connections bound to freshly acquired physical connections.
pub trait DbFactory: Send + Sync {
    type Connection: DbConnection;

    fn create_db_connection(&self) -> impl Future<Output = DbResult<Self::Connection>> + Send;
}
