//! In-memory sessions and pools for unit tests.

use crate::db::session::{MutationSummary, RowSet, SessionSource, SqlSession, StatementOutput};
use crate::db::statement::StatementKind;
use crate::error::DbError;
use crate::logging::StatementLogger;
use crate::models::{ColumnMetadata, QueryParam, Row};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Ordered record of everything sessions and loggers did.
#[derive(Debug, Clone, Default)]
pub(crate) struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, entry: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == entry).count()
    }
}

fn refused(what: &str) -> sqlx::Error {
    sqlx::Error::Protocol(format!("{what} refused"))
}

pub(crate) struct FakeSession {
    pub journal: Journal,
    pub rows: Vec<Row>,
    pub columns: Vec<ColumnMetadata>,
    pub affected_rows: u64,
    pub last_insert_id: u64,
    pub fail_begin: bool,
    pub fail_commit: bool,
    pub fail_rollback: bool,
    pub fail_statements: bool,
}

impl FakeSession {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            rows: Vec::new(),
            columns: Vec::new(),
            affected_rows: 0,
            last_insert_id: 0,
            fail_begin: false,
            fail_commit: false,
            fail_rollback: false,
            fail_statements: false,
        }
    }

    fn control(&self, action: &str, fail: bool) -> Result<(), sqlx::Error> {
        self.journal.push(action);
        if fail { Err(refused(action)) } else { Ok(()) }
    }
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.journal.push("release");
    }
}

impl SqlSession for FakeSession {
    async fn begin(&mut self) -> Result<(), sqlx::Error> {
        self.control("begin", self.fail_begin)
    }

    async fn commit(&mut self) -> Result<(), sqlx::Error> {
        self.control("commit", self.fail_commit)
    }

    async fn rollback(&mut self) -> Result<(), sqlx::Error> {
        self.control("rollback", self.fail_rollback)
    }

    /// Rows loaded into the fake are what the server "sends"; without rows a
    /// result-set statement gets the loaded columns, anything else a summary.
    async fn run_statement(
        &mut self,
        sql: &str,
        _params: &[QueryParam],
        kind: StatementKind,
    ) -> Result<StatementOutput, sqlx::Error> {
        self.journal.push(format!("run:{sql}"));
        if self.fail_statements {
            return Err(refused("statement"));
        }
        if !self.rows.is_empty() || kind == StatementKind::Rows {
            return Ok(StatementOutput::Rows(RowSet {
                rows: self.rows.clone(),
                columns: self.columns.clone(),
            }));
        }
        Ok(StatementOutput::Mutation(MutationSummary {
            affected_rows: self.affected_rows,
            last_insert_id: self.last_insert_id,
        }))
    }
}

/// Pool that creates a fresh [`FakeSession`] per acquire.
#[derive(Debug, Default)]
pub(crate) struct FakeSource {
    pub journal: Journal,
    pub exhausted: bool,
    pub acquired: AtomicUsize,
}

impl SessionSource for FakeSource {
    type Session = FakeSession;

    async fn acquire(&self) -> Result<FakeSession, sqlx::Error> {
        if self.exhausted {
            return Err(sqlx::Error::PoolTimedOut);
        }
        self.acquired.fetch_add(1, Ordering::SeqCst);
        self.journal.push("acquire");
        Ok(FakeSession::new(self.journal.clone()))
    }
}

/// Logger writing into a [`Journal`].
pub(crate) struct RecordingLogger {
    journal: Journal,
}

impl RecordingLogger {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl StatementLogger for RecordingLogger {
    fn statement(&self, sql: &str, params: &[QueryParam]) {
        self.journal.push(format!("log:{sql} {params:?}"));
    }

    fn rollback_failed(&self, _error: &DbError) {
        self.journal.push("log:rollback_failed");
    }
}
