//! Statement classification.
//!
//! Decides, before dispatch, whether a statement always produces a result
//! set. The session reads whatever the server sends either way; the kind only
//! matters when no rows come back, to tell an empty result set (which still
//! has columns) from a mutation summary. `CALL` and `HANDLER` are left as
//! mutations because whether they return rows depends on the call.
//!
//! Classification never rejects SQL. A statement that sqlparser cannot parse
//! is classified by its leading keyword and still goes to the server, which
//! reports any real error.

use sqlparser::ast::Statement;
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::Parser;

/// Shape of the result a statement produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// SELECT, SHOW, DESCRIBE, EXPLAIN, CHECK TABLE and other statements
    /// that always produce a result set
    Rows,
    /// INSERT, UPDATE, DELETE, DDL and everything else
    Mutation,
}

/// Leading keywords of statements that always produce a result set.
const READ_KEYWORDS: &[&str] = &[
    "SELECT", "SHOW", "DESC", "DESCRIBE", "EXPLAIN", "WITH", "VALUES", "TABLE", "ANALYZE",
    "CHECK", "CHECKSUM", "OPTIMIZE", "REPAIR",
];

impl StatementKind {
    /// Classify a SQL string.
    ///
    /// A multi-statement string is classified by its last statement, the one
    /// whose result the driver reports.
    pub fn classify(sql: &str) -> Self {
        match Parser::parse_sql(&MySqlDialect {}, sql) {
            Ok(statements) => match statements.last() {
                Some(stmt) => Self::of_statement(stmt),
                None => Self::Mutation,
            },
            Err(e) => {
                tracing::trace!(error = %e, "Falling back to keyword classification");
                Self::from_leading_keyword(sql)
            }
        }
    }

    fn of_statement(stmt: &Statement) -> Self {
        match stmt {
            Statement::Query(_)
            | Statement::ShowTables { .. }
            | Statement::ShowColumns { .. }
            | Statement::ShowDatabases { .. }
            | Statement::ShowSchemas { .. }
            | Statement::ShowCreate { .. }
            | Statement::ShowFunctions { .. }
            | Statement::ShowVariable { .. }
            | Statement::ShowVariables { .. }
            | Statement::ShowStatus { .. }
            | Statement::ShowCollation { .. }
            | Statement::ExplainTable { .. } => Self::Rows,

            // EXPLAIN returns a plan regardless of the statement it describes
            Statement::Explain { .. } => Self::Rows,

            // Anything else by the keyword it renders with (SHOW CHARACTER SET,
            // ANALYZE TABLE, ...)
            other => Self::from_leading_keyword(&other.to_string()),
        }
    }

    fn from_leading_keyword(sql: &str) -> Self {
        let trimmed = sql.trim_start();
        // (SELECT ...) UNION (SELECT ...)
        if trimmed.starts_with('(') {
            return Self::Rows;
        }

        let first = trimmed
            .split(|c: char| c.is_whitespace() || c == '(')
            .next()
            .unwrap_or_default();

        if READ_KEYWORDS
            .iter()
            .any(|kw| first.eq_ignore_ascii_case(kw))
        {
            Self::Rows
        } else {
            Self::Mutation
        }
    }
}
