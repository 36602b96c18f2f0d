//! MySQL driver layer.
//!
//! This module provides:
//! - The connection and factory adapters
//! - Session/pool seams over sqlx
//! - Statement classification
//! - Parameter binding and row decoding

pub mod connection;
pub mod factory;
pub mod params;
pub mod session;
pub mod statement;
pub mod types;

#[cfg(test)]
mod testing;

pub use connection::MySqlConnection;
pub use factory::{MySqlFactory, initialize_mysql, initialize_mysql_with_logger};
pub use session::{MutationSummary, RowSet, SessionSource, SqlSession};
pub use statement::StatementKind;
