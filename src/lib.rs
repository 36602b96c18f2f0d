//! MySQL adapter for a generic database connection contract.
//!
//! Application code talks to [`DbConnection`] and [`DbFactory`]; this crate
//! implements them over a pooled sqlx MySQL connection and normalizes raw
//! results (affected rows, row sets, camelCase fields, nested first rows).

pub mod config;
pub mod contract;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod result;

pub use config::{MySqlConfig, PoolOptions};
pub use contract::{DbConnection, DbFactory};
pub use db::{MySqlConnection, MySqlFactory, initialize_mysql};
pub use error::{DbError, DbResult};
pub use logging::{StatementLogger, TracingLogger};
