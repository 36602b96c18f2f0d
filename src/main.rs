//! mysql-db-adapter - run one statement through the adapter.
//!
//! Acquires a connection from a freshly built pool, executes `--sql` with the
//! given parameters and prints the normalized result as JSON.

use clap::Parser;
use mysql_db_adapter::config::{Config, Mode};
use mysql_db_adapter::models::QueryParam;
use mysql_db_adapter::{DbConnection, DbFactory, initialize_mysql};
use serde_json::{Value, json};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize the tracing subscriber for logging.
fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays valid JSON
    if config.json_logs {
        subscriber
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn parse_params(raw: &[String]) -> Result<Vec<QueryParam>, String> {
    raw.iter()
        .map(|p| {
            serde_json::from_str::<Value>(p)
                .map(QueryParam::from)
                .map_err(|e| format!("Invalid --param {p:?}: {e}"))
        })
        .collect()
}

async fn run<C: DbConnection>(
    conn: &mut C,
    mode: Mode,
    sql: &str,
    params: &[QueryParam],
) -> mysql_db_adapter::DbResult<Value> {
    let output = match mode {
        Mode::Fetch => {
            let result = conn.fetch_data(sql, params).await?;
            json!({
                "rows": conn.get_row_set(&result),
                "fields": conn.get_fields(&result),
            })
        }
        Mode::Update => json!({ "affectedRows": conn.execute_update(sql, params).await? }),
        Mode::FirstRow => {
            let result = conn.execute(sql, params).await?;
            json!(conn.get_first_row(&result))
        }
        Mode::Fields => {
            let result = conn.execute(sql, params).await?;
            json!(conn.get_fields(&result))
        }
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();
    init_tracing(&config);

    let params = parse_params(&config.params)?;
    let factory = initialize_mysql(config.mysql_config()?)?;

    info!(mode = %config.mode, params = params.len(), "Running statement");

    let mut conn = factory.create_db_connection().await?;
    let result = run(&mut conn, config.mode, &config.sql, &params).await;
    conn.close().await;

    match result {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, sql_state = ?e.sql_state(), "Statement failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_params() {
        let params = parse_params(&[
            "1".to_string(),
            "\"abc\"".to_string(),
            "null".to_string(),
            "true".to_string(),
        ])
        .unwrap();
        assert_eq!(
            params,
            vec![
                QueryParam::Int(1),
                QueryParam::String("abc".to_string()),
                QueryParam::Null,
                QueryParam::Bool(true),
            ]
        );
    }

    #[test]
    fn test_parse_params_rejects_bad_json() {
        let err = parse_params(&["abc".to_string()]).unwrap_err();
        assert!(err.contains("--param"));
    }
}
