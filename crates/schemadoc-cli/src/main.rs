mod config;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use schemadoc_core::{validate_document, Error as CoreError};
use schemadoc_introspect::{introspect_postgres_with_options, IntrospectOptions};
use schemadoc_render::{render_markdown, to_json};
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use config::DbConfig;
use output::write_bytes_atomic;

#[derive(Debug, Error)]
enum CliError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "schemadoc",
    version,
    about = "Generate schema documentation from a Postgres database"
)]
struct Cli {
    /// Schema whose objects are documented.
    #[arg(long, default_value = "public")]
    schema: String,
    /// Output path for the structured metadata document.
    #[arg(long, default_value = "database_metadata.json")]
    json_out: PathBuf,
    /// Output path for the Markdown rendering.
    #[arg(long, default_value = "database_metadata.md")]
    markdown_out: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging();
    run(cli).await
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = DbConfig::from_env()?;
    tracing::info!(
        event = "run_started",
        schema = %cli.schema,
        connection = %config.redacted_url()
    );

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&config.connection_url())
        .await?;

    let options = IntrospectOptions {
        schema: cli.schema.clone(),
    };
    let document = introspect_postgres_with_options(&pool, options).await?;
    validate_document(&document)?;
    pool.close().await;

    tracing::info!(
        event = "introspection_finished",
        tables = document.tables.len(),
        foreign_keys = document.foreign_keys.len(),
        functions = document.functions.len(),
        triggers = document.triggers.len(),
        enums = document.enums.len(),
        indexes = document.indexes.len(),
    );

    let json = to_json(&document)?;
    let markdown = render_markdown(&document);

    write_bytes_atomic(&cli.json_out, json.as_bytes())?;
    write_bytes_atomic(&cli.markdown_out, markdown.as_bytes())?;
    tracing::info!(event = "artifacts_written");

    println!(
        "Database metadata exported to '{}' and '{}'",
        cli.json_out.display(),
        cli.markdown_out.display()
    );

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
