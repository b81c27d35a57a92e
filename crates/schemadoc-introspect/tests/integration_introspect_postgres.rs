use anyhow::{anyhow, Context, Result};
use schemadoc_core::{validate_document, MetadataDocument, TriggerOrientation};
use schemadoc_introspect::{introspect_postgres_with_options, IntrospectOptions};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::{env, fs};

const FIXTURE_PATH: &str = "fixtures/sql/postgres/001_schema.sql";

fn database_url() -> Result<String> {
    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .context("set TEST_DATABASE_URL or DATABASE_URL for integration tests")
}

async fn reset_fixtures(pool: &PgPool) -> Result<()> {
    let script = fs::read_to_string(FIXTURE_PATH)
        .with_context(|| format!("reading fixture {FIXTURE_PATH}"))?;

    // Function bodies contain semicolons, so the script runs as one
    // multi-statement batch.
    sqlx::raw_sql(&script)
        .execute(pool)
        .await
        .with_context(|| format!("executing fixture {FIXTURE_PATH}"))?;

    Ok(())
}

async fn introspect_fixture(pool: &PgPool) -> Result<MetadataDocument> {
    let options = IntrospectOptions {
        schema: "appdocs".to_string(),
    };
    Ok(introspect_postgres_with_options(pool, options).await?)
}

#[tokio::test]
async fn introspects_fixture_schema() -> Result<()> {
    let db_url = database_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(&db_url)
        .await
        .context("connecting to Postgres")?;

    reset_fixtures(&pool).await?;

    let document = introspect_fixture(&pool).await?;
    validate_document(&document)?;

    let users = document
        .tables
        .iter()
        .find(|table| table.name == "users")
        .ok_or_else(|| anyhow!("expected users table"))?;

    let column_names: Vec<&str> = users.columns.iter().map(|col| col.name.as_str()).collect();
    assert_eq!(column_names, vec!["id", "email", "age", "status"]);

    let id = &users.columns[0];
    assert!(id.is_primary_key);
    assert!(!id.is_unique);
    assert!(!id.is_nullable);
    assert!(id.default.as_deref().is_some_and(|d| d.contains("nextval")));

    let email = &users.columns[1];
    assert!(!email.is_primary_key);
    assert!(email.is_unique);
    assert!(!email.is_nullable);

    let age = &users.columns[2];
    assert!(
        age.check_constraints
            .iter()
            .any(|check| check.contains("age >= 0")),
        "age constraint should be captured"
    );

    let status = &users.columns[3];
    assert_eq!(status.data_type, "appdocs.status");
    assert!(status.default.is_some());

    let fk = document
        .foreign_keys
        .iter()
        .find(|fk| fk.table == "orders")
        .ok_or_else(|| anyhow!("expected orders foreign key"))?;
    assert_eq!(fk.constrained_columns, vec!["user_id"]);
    assert_eq!(fk.referred_table, "users");
    assert_eq!(fk.referred_columns, vec!["id"]);

    let index_names: Vec<&str> = document
        .indexes
        .iter()
        .map(|idx| idx.name.as_str())
        .collect();
    assert!(index_names.contains(&"users_pkey"));
    assert!(index_names.contains(&"orders_pkey"));
    assert!(index_names.contains(&"idx_orders_user"));

    let users_pkey = document
        .indexes
        .iter()
        .find(|idx| idx.name == "users_pkey")
        .ok_or_else(|| anyhow!("users_pkey missing"))?;
    assert!(users_pkey.is_unique);
    assert_eq!(users_pkey.columns, vec![Some("id".to_string())]);
    assert!(
        users_pkey
            .definition
            .as_deref()
            .is_some_and(|def| def.contains("CREATE UNIQUE INDEX"))
    );

    let trigger = document
        .triggers
        .iter()
        .find(|trigger| trigger.name == "users_normalize_email")
        .ok_or_else(|| anyhow!("expected users_normalize_email trigger"))?;
    assert_eq!(trigger.table, "users");
    assert_eq!(trigger.function, "normalize_email");
    assert_eq!(trigger.events, vec!["BEFORE INSERT", "BEFORE UPDATE"]);
    assert_eq!(trigger.orientation, TriggerOrientation::Row);
    assert!(trigger.enabled);

    let function = document
        .functions
        .iter()
        .find(|function| function.name == "normalize_email")
        .ok_or_else(|| anyhow!("expected normalize_email function"))?;
    assert_eq!(function.schema, "appdocs");
    assert_eq!(function.return_type, "trigger");
    assert!(function.definition.contains("lower"));

    assert!(document.enums.iter().any(|en| {
        en.schema == "appdocs"
            && en.name == "status"
            && en.labels == vec!["active", "inactive", "pending"]
    }));

    Ok(())
}

#[tokio::test]
async fn introspection_is_deterministic() -> Result<()> {
    let db_url = database_url()?;
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(std::time::Duration::from_secs(10))
        .connect(&db_url)
        .await
        .context("connecting to Postgres")?;

    reset_fixtures(&pool).await?;

    let first = introspect_fixture(&pool).await?;
    let second = introspect_fixture(&pool).await?;

    let first_json = serde_json::to_string_pretty(&first)?;
    let second_json = serde_json::to_string_pretty(&second)?;
    assert_eq!(first_json, second_json);

    let parsed: MetadataDocument = serde_json::from_str(&first_json)?;
    assert_eq!(parsed, first);

    Ok(())
}
