use sqlx::PgPool;

use schemadoc_core::{MetadataDocument, Result};

use crate::adapter::Adapter;
use crate::options::IntrospectOptions;

mod mapper;
mod queries;
mod utils;

/// Adapter for PostgreSQL databases.
#[derive(Debug, Clone)]
pub struct PostgresAdapter {
    pool: PgPool,
}

impl PostgresAdapter {
    /// Create a new adapter using a pre-configured pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Adapter for PostgresAdapter {
    fn engine(&self) -> &'static str {
        "postgres"
    }

    async fn introspect(&self, opts: &IntrospectOptions) -> Result<MetadataDocument> {
        introspect(&self.pool, opts).await
    }
}

/// Introspect Postgres with default options.
pub async fn introspect_postgres(pool: &PgPool) -> Result<MetadataDocument> {
    introspect_postgres_with_options(pool, IntrospectOptions::default()).await
}

/// Introspect Postgres with caller-provided options.
pub async fn introspect_postgres_with_options(
    pool: &PgPool,
    opts: IntrospectOptions,
) -> Result<MetadataDocument> {
    introspect(pool, &opts).await
}

/// Run the fixed query sequence against one schema and assemble the
/// metadata document.
pub async fn introspect(pool: &PgPool, opts: &IntrospectOptions) -> Result<MetadataDocument> {
    let schema = opts.schema.as_str();

    let enums = mapper::map_enums(queries::list_enums(pool, schema).await?);

    let table_names = queries::list_tables(pool, schema).await?;

    let mut tables = Vec::with_capacity(table_names.len());
    for table_name in &table_names {
        let raw_columns = queries::list_columns(pool, schema, table_name).await?;
        let raw_pk = queries::get_primary_key(pool, schema, table_name).await?;
        let raw_uniques = queries::list_unique_constraints(pool, schema, table_name).await?;
        let raw_checks = queries::list_check_constraints(pool, schema, table_name).await?;

        tables.push(mapper::map_table(
            table_name,
            raw_columns,
            raw_pk.as_ref(),
            &raw_uniques,
            &raw_checks,
        ));
    }

    let mut foreign_keys = Vec::new();
    for table_name in &table_names {
        let raw_fks = queries::list_foreign_keys(pool, schema, table_name).await?;
        foreign_keys.extend(mapper::map_foreign_keys(table_name, raw_fks));
    }

    let mut indexes = Vec::new();
    for table_name in &table_names {
        let raw_indexes = queries::list_indexes(pool, schema, table_name).await?;
        indexes.extend(mapper::map_indexes(table_name, raw_indexes));

        if let Some(raw_pk_index) = queries::get_primary_key_index(pool, schema, table_name).await?
        {
            indexes.push(mapper::map_primary_key_index(table_name, raw_pk_index));
        }
    }

    let triggers = mapper::map_triggers(queries::list_triggers(pool, schema).await?);
    let functions = mapper::map_functions(queries::list_functions(pool, schema).await?);

    Ok(MetadataDocument {
        tables,
        foreign_keys,
        functions,
        triggers,
        enums,
        indexes,
    })
}
