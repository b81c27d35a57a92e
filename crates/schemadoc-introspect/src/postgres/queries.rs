use sqlx::PgPool;

use schemadoc_core::{Error, Result};

#[derive(Debug, sqlx::FromRow)]
pub struct RawEnumType {
    pub name: String,
    pub schema: String,
    pub labels: Vec<String>,
}

pub async fn list_enums(pool: &PgPool, schema: &str) -> Result<Vec<RawEnumType>> {
    sqlx::query_as::<_, RawEnumType>(
        r#"
        select
          t.typname as name,
          n.nspname as "schema",
          array_agg(e.enumlabel order by e.enumsortorder) as labels
        from pg_type t
        join pg_enum e on e.enumtypid = t.oid
        join pg_namespace n on n.oid = t.typnamespace
        where n.nspname = $1
        group by t.typname, n.nspname
        order by t.typname
        "#,
    )
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

pub async fn list_tables(pool: &PgPool, schema: &str) -> Result<Vec<String>> {
    sqlx::query_scalar::<_, String>(
        r#"
        select c.relname
        from pg_class c
        join pg_namespace n on n.oid = c.relnamespace
        where n.nspname = $1
          and c.relkind in ('r', 'p')
        order by c.relname
        "#,
    )
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawColumn {
    pub name: String,
    pub data_type: String,
    pub is_nullable: bool,
    pub default: Option<String>,
}

pub async fn list_columns(pool: &PgPool, schema: &str, table: &str) -> Result<Vec<RawColumn>> {
    sqlx::query_as::<_, RawColumn>(
        r#"
        select
          a.attname as name,
          pg_catalog.format_type(a.atttypid, a.atttypmod) as data_type,
          (not a.attnotnull) as is_nullable,
          pg_get_expr(ad.adbin, ad.adrelid) as "default"
        from pg_attribute a
        join pg_class c on c.oid = a.attrelid
        join pg_namespace n on n.oid = c.relnamespace
        left join pg_attrdef ad on ad.adrelid = a.attrelid and ad.adnum = a.attnum
        where n.nspname = $1
          and c.relname = $2
          and a.attnum > 0
          and not a.attisdropped
        order by a.attnum
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawPrimaryKey {
    pub columns: Vec<String>,
}

pub async fn get_primary_key(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> Result<Option<RawPrimaryKey>> {
    sqlx::query_as::<_, RawPrimaryKey>(
        r#"
        select
          array_agg(att.attname order by ord.ordinality) as columns
        from pg_constraint con
        join pg_class rel on rel.oid = con.conrelid
        join pg_namespace nsp on nsp.oid = rel.relnamespace
        join unnest(con.conkey) with ordinality as ord(attnum, ordinality) on true
        join pg_attribute att on att.attrelid = rel.oid and att.attnum = ord.attnum
        where nsp.nspname = $1
          and rel.relname = $2
          and con.contype = 'p'
        group by con.conname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_optional(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawUniqueConstraint {
    pub columns: Vec<String>,
}

pub async fn list_unique_constraints(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> Result<Vec<RawUniqueConstraint>> {
    sqlx::query_as::<_, RawUniqueConstraint>(
        r#"
        select
          array_agg(att.attname order by ord.ordinality) as columns
        from pg_constraint con
        join pg_class rel on rel.oid = con.conrelid
        join pg_namespace nsp on nsp.oid = rel.relnamespace
        join unnest(con.conkey) with ordinality as ord(attnum, ordinality) on true
        join pg_attribute att on att.attrelid = rel.oid and att.attnum = ord.attnum
        where nsp.nspname = $1
          and rel.relname = $2
          and con.contype = 'u'
        group by con.conname
        order by con.conname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawCheckConstraint {
    pub definition: String,
    pub column: String,
}

/// One row per (constraint, associated column) pair.
pub async fn list_check_constraints(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> Result<Vec<RawCheckConstraint>> {
    sqlx::query_as::<_, RawCheckConstraint>(
        r#"
        select
          pg_get_constraintdef(con.oid, true) as definition,
          att.attname as "column"
        from pg_constraint con
        join pg_class rel on rel.oid = con.conrelid
        join pg_namespace nsp on nsp.oid = rel.relnamespace
        join pg_attribute att on att.attrelid = rel.oid and att.attnum = any(con.conkey)
        where nsp.nspname = $1
          and rel.relname = $2
          and con.contype = 'c'
        order by con.conname, att.attnum
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawForeignKey {
    pub constrained_columns: Vec<String>,
    pub referred_table: String,
    pub referred_columns: Vec<String>,
}

pub async fn list_foreign_keys(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> Result<Vec<RawForeignKey>> {
    // The two-array unnest zips conkey and confkey, so the aggregated
    // column lists pair positionally even for multi-column keys.
    sqlx::query_as::<_, RawForeignKey>(
        r#"
        select
          array_agg(src_att.attname order by k.ordinality) as constrained_columns,
          ref_rel.relname as referred_table,
          array_agg(ref_att.attname order by k.ordinality) as referred_columns
        from pg_constraint con
        join pg_class src_rel on src_rel.oid = con.conrelid
        join pg_namespace src_nsp on src_nsp.oid = src_rel.relnamespace
        join pg_class ref_rel on ref_rel.oid = con.confrelid
        join unnest(con.conkey, con.confkey)
          with ordinality as k(src_attnum, ref_attnum, ordinality) on true
        join pg_attribute src_att
          on src_att.attrelid = con.conrelid and src_att.attnum = k.src_attnum
        join pg_attribute ref_att
          on ref_att.attrelid = con.confrelid and ref_att.attnum = k.ref_attnum
        where src_nsp.nspname = $1
          and src_rel.relname = $2
          and con.contype = 'f'
        group by con.conname, ref_rel.relname
        order by con.conname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawIndex {
    pub name: String,
    pub is_unique: bool,
    pub columns: Vec<Option<String>>,
    pub definition: String,
}

/// Indexes other than the primary key. Expression members have no attribute
/// entry, so their positions aggregate as null.
pub async fn list_indexes(pool: &PgPool, schema: &str, table: &str) -> Result<Vec<RawIndex>> {
    sqlx::query_as::<_, RawIndex>(
        r#"
        select
          idx.relname as name,
          i.indisunique as is_unique,
          array_agg(att.attname order by k.ordinality) as columns,
          pg_get_indexdef(i.indexrelid) as definition
        from pg_index i
        join pg_class tbl on tbl.oid = i.indrelid
        join pg_namespace nsp on nsp.oid = tbl.relnamespace
        join pg_class idx on idx.oid = i.indexrelid
        join unnest(i.indkey::int2[]) with ordinality as k(attnum, ordinality) on true
        left join pg_attribute att
          on att.attrelid = i.indrelid and att.attnum = k.attnum
        where nsp.nspname = $1
          and tbl.relname = $2
          and not i.indisprimary
        group by idx.relname, i.indisunique, i.indexrelid
        order by idx.relname
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

pub async fn get_primary_key_index(
    pool: &PgPool,
    schema: &str,
    table: &str,
) -> Result<Option<RawIndex>> {
    sqlx::query_as::<_, RawIndex>(
        r#"
        select
          idx.relname as name,
          i.indisunique as is_unique,
          array_agg(att.attname order by k.ordinality) as columns,
          pg_get_indexdef(i.indexrelid) as definition
        from pg_index i
        join pg_class tbl on tbl.oid = i.indrelid
        join pg_namespace nsp on nsp.oid = tbl.relnamespace
        join pg_class idx on idx.oid = i.indexrelid
        join unnest(i.indkey::int2[]) with ordinality as k(attnum, ordinality) on true
        left join pg_attribute att
          on att.attrelid = i.indrelid and att.attnum = k.attnum
        where nsp.nspname = $1
          and tbl.relname = $2
          and i.indisprimary
        group by idx.relname, i.indisunique, i.indexrelid
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_optional(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawTrigger {
    pub name: String,
    pub table: String,
    pub function: String,
    pub tgtype: i16,
    pub enabled: bool,
}

/// User triggers for the whole schema. Internal triggers and names with
/// reserved system prefixes are excluded.
pub async fn list_triggers(pool: &PgPool, schema: &str) -> Result<Vec<RawTrigger>> {
    sqlx::query_as::<_, RawTrigger>(
        r#"
        select
          t.tgname as name,
          c.relname as "table",
          p.proname as "function",
          t.tgtype as tgtype,
          (t.tgenabled <> 'D') as enabled
        from pg_trigger t
        join pg_class c on c.oid = t.tgrelid
        join pg_namespace n on n.oid = c.relnamespace
        join pg_proc p on p.oid = t.tgfoid
        where not t.tgisinternal
          and n.nspname = $1
          and t.tgname not like 'pg_%'
          and t.tgname not like 'supabase_%'
        order by c.relname, t.tgname
        "#,
    )
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}

#[derive(Debug, sqlx::FromRow)]
pub struct RawFunction {
    pub name: String,
    pub schema: String,
    pub arguments: String,
    pub return_type: String,
    pub definition: String,
}

/// Plain functions only: pg_get_functiondef raises on aggregate and window
/// entries, which would abort the whole batch.
pub async fn list_functions(pool: &PgPool, schema: &str) -> Result<Vec<RawFunction>> {
    sqlx::query_as::<_, RawFunction>(
        r#"
        select
          p.proname as name,
          n.nspname as "schema",
          pg_get_function_arguments(p.oid) as arguments,
          pg_get_function_result(p.oid) as return_type,
          pg_get_functiondef(p.oid) as definition
        from pg_proc p
        join pg_namespace n on n.oid = p.pronamespace
        where n.nspname = $1
          and p.prokind = 'f'
          and p.proname not like 'pg_%'
          and p.proname not like 'supabase_%'
        order by p.proname
        "#,
    )
    .bind(schema)
    .fetch_all(pool)
    .await
    .map_err(|err| Error::Db(err.to_string()))
}
