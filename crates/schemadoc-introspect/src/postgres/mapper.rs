use schemadoc_core::{Column, EnumType, ForeignKey, Function, Index, Table, Trigger};

use super::queries::{
    RawCheckConstraint, RawColumn, RawEnumType, RawForeignKey, RawFunction, RawIndex,
    RawPrimaryKey, RawTrigger, RawUniqueConstraint,
};
use super::utils::{trigger_events, trigger_orientation};

pub fn map_enums(raw: Vec<RawEnumType>) -> Vec<EnumType> {
    raw.into_iter()
        .map(|en| EnumType {
            name: en.name,
            schema: en.schema,
            labels: en.labels,
        })
        .collect()
}

/// Assemble a table, deriving the per-column constraint flags by
/// set-membership against the table's constraints.
pub fn map_table(
    name: &str,
    columns: Vec<RawColumn>,
    primary_key: Option<&RawPrimaryKey>,
    uniques: &[RawUniqueConstraint],
    checks: &[RawCheckConstraint],
) -> Table {
    let pk_columns = primary_key.map(|pk| pk.columns.as_slice()).unwrap_or(&[]);

    let columns = columns
        .into_iter()
        .map(|col| {
            let is_primary_key = pk_columns.iter().any(|pk_col| pk_col == &col.name);
            let is_unique = uniques
                .iter()
                .any(|uc| uc.columns.iter().any(|uc_col| uc_col == &col.name));
            let check_constraints = checks
                .iter()
                .filter(|check| check.column == col.name)
                .map(|check| check.definition.clone())
                .collect();

            Column {
                name: col.name,
                data_type: col.data_type,
                is_nullable: col.is_nullable,
                default: col.default,
                is_primary_key,
                is_unique,
                check_constraints,
            }
        })
        .collect();

    Table {
        name: name.to_string(),
        columns,
    }
}

pub fn map_foreign_keys(table: &str, raw: Vec<RawForeignKey>) -> Vec<ForeignKey> {
    raw.into_iter()
        .map(|fk| ForeignKey {
            table: table.to_string(),
            constrained_columns: fk.constrained_columns,
            referred_table: fk.referred_table,
            referred_columns: fk.referred_columns,
        })
        .collect()
}

pub fn map_indexes(table: &str, raw: Vec<RawIndex>) -> Vec<Index> {
    raw.into_iter()
        .map(|idx| Index {
            table: table.to_string(),
            name: idx.name,
            columns: idx.columns,
            is_unique: idx.is_unique,
            definition: Some(idx.definition),
        })
        .collect()
}

/// The primary-key index is appended after the table's other indexes, with
/// uniqueness forced regardless of what the catalog row says.
pub fn map_primary_key_index(table: &str, raw: RawIndex) -> Index {
    Index {
        table: table.to_string(),
        name: raw.name,
        columns: raw.columns,
        is_unique: true,
        definition: Some(raw.definition),
    }
}

pub fn map_triggers(raw: Vec<RawTrigger>) -> Vec<Trigger> {
    raw.into_iter()
        .map(|trigger| Trigger {
            name: trigger.name,
            table: trigger.table,
            function: trigger.function,
            events: trigger_events(trigger.tgtype),
            orientation: trigger_orientation(trigger.tgtype),
            enabled: trigger.enabled,
        })
        .collect()
}

pub fn map_functions(raw: Vec<RawFunction>) -> Vec<Function> {
    raw.into_iter()
        .map(|function| Function {
            name: function.name,
            schema: function.schema,
            arguments: function.arguments,
            return_type: function.return_type,
            definition: function.definition,
        })
        .collect()
}
