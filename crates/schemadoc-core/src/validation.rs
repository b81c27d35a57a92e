use std::collections::BTreeSet;

use crate::document::MetadataDocument;
use crate::error::{Error, Result};

/// Validate internal consistency of an assembled document.
///
/// This checks:
/// - duplicate table/column names
/// - foreign keys pair constrained and referred columns one-to-one
/// - triggers carry no duplicate event
pub fn validate_document(document: &MetadataDocument) -> Result<()> {
    let mut tables = BTreeSet::new();
    for table in &document.tables {
        if !tables.insert(table.name.as_str()) {
            return Err(Error::InvalidDocument(format!(
                "duplicate table name: {}",
                table.name
            )));
        }

        let mut columns = BTreeSet::new();
        for column in &table.columns {
            if !columns.insert(column.name.as_str()) {
                return Err(Error::InvalidDocument(format!(
                    "duplicate column name: {}.{}",
                    table.name, column.name
                )));
            }
        }
    }

    for fk in &document.foreign_keys {
        if fk.constrained_columns.len() != fk.referred_columns.len() {
            return Err(Error::InvalidDocument(format!(
                "foreign key on {} pairs {} constrained columns with {} referred columns",
                fk.table,
                fk.constrained_columns.len(),
                fk.referred_columns.len()
            )));
        }
        if fk.constrained_columns.is_empty() {
            return Err(Error::InvalidDocument(format!(
                "foreign key on {} has no columns",
                fk.table
            )));
        }
    }

    for trigger in &document.triggers {
        let mut events = BTreeSet::new();
        for event in &trigger.events {
            if !events.insert(event.as_str()) {
                return Err(Error::InvalidDocument(format!(
                    "trigger {} repeats event {event}",
                    trigger.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Column, ForeignKey, Table, Trigger, TriggerOrientation};

    fn empty_document() -> MetadataDocument {
        MetadataDocument {
            tables: Vec::new(),
            foreign_keys: Vec::new(),
            functions: Vec::new(),
            triggers: Vec::new(),
            enums: Vec::new(),
            indexes: Vec::new(),
        }
    }

    fn column(name: &str) -> Column {
        Column {
            name: name.to_string(),
            data_type: "integer".to_string(),
            is_nullable: true,
            default: None,
            is_primary_key: false,
            is_unique: false,
            check_constraints: Vec::new(),
        }
    }

    #[test]
    fn accepts_empty_document() {
        assert!(validate_document(&empty_document()).is_ok());
    }

    #[test]
    fn rejects_duplicate_tables() {
        let mut document = empty_document();
        for _ in 0..2 {
            document.tables.push(Table {
                name: "users".to_string(),
                columns: Vec::new(),
            });
        }

        let err = validate_document(&document).unwrap_err();
        assert!(err.to_string().contains("duplicate table name: users"));
    }

    #[test]
    fn rejects_duplicate_columns() {
        let mut document = empty_document();
        document.tables.push(Table {
            name: "users".to_string(),
            columns: vec![column("id"), column("id")],
        });

        let err = validate_document(&document).unwrap_err();
        assert!(err.to_string().contains("users.id"));
    }

    #[test]
    fn rejects_mismatched_foreign_key_columns() {
        let mut document = empty_document();
        document.foreign_keys.push(ForeignKey {
            table: "orders".to_string(),
            constrained_columns: vec!["user_id".to_string(), "org_id".to_string()],
            referred_table: "users".to_string(),
            referred_columns: vec!["id".to_string()],
        });

        assert!(validate_document(&document).is_err());
    }

    #[test]
    fn rejects_duplicate_trigger_events() {
        let mut document = empty_document();
        document.triggers.push(Trigger {
            name: "users_audit".to_string(),
            table: "users".to_string(),
            function: "audit".to_string(),
            events: vec!["BEFORE INSERT".to_string(), "BEFORE INSERT".to_string()],
            orientation: TriggerOrientation::Row,
            enabled: true,
        });

        assert!(validate_document(&document).is_err());
    }
}
