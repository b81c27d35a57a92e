use schemadoc_core::{MetadataDocument, Table};

/// Render a deterministic Markdown document from the metadata.
///
/// Section order is fixed: Tables, Foreign Keys, Functions, Triggers,
/// Enumerated Types, Indexes.
pub fn render_markdown(document: &MetadataDocument) -> String {
    let mut lines = Vec::new();

    lines.push("# Database Schema".to_string());
    lines.push(String::new());

    push_tables(&mut lines, &document.tables);
    push_foreign_keys(&mut lines, document);
    push_functions(&mut lines, document);
    push_triggers(&mut lines, document);
    push_enums(&mut lines, document);
    push_indexes(&mut lines, document);

    lines.join("\n")
}

fn push_tables(lines: &mut Vec<String>, tables: &[Table]) {
    lines.push("## Tables".to_string());
    lines.push(String::new());

    for table in tables {
        lines.push(format!("### {}", table.name));
        lines.push(String::new());
        lines.push(
            "| column | type | nullable | default | primary key | unique | checks |".to_string(),
        );
        lines.push("| --- | --- | --- | --- | --- | --- | --- |".to_string());
        for column in &table.columns {
            lines.push(format!(
                "| {} | {} | {} | {} | {} | {} | {} |",
                column.name,
                column.data_type,
                column.is_nullable,
                column.default.as_deref().unwrap_or("-"),
                column.is_primary_key,
                column.is_unique,
                join_or_dash(&column.check_constraints),
            ));
        }
        lines.push(String::new());
    }
}

fn push_foreign_keys(lines: &mut Vec<String>, document: &MetadataDocument) {
    lines.push("## Foreign Keys".to_string());
    lines.push(String::new());

    for fk in &document.foreign_keys {
        lines.push(format!(
            "- {}.{} → {}.{}",
            fk.table,
            fk.constrained_columns.join(", "),
            fk.referred_table,
            fk.referred_columns.join(", "),
        ));
    }
    lines.push(String::new());
}

fn push_functions(lines: &mut Vec<String>, document: &MetadataDocument) {
    lines.push("## Functions".to_string());
    lines.push(String::new());

    for function in &document.functions {
        lines.push(format!("### {}", function.name));
        lines.push(String::new());
        lines.push(format!("- schema: {}", function.schema));
        lines.push(format!("- arguments: {}", dash_if_empty(&function.arguments)));
        lines.push(format!("- returns: {}", function.return_type));
        lines.push(String::new());
        lines.push("```sql".to_string());
        lines.push(function.definition.clone());
        lines.push("```".to_string());
        lines.push(String::new());
    }
}

fn push_triggers(lines: &mut Vec<String>, document: &MetadataDocument) {
    lines.push("## Triggers".to_string());
    lines.push(String::new());

    for trigger in &document.triggers {
        lines.push(format!("### {}", trigger.name));
        lines.push(String::new());
        lines.push(format!("- table: {}", trigger.table));
        lines.push(format!("- function: {}", trigger.function));
        lines.push(format!("- events: {}", join_or_dash(&trigger.events)));
        lines.push(format!("- orientation: {}", trigger.orientation));
        lines.push(format!("- enabled: {}", trigger.enabled));
        lines.push(String::new());
    }
}

fn push_enums(lines: &mut Vec<String>, document: &MetadataDocument) {
    lines.push("## Enumerated Types".to_string());
    lines.push(String::new());

    for en in &document.enums {
        lines.push(format!("### {}", en.name));
        lines.push(String::new());
        lines.push(format!("- schema: {}", en.schema));
        lines.push(format!("- values: {}", join_or_dash(&en.labels)));
        lines.push(String::new());
    }
}

fn push_indexes(lines: &mut Vec<String>, document: &MetadataDocument) {
    lines.push("## Indexes".to_string());
    lines.push(String::new());

    for index in &document.indexes {
        let columns: Vec<&str> = index
            .columns
            .iter()
            .flatten()
            .map(|column| column.as_str())
            .collect();

        lines.push(format!("### {}", index.name));
        lines.push(String::new());
        lines.push(format!("- table: {}", index.table));
        if columns.is_empty() {
            lines.push("- columns: (expression)".to_string());
        } else {
            lines.push(format!("- columns: {}", columns.join(", ")));
        }
        lines.push(format!("- unique: {}", index.is_unique));
        if let Some(definition) = &index.definition {
            lines.push(String::new());
            lines.push("```sql".to_string());
            lines.push(definition.clone());
            lines.push("```".to_string());
        }
        lines.push(String::new());
    }
}

fn join_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

fn dash_if_empty(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}
