use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Complete metadata snapshot for one database schema.
///
/// Collections hold their entries in catalog query order; enum labels keep
/// the database's declared sort order. The document is assembled once per
/// run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetadataDocument {
    pub tables: Vec<Table>,
    pub foreign_keys: Vec<ForeignKey>,
    pub functions: Vec<Function>,
    pub triggers: Vec<Trigger>,
    pub enums: Vec<EnumType>,
    pub indexes: Vec<Index>,
}

/// A table and its columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

/// Column metadata, including constraint-derived flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Column {
    pub name: String,
    /// Formatted type text (e.g. `character varying(255)`).
    pub data_type: String,
    pub is_nullable: bool,
    /// Default expression, when one is declared.
    pub default: Option<String>,
    /// True iff the column appears in the table's primary-key constraint.
    pub is_primary_key: bool,
    /// True iff the column appears in any unique constraint on the table.
    pub is_unique: bool,
    /// Definitions of check constraints associated with this column.
    pub check_constraints: Vec<String>,
}

/// Foreign key definition.
///
/// `constrained_columns` and `referred_columns` pair positionally: index `i`
/// of one refers to index `i` of the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ForeignKey {
    pub table: String,
    pub constrained_columns: Vec<String>,
    pub referred_table: String,
    pub referred_columns: Vec<String>,
}

/// Index definition.
///
/// `columns` entries are `None` for expression members. The table's
/// primary-key index is included as a synthesized entry with `is_unique`
/// forced true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Index {
    pub table: String,
    pub name: String,
    pub columns: Vec<Option<String>>,
    pub is_unique: bool,
    pub definition: Option<String>,
}

/// Trigger metadata decoded from the catalog's packed type flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Trigger {
    pub name: String,
    pub table: String,
    /// Name of the function the trigger invokes.
    pub function: String,
    /// Event strings such as `BEFORE INSERT`, in INSERT/DELETE/UPDATE order.
    pub events: Vec<String>,
    pub orientation: TriggerOrientation,
    pub enabled: bool,
}

/// Whether a trigger fires once per affected row or once per statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerOrientation {
    Row,
    Statement,
}

impl std::fmt::Display for TriggerOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerOrientation::Row => f.write_str("ROW"),
            TriggerOrientation::Statement => f.write_str("STATEMENT"),
        }
    }
}

/// Function metadata with its full definition text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Function {
    pub name: String,
    pub schema: String,
    /// Formatted argument list, as rendered by the catalog.
    pub arguments: String,
    pub return_type: String,
    pub definition: String,
}

/// Representation of a database enum type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnumType {
    pub name: String,
    pub schema: String,
    /// Labels in declared sort order, not alphabetical.
    pub labels: Vec<String>,
}
