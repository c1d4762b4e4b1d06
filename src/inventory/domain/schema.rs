//! Schema → table → column sync visibility for a connector.

use serde::Serialize;
use serde_json::{Map, Value};

/// A column inside a synced table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnStatus {
    /// Column name.
    pub name: String,
    /// Whether the column is synced.
    pub enabled: bool,
}

/// A table inside a source schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableStatus {
    /// Table name.
    pub name: String,
    /// Whether the table is synced.
    pub enabled: bool,
    /// Sync mode (`SOFT_DELETE`, `HISTORY`, `LIVE`), when reported.
    pub sync_mode: Option<String>,
    /// Columns with explicit sync configuration.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnStatus>,
}

/// A source schema with its tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaEntry {
    /// Schema name.
    pub name: String,
    /// Whether the schema is synced.
    pub enabled: bool,
    /// Tables of the schema, ordered by name.
    pub tables: Vec<TableStatus>,
}

impl SchemaEntry {
    /// Number of enabled tables in this schema.
    #[must_use]
    pub fn enabled_table_count(&self) -> usize {
        self.tables.iter().filter(|table| table.enabled).count()
    }
}

/// Table counts across every schema of a connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    /// Number of tables known to the connector.
    pub total_tables: usize,
    /// Number of synced tables.
    pub enabled_tables: usize,
    /// Number of tables excluded from sync.
    pub disabled_tables: usize,
}

/// Schema tree of a connector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SchemaStatus {
    schemas: Vec<SchemaEntry>,
}

impl SchemaStatus {
    /// Creates a schema tree from already extracted entries.
    #[must_use]
    pub const fn new(schemas: Vec<SchemaEntry>) -> Self {
        Self { schemas }
    }

    /// Extracts the schema tree from the `data` object of a schema response.
    ///
    /// Entries with an unexpected shape are skipped; missing `enabled` flags
    /// read as disabled.
    #[must_use]
    pub fn from_json(data: &Value) -> Self {
        let schemas = object_entries(data.get("schemas"))
            .map(|(name, schema)| SchemaEntry {
                name: name.clone(),
                enabled: enabled_flag(schema),
                tables: object_entries(schema.get("tables"))
                    .map(|(table_name, table)| TableStatus {
                        name: table_name.clone(),
                        enabled: enabled_flag(table),
                        sync_mode: table
                            .get("sync_mode")
                            .and_then(Value::as_str)
                            .map(str::to_owned),
                        columns: object_entries(table.get("columns"))
                            .map(|(column_name, column)| ColumnStatus {
                                name: column_name.clone(),
                                enabled: enabled_flag(column),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();
        Self { schemas }
    }

    /// Returns the schema entries.
    #[must_use]
    pub fn schemas(&self) -> &[SchemaEntry] {
        &self.schemas
    }

    /// Counts tables across every schema.
    #[must_use]
    pub fn summary(&self) -> TableSummary {
        let (total_tables, enabled_tables) = self
            .schemas
            .iter()
            .flat_map(|schema| &schema.tables)
            .fold((0, 0), |(total, enabled), table| {
                (total + 1, enabled + usize::from(table.enabled))
            });
        TableSummary {
            total_tables,
            enabled_tables,
            disabled_tables: total_tables - enabled_tables,
        }
    }

    /// Enabled schemas that have tables but sync none of them.
    pub fn schemas_without_enabled_tables(&self) -> impl Iterator<Item = &SchemaEntry> {
        self.schemas.iter().filter(|schema| {
            schema.enabled && !schema.tables.is_empty() && schema.enabled_table_count() == 0
        })
    }
}

fn object_entries(value: Option<&Value>) -> impl Iterator<Item = (&String, &Value)> {
    value
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(Map::iter)
        .filter(|(_, entry)| entry.is_object())
}

fn enabled_flag(value: &Value) -> bool {
    value
        .get("enabled")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}
