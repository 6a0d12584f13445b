use std::collections::HashSet;

/// Column data type as seen by the conversion pass and the SQL generator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Integer,
    Text,
    /// Boolean-semantic text column ("1"/"Y"/"Yes"/"True" => 1, else 0)
    Flag,
    /// ISO `YYYY-MM-DD` text column, stored as TEXT
    Date,
}

/// Column definition
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub field_type: FieldType,
    pub nullable: bool,
}

impl Column {
    /// Create an optional (nullable) column
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            nullable: true,
        }
    }

    /// Create a required (non-nullable) column
    pub const fn required(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            nullable: false,
        }
    }
}

/// Foreign key reference
#[derive(Debug, Clone)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

impl ForeignKey {
    pub const fn new(
        column: &'static str,
        references_table: &'static str,
        references_column: &'static str,
    ) -> Self {
        Self {
            column,
            references_table,
            references_column,
        }
    }
}

/// Entity schema definition
///
/// Drives the whole pipeline: the conversion pass, per-row validation in the
/// loader, and CREATE TABLE generation for the production store.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    pub name: &'static str,
    /// Staging CSV file this entity is loaded from
    pub source_file: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [Column],
    pub foreign_keys: &'static [ForeignKey],
    /// Column pairs that must not hold the same value in one row
    /// (e.g. a match's home and away team)
    pub distinct_pairs: &'static [(&'static str, &'static str)],
}

impl EntitySchema {
    /// Get all entities this entity depends on (FK parents)
    pub fn dependencies(&self) -> HashSet<&'static str> {
        self.foreign_keys
            .iter()
            .map(|fk| fk.references_table)
            .collect()
    }
}
