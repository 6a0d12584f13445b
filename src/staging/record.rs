use rusqlite::types::{Null, ToSql, ToSqlOutput};
use std::collections::HashMap;

use crate::schema::{EntitySchema, FieldType};
use crate::staging::convert::{parse_date, parse_flag, parse_int};

/// A loosely-typed staged record: raw text keyed by column name, plus the
/// 1-based data row number it came from.
#[derive(Debug, Clone)]
pub struct StagedRow {
    pub index: usize,
    values: HashMap<String, String>,
}

impl StagedRow {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            values: HashMap::new(),
        }
    }

    pub fn set(&mut self, column: impl Into<String>, raw: impl Into<String>) {
        self.values.insert(column.into(), raw.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(|s| s.as_str())
    }

    /// Raw primary-key text for this row, if the staging record carried one
    pub fn key(&self, schema: &EntitySchema) -> Option<String> {
        self.get(schema.primary_key)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// A typed value ready for binding into the production store
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl ToSql for FieldValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            FieldValue::Null => Null.to_sql(),
            FieldValue::Integer(i) => i.to_sql(),
            FieldValue::Text(s) => s.to_sql(),
        }
    }
}

/// A converted row ready for validation and insertion
#[derive(Debug, Clone)]
pub struct TypedRow {
    values: HashMap<&'static str, FieldValue>,
}

impl TypedRow {
    pub fn get(&self, column: &str) -> &FieldValue {
        self.values.get(column).unwrap_or(&FieldValue::Null)
    }

    /// Values in schema column order, for positional binding
    pub fn in_column_order(&self, schema: &EntitySchema) -> Vec<&FieldValue> {
        schema.columns.iter().map(|c| self.get(c.name)).collect()
    }
}

/// Convert a staged row's raw text into typed values, driven by the entity's
/// column table. Total: conversion failures become `Null` (flags become
/// `false`), never errors.
pub fn convert_row(row: &StagedRow, schema: &EntitySchema) -> TypedRow {
    let mut values = HashMap::new();

    for col in schema.columns {
        let raw = row.get(col.name).unwrap_or("");
        let value = match col.field_type {
            FieldType::Flag => FieldValue::Integer(parse_flag(raw) as i64),
            FieldType::Integer => parse_int(raw)
                .map(FieldValue::Integer)
                .unwrap_or(FieldValue::Null),
            FieldType::Date => parse_date(raw)
                .map(|d| FieldValue::Text(d.format("%Y-%m-%d").to_string()))
                .unwrap_or(FieldValue::Null),
            FieldType::Text => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    FieldValue::Null
                } else {
                    FieldValue::Text(trimmed.to_string())
                }
            }
        };
        values.insert(col.name, value);
    }

    TypedRow { values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LEAGUES, PLAYERS};

    fn league_row() -> StagedRow {
        let mut row = StagedRow::new(1);
        row.set("league_id", "1");
        row.set("league_name", "EPL");
        row.set("country", "England");
        row.set("sport_type", "Football");
        row.set("founded_year", "1992");
        row.set("is_active", "Yes");
        row
    }

    #[test]
    fn test_convert_league_row() {
        let typed = convert_row(&league_row(), &LEAGUES);
        assert_eq!(*typed.get("league_id"), FieldValue::Integer(1));
        assert_eq!(*typed.get("league_name"), FieldValue::Text("EPL".into()));
        assert_eq!(*typed.get("founded_year"), FieldValue::Integer(1992));
        assert_eq!(*typed.get("is_active"), FieldValue::Integer(1));
    }

    #[test]
    fn test_unrecognised_flag_converts_to_false() {
        let mut row = league_row();
        row.set("is_active", "maybe");
        let typed = convert_row(&row, &LEAGUES);
        assert_eq!(*typed.get("is_active"), FieldValue::Integer(0));
    }

    #[test]
    fn test_missing_and_garbage_fields_convert_to_null() {
        let mut row = StagedRow::new(3);
        row.set("player_id", "10");
        row.set("team_id", "2");
        row.set("first_name", "Jo");
        row.set("last_name", "Bloggs");
        row.set("date_of_birth", "1990-13-40");
        row.set("jersey_number", "ten");
        let typed = convert_row(&row, &PLAYERS);

        assert_eq!(*typed.get("date_of_birth"), FieldValue::Null);
        assert_eq!(*typed.get("jersey_number"), FieldValue::Null);
        // position was never staged at all
        assert_eq!(*typed.get("position"), FieldValue::Null);
    }

    #[test]
    fn test_staged_row_key() {
        let row = league_row();
        assert_eq!(row.key(&LEAGUES), Some("1".to_string()));

        let mut blank = StagedRow::new(2);
        blank.set("league_id", "   ");
        assert_eq!(blank.key(&LEAGUES), None);
    }
}
