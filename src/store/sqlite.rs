use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use super::schema_gen::{generate_create_table, generate_indexes};
use super::{ProductionStore, StoreError};
use crate::schema::{EntitySchema, ALL_ENTITIES};
use crate::staging::{FieldValue, TypedRow};

/// The SQLite-backed production warehouse.
///
/// Opening a store creates any missing entity tables; an existing warehouse
/// is left untouched so that re-loads run against previously committed rows.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open warehouse: {:?}", db_path))?;
        Self::init(conn)
    }

    /// In-memory store, useful for testing
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory warehouse")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA cache_size = -64000;",
        )
        .context("Failed to configure warehouse connection")?;

        for schema in ALL_ENTITIES {
            let sql = generate_create_table(schema);
            conn.execute(&sql, [])
                .with_context(|| format!("Failed to create table: {}", schema.name))?;

            for index_sql in generate_indexes(schema) {
                conn.execute(&index_sql, [])
                    .with_context(|| format!("Failed to create index for: {}", schema.name))?;
            }
        }

        Ok(Self { conn })
    }

    /// Map SQLite constraint failures onto the loader-visible taxonomy.
    /// A primary-key collision can come from a concurrent writer the loader
    /// never saw; it still has to surface as a duplicate, not a crash.
    fn classify(err: rusqlite::Error, schema: &EntitySchema, key: String) -> StoreError {
        if let rusqlite::Error::SqliteFailure(ffi_err, _) = &err {
            match ffi_err.extended_code {
                rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                | rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE => {
                    return StoreError::DuplicateKey {
                        table: schema.name,
                        key,
                    };
                }
                rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return StoreError::MissingForeignKey { table: schema.name };
                }
                _ => {}
            }
        }
        StoreError::Storage(err)
    }
}

impl ProductionStore for SqliteStore {
    fn insert_new(&mut self, schema: &EntitySchema, row: &TypedRow) -> Result<(), StoreError> {
        let mut columns: Vec<&str> = schema.columns.iter().map(|c| c.name).collect();
        columns.push("created_at");

        let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            schema.name,
            columns.join(", "),
            placeholders.join(", ")
        );

        let created_at = FieldValue::Text(Utc::now().to_rfc3339());
        let mut values = row.in_column_order(schema);
        values.push(&created_at);

        let mut stmt = self.conn.prepare_cached(&sql)?;
        stmt.execute(rusqlite::params_from_iter(values)).map_err(|e| {
            let key = row.get(schema.primary_key).to_string();
            Self::classify(e, schema, key)
        })?;

        Ok(())
    }

    fn exists(&self, table: &str, column: &str, key: &FieldValue) -> Result<bool, StoreError> {
        let sql = format!("SELECT 1 FROM {} WHERE {} = ?1 LIMIT 1", table, column);
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let found = stmt
            .query_row(rusqlite::params![key], |_| Ok(()))
            .optional()?
            .is_some();
        Ok(found)
    }

    fn count(&self, table: &str) -> Result<u64, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }
}
