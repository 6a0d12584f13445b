pub mod schema_gen;
pub mod sqlite;

pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::schema::EntitySchema;
use crate::staging::{FieldValue, TypedRow};

/// Error surface of the production store.
///
/// The constraint variants describe a single rejected row and are recovered
/// by the loader; `Storage` means the warehouse itself failed and aborts the
/// batch.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate key {key} in {table}")]
    DuplicateKey { table: &'static str, key: String },

    #[error("foreign key constraint failed in {table}")]
    MissingForeignKey { table: &'static str },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// The production-store collaborator: strongly-typed, constraint-enforced
/// table storage the loader commits accepted rows into.
pub trait ProductionStore {
    /// Insert a row if its primary key is absent. Constraint failures are
    /// classified as `DuplicateKey` / `MissingForeignKey`; anything else is
    /// `Storage`.
    fn insert_new(&mut self, schema: &EntitySchema, row: &TypedRow) -> Result<(), StoreError>;

    /// Whether a row with `column = key` exists in `table`
    fn exists(&self, table: &str, column: &str, key: &FieldValue) -> Result<bool, StoreError>;

    /// Number of committed rows in `table`
    fn count(&self, table: &str) -> Result<u64, StoreError>;
}
