pub mod report;

pub use report::{LoadReport, RejectReason, Rejection};

use anyhow::{Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;

use crate::schema::EntitySchema;
use crate::staging::{convert_row, read_staging_file, StagedRow};
use crate::store::{ProductionStore, StoreError};

/// Outcome of a single staged row
enum RowOutcome {
    Committed,
    Rejected(RejectReason, String),
}

/// Cleanses one batch of staged rows for one entity and commits the accepted
/// rows into the production store.
pub struct EntityLoader<'a, S: ProductionStore> {
    store: &'a mut S,
}

impl<'a, S: ProductionStore> EntityLoader<'a, S> {
    pub fn new(store: &'a mut S) -> Self {
        Self { store }
    }

    /// Load a batch of staged rows.
    ///
    /// Rows are processed in order; each accepted row is committed before the
    /// next row is examined, so later rows in the same batch can reference
    /// it. A rejected row never aborts the batch. Only a storage failure
    /// does, and that is returned as an error rather than a rejection.
    pub fn load(
        &mut self,
        schema: &EntitySchema,
        rows: &[StagedRow],
        progress: &ProgressBar,
    ) -> Result<LoadReport> {
        let mut report = LoadReport::new(schema.name);

        for row in rows {
            match self.load_row(schema, row) {
                Ok(RowOutcome::Committed) => report.accept(),
                Ok(RowOutcome::Rejected(reason, detail)) => {
                    report.reject(row.index, row.key(schema), reason, detail);
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Storage failure while loading {}", schema.name));
                }
            }
            progress.inc(1);
        }

        Ok(report)
    }

    /// Validate and commit one row. Checks run in a fixed order and the first
    /// failure decides the rejection reason.
    fn load_row(
        &mut self,
        schema: &EntitySchema,
        row: &StagedRow,
    ) -> Result<RowOutcome, StoreError> {
        let typed = convert_row(row, schema);

        for col in schema.columns {
            if !col.nullable && typed.get(col.name).is_null() {
                let raw = row.get(col.name).unwrap_or("");
                return Ok(RowOutcome::Rejected(
                    RejectReason::MalformedRequiredField,
                    format!("{} is required but {:?} did not convert", col.name, raw),
                ));
            }
        }

        for (a, b) in schema.distinct_pairs {
            let left = typed.get(a);
            if !left.is_null() && left == typed.get(b) {
                return Ok(RowOutcome::Rejected(
                    RejectReason::InvariantViolation,
                    format!("{} must differ from {}", a, b),
                ));
            }
        }

        // Parents are loaded before children, so every resolvable reference
        // is already committed, including earlier rows of this batch.
        for fk in schema.foreign_keys {
            let key = typed.get(fk.column);
            if key.is_null() {
                continue;
            }
            if !self
                .store
                .exists(fk.references_table, fk.references_column, key)?
            {
                return Ok(RowOutcome::Rejected(
                    RejectReason::MissingForeignKey,
                    format!("{} {} not found in {}", fk.column, key, fk.references_table),
                ));
            }
        }

        let pk = typed.get(schema.primary_key);
        if self.store.exists(schema.name, schema.primary_key, pk)? {
            return Ok(RowOutcome::Rejected(
                RejectReason::DuplicateKey,
                format!("{} {} already committed", schema.primary_key, pk),
            ));
        }

        match self.store.insert_new(schema, &typed) {
            Ok(()) => Ok(RowOutcome::Committed),
            // A writer this loader does not know about can still win the
            // race between the pre-check and the commit.
            Err(StoreError::DuplicateKey { .. }) => Ok(RowOutcome::Rejected(
                RejectReason::DuplicateKey,
                format!("{} {} already committed", schema.primary_key, pk),
            )),
            Err(StoreError::MissingForeignKey { .. }) => Ok(RowOutcome::Rejected(
                RejectReason::MissingForeignKey,
                "referenced row vanished before commit".to_string(),
            )),
            Err(e @ StoreError::Storage(_)) => Err(e),
        }
    }
}

/// Load every entity's staging CSV from `staging_dir` in dependency order,
/// with a progress bar per entity. Entities whose staging file is absent are
/// skipped.
pub fn load_staging_dir<S: ProductionStore>(
    staging_dir: &Path,
    store: &mut S,
    entities: &[&'static EntitySchema],
) -> Result<Vec<LoadReport>> {
    let multi = MultiProgress::new();
    let style = ProgressStyle::default_bar()
        .template("{msg:30} [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap()
        .progress_chars("=>-");

    let mut reports = Vec::new();

    for schema in entities {
        let file_path = staging_dir.join(schema.source_file);

        let pb = multi.add(ProgressBar::new(0));
        pb.set_style(style.clone());
        pb.set_message(schema.name);

        if !file_path.exists() {
            pb.finish_with_message(format!("{}: skipped (file not found)", schema.name));
            continue;
        }

        let rows = read_staging_file(&file_path)?;
        pb.set_length(rows.len() as u64);

        let report = EntityLoader::new(store).load(schema, &rows, &pb)?;
        pb.finish_with_message(format!(
            "{}: {} accepted, {} rejected",
            schema.name,
            report.accepted_count(),
            report.rejected_count()
        ));
        reports.push(report);
    }

    Ok(reports)
}
