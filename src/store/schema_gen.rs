use crate::schema::{EntitySchema, FieldType};

/// Generate CREATE TABLE SQL for an entity schema.
///
/// Every production table carries a `created_at` column assigned by the store
/// at commit time; it never appears in the staged columns.
pub fn generate_create_table(schema: &EntitySchema) -> String {
    let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let sql_type = match col.field_type {
            FieldType::Integer => "INTEGER",
            FieldType::Text => "TEXT",
            FieldType::Flag => "INTEGER",
            FieldType::Date => "TEXT",
        };

        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        let pk = if col.name == schema.primary_key {
            " PRIMARY KEY"
        } else {
            ""
        };

        columns.push(format!(
            "    {} {}{}{}",
            col.name, sql_type, pk, null_constraint
        ));
    }

    columns.push("    created_at TEXT NOT NULL".to_string());

    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    for (a, b) in schema.distinct_pairs {
        columns.push(format!("    CHECK ({} <> {})", a, b));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &EntitySchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX IF NOT EXISTS idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}
