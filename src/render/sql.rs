//! SQL renderer — one multi-row INSERT per category file.
//!
//! ```text
//! DROP TABLE IF EXISTS movies;
//! CREATE TABLE movies (...);
//! BEGIN;
//! INSERT INTO movies (title, ...) VALUES
//! ('Bar (1999)', ...),
//! ('Foo (2001)', ...);
//! COMMIT;
//! ```
//!
//! Strings use standard SQL quoting: single quotes, embedded quotes doubled,
//! backslashes left alone.

use crate::category::{CategorySpec, Table, ValueKind};
use crate::model::{lookup, Record};
use crate::render::Formatter;

#[derive(Default)]
pub struct SqlFormatter {
    rows: usize,
}

impl Formatter for SqlFormatter {
    fn preamble(&self, spec: &CategorySpec) -> String {
        let mut out = drop_table(&spec.table);
        out.push_str(&create_table(&spec.table));
        out.push_str("BEGIN;\n");
        out
    }

    fn rows_header(&self, spec: &CategorySpec) -> String {
        insert_into(&spec.table)
    }

    fn render(&mut self, spec: &CategorySpec, record: &Record) -> String {
        let fields = record.fields();
        let values: Vec<String> = spec
            .table
            .columns
            .iter()
            .map(|col| sql_literal(lookup(&fields, col.field), col.kind))
            .collect();
        let tuple = format!("({})", values.join(", "));

        self.rows += 1;
        if self.rows == 1 {
            tuple
        } else {
            format!(",\n{}", tuple)
        }
    }

    fn epilogue(&self, _spec: &CategorySpec, records: usize) -> String {
        if records > 0 {
            ";\nCOMMIT;\n".to_string()
        } else {
            "COMMIT;\n".to_string()
        }
    }

    fn file_extension(&self) -> &str {
        "sql"
    }
}

pub fn drop_table(table: &Table) -> String {
    format!("DROP TABLE IF EXISTS {};\n", table.name)
}

pub fn create_table(table: &Table) -> String {
    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|col| format!("  {} {}", col.name, col.sql))
        .collect();
    if let Some(constraints) = table.constraints {
        defs.push(format!("  {}", constraints));
    }
    format!("CREATE TABLE {} (\n{}\n);\n", table.name, defs.join(",\n"))
}

pub fn insert_into(table: &Table) -> String {
    let names: Vec<&str> = table.columns.iter().map(|col| col.name).collect();
    format!("INSERT INTO {} ({}) VALUES\n", table.name, names.join(", "))
}

fn sql_literal(value: Option<&str>, kind: ValueKind) -> String {
    match value {
        None => "NULL".to_string(),
        Some(v) => match kind {
            ValueKind::Text => quote(v),
            ValueKind::Integer => match v.trim().parse::<i64>() {
                Ok(n) => n.to_string(),
                // Not a number after all; keep the row loadable.
                Err(_) => "NULL".to_string(),
            },
        },
    }
}

fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
