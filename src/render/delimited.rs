//! Delimited renderer — one separator-joined line per record.

use crate::category::CategorySpec;
use crate::model::{lookup, Record};
use crate::render::Formatter;

pub struct DelimitedFormatter {
    separator: char,
}

impl DelimitedFormatter {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl Formatter for DelimitedFormatter {
    fn render(&mut self, spec: &CategorySpec, record: &Record) -> String {
        let fields = record.fields();
        let mut out = String::new();
        for (i, name) in spec.delimited.iter().enumerate() {
            if i > 0 {
                out.push(self.separator);
            }
            out.push_str(lookup(&fields, name).unwrap_or_default());
        }
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "tsv"
    }
}
