//! JSON lines renderer — one self-contained object per record.
//!
//! `doc_type` comes first, then the category's keys in declared order.
//! Numeric keys whose text does not parse are kept as strings.

use crate::category::{CategorySpec, ValueKind};
use crate::model::{lookup, Record};
use crate::render::Formatter;
use serde_json::{Map, Value};

pub struct JsonLinesFormatter;

impl Formatter for JsonLinesFormatter {
    fn render(&mut self, spec: &CategorySpec, record: &Record) -> String {
        let fields = record.fields();
        let mut obj = Map::new();
        obj.insert("doc_type".to_string(), Value::from(spec.doc_type));

        for key in spec.keys {
            let value = lookup(&fields, key.field);
            if value.is_none() && key.skip_if_absent {
                continue;
            }
            obj.insert(key.name.to_string(), typed_value(value, key.kind));
        }

        let mut out = Value::Object(obj).to_string();
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

fn typed_value(value: Option<&str>, kind: ValueKind) -> Value {
    let Some(text) = value else {
        return Value::Null;
    };
    match kind {
        ValueKind::Integer => match text.trim().parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::from(text),
        },
        ValueKind::Text => Value::from(text),
    }
}
