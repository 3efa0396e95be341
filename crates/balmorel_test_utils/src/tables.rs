//! Fixture tables and JSON exports.

use arrow::array::{Array, ArrayRef, Float64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use serde_json::{json, Map, Value};
use std::sync::Arc;

/// A symbol table: one Utf8 column per domain plus a Float64 `value` column.
///
/// Each row is its domain labels followed by the value.
pub fn symbol_batch(domains: &[&str], rows: &[(&[&str], f64)]) -> RecordBatch {
    let mut fields: Vec<Field> = domains
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, true))
        .collect();
    fields.push(Field::new("value", DataType::Float64, true));

    let mut columns: Vec<ArrayRef> = (0..domains.len())
        .map(|idx| {
            Arc::new(StringArray::from(
                rows.iter().map(|(labels, _)| labels[idx]).collect::<Vec<_>>(),
            )) as ArrayRef
        })
        .collect();
    columns.push(Arc::new(Float64Array::from(
        rows.iter().map(|(_, value)| *value).collect::<Vec<_>>(),
    )));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .expect("Failed to build symbol batch")
}

/// Values of a Utf8 column as owned strings; nulls become empty strings.
pub fn string_values(batch: &RecordBatch, column: &str) -> Vec<String> {
    let array = batch
        .column_by_name(column)
        .unwrap_or_else(|| panic!("no column '{}'", column));
    let array = array
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap_or_else(|| panic!("column '{}' is not Utf8", column));
    (0..array.len())
        .map(|i| {
            if array.is_null(i) {
                String::new()
            } else {
                array.value(i).to_string()
            }
        })
        .collect()
}

pub fn float_values(batch: &RecordBatch, column: &str) -> Vec<Option<f64>> {
    let array = batch
        .column_by_name(column)
        .unwrap_or_else(|| panic!("no column '{}'", column));
    let array = array
        .as_any()
        .downcast_ref::<Float64Array>()
        .unwrap_or_else(|| panic!("column '{}' is not Float64", column));
    (0..array.len())
        .map(|i| (!array.is_null(i)).then(|| array.value(i)))
        .collect()
}

pub fn column_names(batch: &RecordBatch) -> Vec<String> {
    batch
        .schema()
        .fields()
        .iter()
        .map(|field| field.name().clone())
        .collect()
}

/// Builder for the JSON export format read by `JsonStore`.
#[derive(Debug, Default)]
pub struct JsonExport {
    symbols: Map<String, Value>,
}

impl JsonExport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol with domain columns and a trailing `value` column.
    pub fn symbol(mut self, name: &str, domains: &[&str], rows: &[(&[&str], f64)]) -> Self {
        let mut columns: Vec<&str> = domains.to_vec();
        columns.push("value");
        let records: Vec<Value> = rows
            .iter()
            .map(|(labels, value)| {
                let mut record: Vec<Value> = labels.iter().map(|l| json!(l)).collect();
                record.push(json!(value));
                Value::Array(record)
            })
            .collect();
        self.symbols.insert(
            name.to_string(),
            json!({
                "description": format!("{} fixture", name),
                "domains": domains,
                "columns": columns,
                "records": records,
            }),
        );
        self
    }

    pub fn build(self) -> String {
        json!({ "symbols": self.symbols }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_batch_shape() {
        let batch = symbol_batch(&["AAA", "TECH"], &[(&["DK1", "wind"], 1.5)]);
        assert_eq!(column_names(&batch), vec!["AAA", "TECH", "value"]);
        assert_eq!(string_values(&batch, "TECH"), vec!["wind"]);
        assert_eq!(float_values(&batch, "value"), vec![Some(1.5)]);
    }

    #[test]
    fn test_json_export_document() {
        let doc = JsonExport::new()
            .symbol("G_CAP", &["AAA"], &[(&["DK1"], 2.0)])
            .build();
        let value: Value = serde_json::from_str(&doc).unwrap();
        assert_eq!(value["symbols"]["G_CAP"]["columns"], json!(["AAA", "value"]));
        assert_eq!(value["symbols"]["G_CAP"]["records"], json!([["DK1", 2.0]]));
    }
}
