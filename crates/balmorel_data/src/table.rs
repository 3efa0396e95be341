//! Provenance tagging and row-wise concatenation of query fragments.

use crate::cache::ScenarioKey;
use crate::error::{DataError, Result};
use arrow::array::{new_null_array, ArrayRef, RecordBatch, RecordBatchOptions, StringArray};
use arrow::compute::{cast, concat_batches};
use arrow::datatypes::{DataType, Field, Schema};
use std::sync::Arc;

pub const SCENARIO_COLUMN: &str = "Scenario";
pub const YEAR_COLUMN: &str = "Year";

/// Prepend `Scenario` (and `Year` for yearly keys) columns filled from `key`.
pub fn tag_provenance(batch: &RecordBatch, key: &ScenarioKey) -> Result<RecordBatch> {
    let schema = batch.schema();
    for name in [SCENARIO_COLUMN, YEAR_COLUMN] {
        if schema.column_with_name(name).is_some() {
            return Err(DataError::Table(format!(
                "cannot tag {}: column '{}' already exists",
                key, name
            )));
        }
    }

    let num_rows = batch.num_rows();
    let mut fields = vec![Field::new(SCENARIO_COLUMN, DataType::Utf8, false)];
    let mut columns: Vec<ArrayRef> = vec![Arc::new(StringArray::from(vec![
        key.scenario.as_str();
        num_rows
    ]))];

    if let Some(year) = key.year() {
        fields.push(Field::new(YEAR_COLUMN, DataType::Utf8, false));
        columns.push(Arc::new(StringArray::from(vec![year; num_rows])));
    }

    fields.extend(schema.fields().iter().map(|f| f.as_ref().clone()));
    columns.extend(batch.columns().iter().cloned());

    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(fields)),
        columns,
        &options,
    )?)
}

/// Zero rows, zero columns.
pub fn empty_table() -> RecordBatch {
    RecordBatch::new_empty(Arc::new(Schema::empty()))
}

/// Stack `batches` row-wise in order.
///
/// Columns are the union of every fragment's columns by first appearance. A
/// column missing from a fragment is null there; a column whose type differs
/// between fragments becomes Utf8.
pub fn concat_tables(batches: &[RecordBatch]) -> Result<RecordBatch> {
    match batches {
        [] => return Ok(empty_table()),
        [single] => return Ok(single.clone()),
        _ => {}
    }

    let mut columns: Vec<(String, DataType)> = Vec::new();
    for batch in batches {
        for field in batch.schema().fields() {
            match columns.iter_mut().find(|(name, _)| name == field.name()) {
                Some((_, data_type)) => {
                    *data_type = merge_types(data_type, field.data_type());
                }
                None => columns.push((field.name().clone(), field.data_type().clone())),
            }
        }
    }

    let schema = Arc::new(Schema::new(
        columns
            .iter()
            .map(|(name, data_type)| Field::new(name, data_type.clone(), true))
            .collect::<Vec<_>>(),
    ));

    let aligned = batches
        .iter()
        .map(|batch| align(batch, &schema))
        .collect::<Result<Vec<_>>>()?;

    Ok(concat_batches(&schema, &aligned)?)
}

fn merge_types(existing: &DataType, incoming: &DataType) -> DataType {
    match (existing, incoming) {
        (a, b) if a == b => a.clone(),
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),
        _ => DataType::Utf8,
    }
}

fn align(batch: &RecordBatch, schema: &Arc<Schema>) -> Result<RecordBatch> {
    let num_rows = batch.num_rows();
    let columns = schema
        .fields()
        .iter()
        .map(|field| match batch.column_by_name(field.name()) {
            Some(column) if column.data_type() == field.data_type() => Ok(column.clone()),
            Some(column) => Ok(cast(column, field.data_type())?),
            None => Ok(new_null_array(field.data_type(), num_rows)),
        })
        .collect::<Result<Vec<_>>>()?;

    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    Ok(RecordBatch::try_new_with_options(
        schema.clone(),
        columns,
        &options,
    )?)
}
