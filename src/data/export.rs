use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use super::model::{Metric, Resort, ResortTable, COUNTRY, RESORT};

fn selected<'a>(table: &'a ResortTable, indices: &[usize]) -> Vec<&'a Resort> {
    indices.iter().filter_map(|&i| table.get(i)).collect()
}

/// Build an Arrow batch with `Resort`, `Country` and one column per metric
/// for the given rows.
pub fn to_record_batch(
    table: &ResortTable,
    indices: &[usize],
    metrics: &[Metric],
) -> Result<RecordBatch> {
    let rows = selected(table, indices);

    let mut fields = vec![
        Field::new(RESORT, DataType::Utf8, false),
        Field::new(COUNTRY, DataType::Utf8, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from(rows.iter().map(|r| r.name.as_str()).collect::<Vec<_>>())),
        Arc::new(StringArray::from(rows.iter().map(|r| r.country.as_str()).collect::<Vec<_>>())),
    ];

    for metric in metrics {
        fields.push(Field::new(metric.column(), DataType::Float64, true));
        let values: Vec<Option<f64>> = rows.iter().map(|r| metric.value(r)).collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).context("building record batch")
}

/// Render rows as a boxed text table.
pub fn pretty_table(table: &ResortTable, indices: &[usize], metrics: &[Metric]) -> Result<String> {
    let batch = to_record_batch(table, indices, metrics)?;
    let formatted = pretty_format_batches(&[batch]).context("formatting table")?;
    Ok(formatted.to_string())
}

/// Serialize full resort records, ranks included.
pub fn to_json(table: &ResortTable, indices: &[usize]) -> Result<String> {
    serde_json::to_string_pretty(&selected(table, indices)).context("serializing resorts")
}
