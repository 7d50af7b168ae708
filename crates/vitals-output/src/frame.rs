//! Consolidated table to DataFrame.

use polars::prelude::{Column, DataFrame};
use vitals_model::{CellValue, ColumnKind, ConsolidatedTable, DATE_COLUMN};

use crate::error::Result;

fn numeric_column(table: &ConsolidatedTable, idx: usize, name: &str) -> Column {
    let values: Vec<Option<f64>> = table
        .rows
        .iter()
        .map(|row| row.values[idx].as_ref().and_then(CellValue::as_f64))
        .collect();
    Column::new(name.into(), values)
}

fn text_column(table: &ConsolidatedTable, idx: usize, name: &str) -> Column {
    let values: Vec<Option<String>> = table
        .rows
        .iter()
        .map(|row| {
            row.values[idx].as_ref().map(|value| match value {
                CellValue::Text(text) => text.clone(),
                CellValue::Number(number) => number.to_string(),
            })
        })
        .collect();
    Column::new(name.into(), values)
}

/// Builds the output frame: `date` as Int64, then one column per table column.
pub fn consolidated_frame(table: &ConsolidatedTable) -> Result<DataFrame> {
    let mut columns = Vec::with_capacity(table.columns.len() + 1);
    columns.push(Column::new(DATE_COLUMN.into(), table.dates()));

    for (idx, column) in table.columns.iter().enumerate() {
        let built = match column.kind {
            ColumnKind::Numeric => numeric_column(table, idx, &column.name),
            ColumnKind::Text => text_column(table, idx, &column.name),
        };
        columns.push(built);
    }

    Ok(DataFrame::new(columns)?)
}
