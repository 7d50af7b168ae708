//! Daily calorie totals for the exercises source.

use std::collections::BTreeMap;

use vitals_model::{CellValue, NormalizedRow, NormalizedTable, OutputColumn};

/// Folder whose activity log is collapsed to one row per day.
pub const EXERCISES_FOLDER: &str = "exercises";

/// Configured column holding per-activity calories.
pub const CALORIES_BURNED_COLUMN: &str = "Calories Burned";

/// Sums `column` per date and adds the basal burn.
///
/// Rows without a date are dropped. Missing or non-numeric cells count as
/// zero, so a day with no readable value still gets `basal_burn`. The
/// result holds only `date` and `column`, dates ascending. Returns `None`
/// when the table has no such column.
pub fn aggregate_daily_burn(
    table: &NormalizedTable,
    column: &str,
    basal_burn: f64,
) -> Option<NormalizedTable> {
    let idx = table.column_index(column)?;

    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for row in &table.rows {
        let Some(date) = row.date.as_deref() else {
            continue;
        };
        let calories = row.values[idx]
            .as_ref()
            .and_then(CellValue::as_f64)
            .unwrap_or(0.0);
        *totals.entry(date).or_insert(0.0) += calories;
    }

    let mut daily = NormalizedTable::new(
        table.source.clone(),
        vec![OutputColumn::numeric(column)],
    );
    daily.rows = totals
        .into_iter()
        .map(|(date, total)| {
            NormalizedRow::new(
                Some(date.to_string()),
                vec![Some(CellValue::Number(total.abs() + basal_burn))],
            )
        })
        .collect();
    Some(daily)
}
