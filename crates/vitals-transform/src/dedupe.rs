use std::collections::BTreeSet;

use vitals_model::{CellValue, NormalizedTable};

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum CellKey<'a> {
    Null,
    Number(u64),
    Text(&'a str),
}

fn cell_key(value: Option<&CellValue>) -> CellKey<'_> {
    match value {
        None => CellKey::Null,
        Some(CellValue::Number(number)) => CellKey::Number(number.to_bits()),
        Some(CellValue::Text(text)) => CellKey::Text(text.as_str()),
    }
}

/// Drops rows equal to an earlier row in every column, date included.
///
/// Returns the number of rows removed.
pub fn drop_duplicate_rows(table: &mut NormalizedTable) -> usize {
    let before = table.rows.len();
    let mut keep = Vec::with_capacity(before);
    {
        let mut seen = BTreeSet::new();
        for row in &table.rows {
            let composite: (Option<&str>, Vec<CellKey<'_>>) = (
                row.date.as_deref(),
                row.values.iter().map(Option::as_ref).map(cell_key).collect(),
            );
            keep.push(seen.insert(composite));
        }
    }
    let mut flags = keep.into_iter();
    table.rows.retain(|_| flags.next().unwrap_or(true));
    before - table.rows.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_model::{NormalizedRow, OutputColumn};

    fn table(rows: Vec<NormalizedRow>) -> NormalizedTable {
        NormalizedTable {
            source: "hrv".into(),
            columns: vec![OutputColumn::numeric("hrv_v"), OutputColumn::text("hrv_t")],
            rows,
        }
    }

    fn row(date: Option<&str>, number: Option<f64>, text: Option<&str>) -> NormalizedRow {
        NormalizedRow::new(
            date.map(str::to_string),
            vec![
                number.map(CellValue::Number),
                text.map(|t| CellValue::Text(t.to_string())),
            ],
        )
    }

    #[test]
    fn identical_rows_collapse_to_first() {
        let mut t = table(vec![
            row(Some("20250107"), Some(48.0), Some("ok")),
            row(Some("20250108"), Some(50.0), None),
            row(Some("20250107"), Some(48.0), Some("ok")),
        ]);
        assert_eq!(drop_duplicate_rows(&mut t), 1);
        assert_eq!(t.rows.len(), 2);
        assert_eq!(t.rows[1].date.as_deref(), Some("20250108"));
    }

    #[test]
    fn rows_differing_in_one_cell_are_kept() {
        let mut t = table(vec![
            row(Some("20250107"), Some(48.0), None),
            row(Some("20250107"), Some(49.0), None),
            row(None, Some(48.0), None),
            row(None, Some(48.0), None),
        ]);
        assert_eq!(drop_duplicate_rows(&mut t), 1);
        assert_eq!(t.rows.len(), 3);
    }

    #[test]
    fn text_and_number_do_not_collide() {
        let mut t = NormalizedTable {
            source: "x".into(),
            columns: vec![OutputColumn::text("x_a")],
            rows: vec![
                NormalizedRow::new(None, vec![Some(CellValue::Text("1".into()))]),
                NormalizedRow::new(None, vec![Some(CellValue::Number(1.0))]),
            ],
        };
        assert_eq!(drop_duplicate_rows(&mut t), 0);
    }
}
