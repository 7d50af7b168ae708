//! Merging of per-folder tables into the consolidated table.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};
use vitals_ingest::SourceCatalog;
use vitals_model::{
    CellValue, ConsolidatedRow, ConsolidatedTable, NormalizedRow, NormalizedTable,
    ProcessingOptions,
};

use crate::error::{Result, TransformError};
use crate::folder::{FolderReport, process_folder};

const MERGED_SOURCE: &str = "merged";

/// Full outer join of two tables on `date`.
///
/// Dates match by exact text. Rows without a date never match and are kept
/// with nulls on the other side. A date present several times on both sides
/// yields every pairing.
pub fn outer_join(left: &NormalizedTable, right: &NormalizedTable) -> NormalizedTable {
    let left_width = left.columns.len();
    let right_width = right.columns.len();
    let columns = left
        .columns
        .iter()
        .chain(&right.columns)
        .cloned()
        .collect();
    let mut joined = NormalizedTable::new(MERGED_SOURCE, columns);

    let mut right_by_date: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, row) in right.rows.iter().enumerate() {
        if let Some(date) = row.date.as_deref() {
            right_by_date.entry(date).or_default().push(idx);
        }
    }
    let mut right_matched = vec![false; right.rows.len()];

    for row in &left.rows {
        let partners = row
            .date
            .as_deref()
            .and_then(|date| right_by_date.get(date))
            .filter(|partners| !partners.is_empty());
        match partners {
            Some(partners) => {
                for &idx in partners {
                    right_matched[idx] = true;
                    joined.rows.push(join_rows(row, Some(&right.rows[idx]), right_width));
                }
            }
            None => joined.rows.push(join_rows(row, None, right_width)),
        }
    }

    let unmatched = right
        .rows
        .iter()
        .zip(&right_matched)
        .filter(|(_, matched)| !**matched);
    for (row, _) in unmatched {
        let mut values = vec![None; left_width];
        values.extend(row.values.iter().cloned());
        joined.rows.push(NormalizedRow::new(row.date.clone(), values));
    }

    joined
}

fn join_rows(
    left: &NormalizedRow,
    right: Option<&NormalizedRow>,
    right_width: usize,
) -> NormalizedRow {
    let mut values = left.values.clone();
    match right {
        Some(right) => values.extend(right.values.iter().cloned()),
        None => values.resize(values.len() + right_width, None),
    }
    NormalizedRow::new(left.date.clone(), values)
}

/// Orders and filters a joined table.
///
/// Rows without a date or dated before `from_date` are dropped, the rest are
/// sorted by date keeping their relative order, and value columns are put in
/// alphabetical order.
pub fn finalize(joined: NormalizedTable, from_date: i64) -> ConsolidatedTable {
    let mut order: Vec<usize> = (0..joined.columns.len()).collect();
    order.sort_by(|&a, &b| joined.columns[a].name.cmp(&joined.columns[b].name));

    let columns = order.iter().map(|&idx| joined.columns[idx].clone()).collect();

    let mut rows: Vec<ConsolidatedRow> = joined
        .rows
        .into_iter()
        .filter_map(|row| {
            let date: i64 = row.date.as_deref()?.parse().ok()?;
            if date < from_date {
                return None;
            }
            let mut source: Vec<Option<CellValue>> = row.values;
            let values = order.iter().map(|&idx| source[idx].take()).collect();
            Some(ConsolidatedRow { date, values })
        })
        .collect();
    rows.sort_by_key(|row| row.date);

    ConsolidatedTable { columns, rows }
}

/// Joins tables in order and finalizes the result.
///
/// Returns `None` when there is nothing to merge.
pub fn merge_tables<'a, I>(tables: I, from_date: i64) -> Option<ConsolidatedTable>
where
    I: IntoIterator<Item = &'a NormalizedTable>,
{
    let mut tables = tables.into_iter();
    let first = tables.next()?.clone();
    let joined = tables.fold(first, |acc, table| outer_join(&acc, table));
    debug!(rows = joined.height(), columns = joined.columns.len(), "joined tables");
    Some(finalize(joined, from_date))
}

/// Consolidated table together with what happened to each folder.
#[derive(Debug, Clone)]
pub struct Consolidation {
    pub reports: Vec<FolderReport>,
    pub table: ConsolidatedTable,
}

impl Consolidation {
    /// Number of folders that contributed rows.
    pub fn contributing_folders(&self) -> usize {
        self.reports
            .iter()
            .filter(|report| report.table().is_some())
            .count()
    }
}

/// Processes every folder of the catalog and merges the results.
///
/// Fails only when the folder list cannot be read or no folder contributed.
pub fn consolidate<C>(catalog: &C, options: &ProcessingOptions) -> Result<Consolidation>
where
    C: SourceCatalog + ?Sized,
{
    let folders = catalog.folders()?;
    info!(folders = folders.len(), "processing source folders");

    let reports: Vec<FolderReport> = folders
        .iter()
        .map(|folder| process_folder(catalog, folder, options))
        .collect();

    let Some(table) = merge_tables(
        reports.iter().filter_map(FolderReport::table),
        options.from_date,
    ) else {
        warn!("no folder produced any rows");
        return Err(TransformError::NoData);
    };

    info!(
        rows = table.height(),
        columns = table.columns.len(),
        from_date = options.from_date,
        "consolidated table"
    );
    Ok(Consolidation { reports, table })
}
