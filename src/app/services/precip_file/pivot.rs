//! Pivot between per-value storage and per-timestamp table rows
//!
//! Stored values are one record per (timestamp, type, gage). The file layout
//! is one line per (timestamp, type) with one column per gage. [`pivot`]
//! groups and validates values eagerly so that a broken full-row invariant
//! is reported before any output is produced; row assembly itself is lazy
//! and can be restarted by calling [`PivotTable::rows`] again.

use crate::app::models::GageId;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::collections::HashMap;

/// One stored value in pivot-ready form
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRecord {
    pub date_time: NaiveDateTime,
    pub value_type: String,
    pub gage: GageId,
    pub value: f64,
}

/// One output row: type tag, timestamp and one value per column
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub value_type: String,
    pub date_time: NaiveDateTime,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
struct Group {
    date_time: NaiveDateTime,
    value_type: String,
    cells: Vec<f64>,
}

/// Validated grouping of an event's values
#[derive(Debug, Clone)]
pub struct PivotTable {
    columns: Vec<GageId>,
    groups: Vec<Group>,
}

impl PivotTable {
    /// Gage columns in output order
    pub fn columns(&self) -> &[GageId] {
        &self.columns
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Rows in first-seen (timestamp, type) order
    pub fn rows(&self) -> PivotRows<'_> {
        PivotRows {
            groups: self.groups.iter(),
        }
    }

    /// Number of distinct timestamps across all rows
    pub fn distinct_timestamps(&self) -> usize {
        let mut seen: Vec<NaiveDateTime> = self.groups.iter().map(|g| g.date_time).collect();
        seen.sort();
        seen.dedup();
        seen.len()
    }
}

/// Lazy row iterator over a [`PivotTable`]
pub struct PivotRows<'a> {
    groups: std::slice::Iter<'a, Group>,
}

impl Iterator for PivotRows<'_> {
    type Item = PivotRow;

    fn next(&mut self) -> Option<Self::Item> {
        self.groups.next().map(|group| PivotRow {
            value_type: group.value_type.clone(),
            date_time: group.date_time,
            values: group.cells.clone(),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.groups.size_hint()
    }
}

impl ExactSizeIterator for PivotRows<'_> {}

/// Group values by (timestamp, type) and order each group by `columns`
///
/// Every group must carry exactly one value for every column. A value for a
/// gage outside `columns`, a duplicated cell, or a missing cell is an error.
pub fn pivot<'a, I>(values: I, columns: &[GageId]) -> Result<PivotTable>
where
    I: IntoIterator<Item = &'a ValueRecord>,
{
    let column_index: HashMap<GageId, usize> = columns
        .iter()
        .enumerate()
        .map(|(index, gage)| (*gage, index))
        .collect();

    let mut group_index: HashMap<(NaiveDateTime, &str), usize> = HashMap::new();
    let mut partial: Vec<(NaiveDateTime, &str, Vec<Option<f64>>)> = Vec::new();

    for record in values {
        let column = *column_index.get(&record.gage).ok_or_else(|| {
            Error::pivot(format!(
                "value at {} references {} which is not a column of this event",
                record.date_time, record.gage
            ))
        })?;

        let key = (record.date_time, record.value_type.as_str());
        let slot = *group_index.entry(key).or_insert_with(|| {
            partial.push((record.date_time, record.value_type.as_str(), vec![None; columns.len()]));
            partial.len() - 1
        });

        let cell = &mut partial[slot].2[column];
        if cell.is_some() {
            return Err(Error::pivot(format!(
                "duplicate {} value for {} at {}",
                record.value_type, record.gage, record.date_time
            )));
        }
        *cell = Some(record.value);
    }

    let groups = partial
        .into_iter()
        .map(|(date_time, value_type, cells)| {
            let cells = cells
                .into_iter()
                .zip(columns)
                .map(|(cell, gage)| {
                    cell.ok_or_else(|| {
                        Error::pivot(format!(
                            "missing {} value for {} at {}",
                            value_type, gage, date_time
                        ))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            Ok(Group {
                date_time,
                value_type: value_type.to_string(),
                cells,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PivotTable {
        columns: columns.to_vec(),
        groups,
    })
}

/// Expand table rows back into one record per cell
pub fn unpivot<I>(rows: I, columns: &[GageId]) -> Result<Vec<ValueRecord>>
where
    I: IntoIterator<Item = PivotRow>,
{
    let mut records = Vec::new();
    for row in rows {
        if row.values.len() != columns.len() {
            return Err(Error::pivot(format!(
                "row at {} has {} values for {} columns",
                row.date_time,
                row.values.len(),
                columns.len()
            )));
        }
        for (gage, value) in columns.iter().zip(&row.values) {
            records.push(ValueRecord {
                date_time: row.date_time,
                value_type: row.value_type.clone(),
                gage: *gage,
                value: *value,
            });
        }
    }
    Ok(records)
}
