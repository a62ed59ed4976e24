//! Fixed-format text rendering for precipitation events

use super::pivot::{PivotRow, ValueRecord, pivot};
use crate::app::models::{Event, EventId, Gage, GageId};
use crate::app::store::EntityStore;
use crate::constants::precip_keywords::{COORD, EVENT, NRGAG, NRPDS};
use crate::{Error, Result};
use chrono::NaiveDateTime;

/// `YYYY MM DD HH mm`
pub fn render_timestamp(date_time: &NaiveDateTime) -> String {
    date_time.format("%Y %m %d %H %M").to_string()
}

/// One value field, space-prefixed
pub fn render_value(value: f64, decimals: usize) -> String {
    format!(" {:.*}", decimals, value)
}

/// A full value line including the trailing newline
pub fn render_row(row: &PivotRow, decimals: usize) -> String {
    let mut line = format!("{} {}", row.value_type, render_timestamp(&row.date_time));
    for value in &row.values {
        line.push_str(&render_value(*value, decimals));
    }
    line.push('\n');
    line
}

/// Coordinates print with at least one decimal place (`100.0`)
fn render_coordinate(value: f64) -> String {
    format!("{:?}", value)
}

/// `COORD x y "description"`
pub fn render_coord(gage: &Gage) -> String {
    format!(
        "{} {} {} \"{}\"\n",
        COORD,
        render_coordinate(gage.x),
        render_coordinate(gage.y),
        gage.description
    )
}

/// `EVENT`, `NRGAG` and `NRPDS` header lines
pub fn render_header(event: &Event) -> String {
    format!(
        "{} \"{}\"\n{} {}\n{} {}\n",
        EVENT, event.description, NRGAG, event.nr_gag, NRPDS, event.nr_pds
    )
}

/// Render one stored event: header, coordinates, then pivoted value rows
///
/// Coordinates and value columns follow the stored gage positions.
pub fn render_event<S: EntityStore>(store: &S, event_id: EventId, decimals: usize) -> Result<String> {
    let event = store.require::<Event>(event_id)?;
    let mut out = render_header(event);

    if event.nr_gag == 0 {
        return Ok(out);
    }

    let gages = store.gages_of(event_id)?;
    if gages.len() != event.nr_gag {
        return Err(Error::pivot(format!(
            "event '{}' declares {} gages but owns {}",
            event.description,
            event.nr_gag,
            gages.len()
        )));
    }
    for gage in &gages {
        out.push_str(&render_coord(gage));
    }

    let columns: Vec<GageId> = gages.iter().map(|g| g.id).collect();
    let records: Vec<ValueRecord> = store
        .values_of(event_id)?
        .into_iter()
        .map(|v| ValueRecord {
            date_time: v.date_time,
            value_type: v.value_type.clone(),
            gage: v.gage,
            value: v.value,
        })
        .collect();

    let table = pivot(&records, &columns)?;
    for row in table.rows() {
        out.push_str(&render_row(&row, decimals));
    }
    Ok(out)
}

/// Render every event of a precipitation file in file order
pub fn render_events<S: EntityStore>(store: &S, events: &[EventId], decimals: usize) -> Result<String> {
    let mut out = String::new();
    for event in events {
        out.push_str(&render_event(store, *event, decimals)?);
    }
    Ok(out)
}
