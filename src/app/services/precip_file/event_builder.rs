//! Event record builder
//!
//! Turns one `EVENT` chunk into a typed [`EventRecord`] and registers the
//! resulting event, gages and values with the unit of work. Parsing and
//! building are separate steps so a malformed chunk never leaves entities
//! behind.

use crate::app::models::{Event, EventId, Gage, GageId, PrecipFile, PrecipFileId, PrecipValue};
use crate::app::services::chunk_parser::{Chunk, ChunkLine};
use crate::app::store::UnitOfWork;
use crate::config::ReadConfig;
use crate::constants::TIMESTAMP_FIELDS;
use crate::constants::precip_keywords::{COORD, EVENT, NRGAG, NRPDS};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;
use tracing::debug;

/// Gage declaration from a `COORD` line
#[derive(Debug, Clone, PartialEq)]
pub struct CoordRecord {
    pub x: f64,
    pub y: f64,
    pub description: String,
}

/// One value line: type tag, timestamp and values in column order
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRow {
    pub value_type: String,
    pub date_time: NaiveDateTime,
    pub values: Vec<f64>,
}

/// Parsed contents of one event chunk
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub description: String,
    pub nr_gag: usize,
    pub nr_pds: usize,
    pub coords: Vec<CoordRecord>,
    pub rows: Vec<ValueRow>,
}

impl EventRecord {
    /// Number of distinct timestamps among the value rows
    pub fn distinct_timestamps(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.date_time)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Parse an `EVENT` chunk
///
/// Format errors carry the line number but no file name; callers attach the
/// file with [`Error::in_file`].
pub fn parse_event_chunk(chunk: &Chunk, config: &ReadConfig) -> Result<EventRecord> {
    let mut description: Option<String> = None;
    let mut nr_gag: Option<usize> = None;
    let mut nr_pds: Option<usize> = None;
    let mut coords = Vec::new();
    let mut rows = Vec::new();

    for line in chunk.lines.iter().filter(|l| !l.is_blank()) {
        let tag = line.tokens[0].as_str();
        match tag {
            EVENT => {
                if description.is_some() {
                    return Err(at(line, "duplicate EVENT line"));
                }
                description = Some(parse_description(line, &line.tokens[1..])?);
            }
            NRGAG => nr_gag = Some(parse_count(line, nr_gag.is_some())?),
            NRPDS => nr_pds = Some(parse_count(line, nr_pds.is_some())?),
            COORD => coords.push(parse_coord(line)?),
            _ => {
                let expected = nr_gag.ok_or_else(|| at(line, "value row before NRGAG"))?;
                rows.push(parse_value_row(line, expected)?);
            }
        }
    }

    let start = chunk.start_line();
    let description =
        description.ok_or_else(|| Error::format_at("", start, "missing EVENT line"))?;
    let nr_gag = nr_gag.ok_or_else(|| Error::format_at("", start, "missing NRGAG"))?;
    let nr_pds = nr_pds.ok_or_else(|| Error::format_at("", start, "missing NRPDS"))?;

    if coords.len() != nr_gag {
        return Err(Error::format_at(
            "",
            start,
            format!(
                "event '{}' declares NRGAG {} but has {} COORD lines",
                description,
                nr_gag,
                coords.len()
            ),
        ));
    }

    if nr_gag == 0 && !rows.is_empty() {
        return Err(Error::format_at(
            "",
            start,
            format!("event '{}' has value rows but no gages", description),
        ));
    }

    let record = EventRecord {
        description,
        nr_gag,
        nr_pds,
        coords,
        rows,
    };

    if config.strict_period_count && record.nr_gag > 0 {
        let periods = record.distinct_timestamps();
        if periods != record.nr_pds {
            return Err(Error::format_at(
                "",
                start,
                format!(
                    "event '{}' declares NRPDS {} but has {} distinct timestamps",
                    record.description, record.nr_pds, periods
                ),
            ));
        }
    }

    debug!(
        "Parsed event '{}': {} gages, {} rows",
        record.description,
        record.nr_gag,
        record.rows.len()
    );
    Ok(record)
}

/// Register an event and its gages and values under a precipitation file
///
/// Values are zipped with gages by column index; the gage position is stored
/// explicitly so output column order never depends on id order.
pub fn build_event(
    uow: &mut UnitOfWork<'_>,
    precip_file: PrecipFileId,
    record: &EventRecord,
) -> Result<EventId> {
    let event_id: EventId = uow.allocate();

    let gage_ids: Vec<GageId> = record
        .coords
        .iter()
        .enumerate()
        .map(|(position, coord)| {
            let id = uow.allocate();
            uow.add(Gage {
                id,
                event: event_id,
                position,
                description: coord.description.clone(),
                x: coord.x,
                y: coord.y,
            });
            id
        })
        .collect();

    let mut value_ids = Vec::with_capacity(record.rows.len() * gage_ids.len());
    for row in &record.rows {
        for (gage, value) in gage_ids.iter().zip(&row.values) {
            let id = uow.allocate();
            uow.add(PrecipValue {
                id,
                event: event_id,
                gage: *gage,
                value_type: row.value_type.clone(),
                date_time: row.date_time,
                value: *value,
            });
            value_ids.push(id);
        }
    }

    uow.add(Event {
        id: event_id,
        precip_file,
        description: record.description.clone(),
        nr_gag: record.nr_gag,
        nr_pds: record.nr_pds,
        gage_ids,
        value_ids,
    });
    uow.update::<PrecipFile, _>(precip_file, |file| file.event_ids.push(event_id))?;

    Ok(event_id)
}

fn at(line: &ChunkLine, message: impl Into<String>) -> Error {
    Error::format_at("", line.number, message)
}

/// Description words joined with single spaces
///
/// Descriptions are written back inside double quotes, so a stray quote
/// left in a token would not read back the same.
fn parse_description(line: &ChunkLine, words: &[String]) -> Result<String> {
    if words.iter().any(|w| w.contains('"')) {
        return Err(at(
            line,
            format!("embedded double quote in description '{}'", line.raw.trim()),
        ));
    }
    Ok(words.join(" "))
}

fn parse_count(line: &ChunkLine, seen: bool) -> Result<usize> {
    let keyword = &line.tokens[0];
    if seen {
        return Err(at(line, format!("duplicate {}", keyword)));
    }

    match line.tokens.as_slice() {
        [_, raw] => raw.parse::<usize>().map_err(|_| {
            at(
                line,
                format!("{} must be a non-negative integer, got '{}'", keyword, raw),
            )
        }),
        [_] => Err(at(line, format!("{} has no value", keyword))),
        _ => Err(at(line, format!("{} takes exactly one value", keyword))),
    }
}

fn parse_coord(line: &ChunkLine) -> Result<CoordRecord> {
    if line.tokens.len() < 3 {
        return Err(at(line, "COORD needs x and y"));
    }
    let x = parse_float(line, &line.tokens[1], "COORD x")?;
    let y = parse_float(line, &line.tokens[2], "COORD y")?;
    Ok(CoordRecord {
        x,
        y,
        description: parse_description(line, &line.tokens[3..])?,
    })
}

fn parse_value_row(line: &ChunkLine, expected: usize) -> Result<ValueRow> {
    let fields = &line.tokens;
    if fields.len() < 1 + TIMESTAMP_FIELDS {
        return Err(at(
            line,
            format!("value row '{}' is missing timestamp fields", line.raw.trim()),
        ));
    }

    let date_time = parse_timestamp(line, &fields[1..=TIMESTAMP_FIELDS])?;
    let values = fields[1 + TIMESTAMP_FIELDS..]
        .iter()
        .map(|raw| parse_float(line, raw, "value"))
        .collect::<Result<Vec<f64>>>()?;

    if values.len() != expected {
        return Err(at(
            line,
            format!(
                "{} row has {} values but NRGAG is {}",
                fields[0],
                values.len(),
                expected
            ),
        ));
    }

    Ok(ValueRow {
        value_type: fields[0].clone(),
        date_time,
        values,
    })
}

fn parse_timestamp(line: &ChunkLine, fields: &[String]) -> Result<NaiveDateTime> {
    let numbers = fields
        .iter()
        .map(|f| {
            f.parse::<u32>()
                .map_err(|_| at(line, format!("invalid timestamp field '{}'", f)))
        })
        .collect::<Result<Vec<u32>>>()?;

    let [year, month, day, hour, minute] = numbers[..] else {
        return Err(at(line, "timestamp needs year, month, day, hour and minute"));
    };

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, month, day))
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .ok_or_else(|| {
            at(
                line,
                format!(
                    "invalid timestamp {:04} {:02} {:02} {:02} {:02}",
                    year, month, day, hour, minute
                ),
            )
        })
}

fn parse_float(line: &ChunkLine, raw: &str, what: &str) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| at(line, format!("{} '{}' is not a number", what, raw)))
}
