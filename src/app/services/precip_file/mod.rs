//! Precipitation (`.gag`) file reader and writer
//!
//! Reading splits the text into `EVENT` chunks, parses every chunk into an
//! [`EventRecord`], and only then registers entities with the unit of work.
//! Writing queries the store and renders each event through the pivot.
//!
//! ## Usage
//!
//! ```rust
//! use gssha_io::app::services::precip_file::{read_precip_text, render_precip_file};
//! use gssha_io::{Config, Database, ReadContext, WriteContext};
//!
//! let text = "EVENT \"Storm1\"\nNRGAG 1\nNRPDS 1\nCOORD 1.0 2.0 \"A\"\nGAGES 2017 02 28 14 33 0.50\n";
//! let config = Config::default();
//! let mut db = Database::new();
//! let mut uow = db.begin();
//! let id = read_precip_text(&mut ReadContext::new(&mut uow, &config), text, Some("storm.gag")).unwrap();
//! uow.commit().unwrap();
//!
//! let rendered = render_precip_file(WriteContext::new(&db, &config), id).unwrap();
//! assert_eq!(rendered, text);
//! ```

pub mod event_builder;
pub mod pivot;
pub mod render;

#[cfg(test)]
pub mod tests;

use crate::app::context::{ReadContext, WriteContext};
use crate::app::models::{Event, EventId, Gage, PrecipFile, PrecipFileId, PrecipValue};
use crate::app::services::chunk_parser::{Chunk, chunk};
use crate::app::services::file_io::{file_label, read_text, write_text};
use crate::app::store::{EntityStore, UnitOfWork};
use crate::config::ReadConfig;
use crate::constants::precip_keywords::{CHUNK_KEYWORDS, EVENT};
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

pub use event_builder::{CoordRecord, EventRecord, ValueRow, build_event, parse_event_chunk};
pub use pivot::{PivotRow, PivotTable, ValueRecord, pivot, unpivot};
pub use render::{render_event, render_timestamp};

/// Chunk kinds a precipitation file can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkKind {
    Event,
}

impl ChunkKind {
    fn from_keyword(keyword: &str) -> Result<Self> {
        match keyword {
            EVENT => Ok(ChunkKind::Event),
            other => Err(Error::format(
                "",
                format!("no precipitation reader for keyword '{}'", other),
            )),
        }
    }
}

/// Parse precipitation text and register its entities
///
/// All chunks are parsed before any entity is added, so a format error
/// leaves the unit of work untouched.
pub fn read_precip_text(
    ctx: &mut ReadContext<'_, '_>,
    text: &str,
    file_name: Option<&str>,
) -> Result<PrecipFileId> {
    let label = file_name.unwrap_or("<precipitation>");
    let config = ctx.config;

    let records = chunk(text, CHUNK_KEYWORDS)
        .and_then(|chunks| {
            chunks
                .iter()
                .map(|c| parse_chunk(c, &config.read))
                .collect::<Result<Vec<EventRecord>>>()
        })
        .map_err(|e| e.in_file(label))?;

    let file_id: PrecipFileId = ctx.uow.allocate();
    ctx.uow.add(PrecipFile {
        id: file_id,
        file_name: file_name.map(str::to_string),
        event_ids: Vec::new(),
    });

    for record in &records {
        build_event(ctx.uow, file_id, record)?;
    }

    debug!("Registered {} events from {}", records.len(), label);
    Ok(file_id)
}

fn parse_chunk(chunk: &Chunk, config: &ReadConfig) -> Result<EventRecord> {
    match ChunkKind::from_keyword(&chunk.keyword)? {
        ChunkKind::Event => parse_event_chunk(chunk, config),
    }
}

/// Read a precipitation file from disk
pub fn read_precip_file(ctx: &mut ReadContext<'_, '_>, path: &Path) -> Result<PrecipFileId> {
    info!("Reading precipitation file {}", path.display());
    let text = read_text(path)?;
    read_precip_text(ctx, &text, Some(&file_label(path)))
}

/// Render a stored precipitation file
pub fn render_precip_file<S: EntityStore>(ctx: WriteContext<'_, S>, id: PrecipFileId) -> Result<String> {
    let file = ctx.store.require::<PrecipFile>(id)?;
    render::render_events(ctx.store, &file.event_ids, ctx.config.io.value_decimals)
}

/// Render and write a stored precipitation file
///
/// Rendering completes before the file is opened, so a pivot error never
/// leaves a partial file behind.
pub fn write_precip_file<S: EntityStore>(
    ctx: WriteContext<'_, S>,
    id: PrecipFileId,
    path: &Path,
) -> Result<()> {
    let text = render_precip_file(ctx, id)?;
    info!("Writing precipitation file {}", path.display());
    write_text(path, &text, ctx.config.io.atomic_writes)
}

/// Remove an event together with its gages and values
pub fn delete_event(uow: &mut UnitOfWork<'_>, event_id: EventId) -> Result<()> {
    let event = uow.require::<Event>(event_id)?.clone();

    for value in &event.value_ids {
        uow.remove::<PrecipValue>(*value);
    }
    for gage in &event.gage_ids {
        uow.remove::<Gage>(*gage);
    }
    uow.update::<PrecipFile, _>(event.precip_file, |file| {
        file.event_ids.retain(|id| *id != event_id)
    })?;
    uow.remove::<Event>(event_id);

    debug!(
        "Deleted event '{}' with {} gages and {} values",
        event.description,
        event.gage_ids.len(),
        event.value_ids.len()
    );
    Ok(())
}

/// Remove a precipitation file and every event it owns
pub fn delete_precip_file(uow: &mut UnitOfWork<'_>, id: PrecipFileId) -> Result<()> {
    let events = uow.require::<PrecipFile>(id)?.event_ids.clone();
    for event in events {
        delete_event(uow, event)?;
    }
    uow.remove::<PrecipFile>(id);
    Ok(())
}
