//! Mapping table (`.cmt`) file
//!
//! Index maps and parameter tables are carried through unchanged; only the
//! project's reference to the file is modelled.

use crate::app::context::{ReadContext, WriteContext};
use crate::app::models::{MapTableFile, MapTableFileId};
use crate::app::services::file_io::{read_text, write_text};
use crate::app::store::EntityStore;
use crate::Result;
use std::path::Path;
use tracing::info;

pub fn read_map_table_file(ctx: &mut ReadContext<'_, '_>, path: &Path) -> Result<MapTableFileId> {
    info!("Reading mapping table file {}", path.display());
    let contents = read_text(path)?;
    let id = ctx.uow.allocate();
    ctx.uow.add(MapTableFile { id, contents });
    Ok(id)
}

pub fn write_map_table_file<S: EntityStore>(
    ctx: WriteContext<'_, S>,
    id: MapTableFileId,
    path: &Path,
) -> Result<()> {
    let file = ctx.store.require::<MapTableFile>(id)?;
    info!("Writing mapping table file {}", path.display());
    write_text(path, &file.contents, ctx.config.io.atomic_writes)
}
