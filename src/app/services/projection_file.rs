//! Projection (`.pro`) file
//!
//! The file holds one spatial reference in Well-Known Text. Its contents are
//! opaque here: read verbatim, stored, and written back byte for byte.

use crate::app::context::{ReadContext, WriteContext};
use crate::app::models::{ProjectionFile, ProjectionFileId};
use crate::app::services::file_io::{read_text, write_text};
use crate::app::store::EntityStore;
use crate::constants::PROJECTION_NAME_SUFFIX;
use crate::Result;
use std::path::Path;
use tracing::info;

/// Register projection text with the unit of work
pub fn read_projection_text(ctx: &mut ReadContext<'_, '_>, text: &str) -> ProjectionFileId {
    let id = ctx.uow.allocate();
    ctx.uow.add(ProjectionFile {
        id,
        projection: text.to_string(),
    });
    id
}

pub fn read_projection_file(ctx: &mut ReadContext<'_, '_>, path: &Path) -> Result<ProjectionFileId> {
    info!("Reading projection file {}", path.display());
    let text = read_text(path)?;
    Ok(read_projection_text(ctx, &text))
}

pub fn write_projection_file<S: EntityStore>(
    ctx: WriteContext<'_, S>,
    id: ProjectionFileId,
    path: &Path,
) -> Result<()> {
    let file = ctx.store.require::<ProjectionFile>(id)?;
    info!("Writing projection file {}", path.display());
    write_text(path, &file.projection, ctx.config.io.atomic_writes)
}

/// File stem for a projection file written under project `name`
///
/// Projection file names always carry the `_prj` suffix.
pub fn projection_stem(name: &str) -> String {
    if name.contains(PROJECTION_NAME_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, PROJECTION_NAME_SUFFIX)
    }
}
