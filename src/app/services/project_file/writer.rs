//! Project file writer

use super::SubFileKind;
use crate::app::context::WriteContext;
use crate::app::models::{ProjectFile, ProjectFileId, render_option_line};
use crate::app::services::file_io::write_text;
use crate::app::services::map_table_file::write_map_table_file;
use crate::app::services::precip_file::render_precip_file;
use crate::app::services::projection_file::write_projection_file;
use crate::app::store::EntityStore;
use crate::constants::{PROJECT_HEADER, extensions};
use crate::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Paths produced by [`write_project`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WrittenFiles {
    pub project: PathBuf,
    pub sub_files: Vec<PathBuf>,
}

/// Render the project file text
///
/// With `rename` set, PATH options naming an owned sub-file point at that
/// sub-file's new name instead of the stored value. Stored options are not
/// modified.
pub fn render_project<S: EntityStore>(
    ctx: WriteContext<'_, S>,
    id: ProjectFileId,
    rename: Option<&str>,
) -> Result<String> {
    let project = ctx.store.require::<ProjectFile>(id)?;
    let width = ctx.config.io.option_field_width;

    let mut out = format!("{}\n", PROJECT_HEADER);
    for option in ctx.store.options_of(id)? {
        let renamed = rename.and_then(|name| {
            SubFileKind::for_card(option.card.name)
                .filter(|kind| kind.is_owned_by(project))
                .map(|kind| format!("\"{}\"", kind.file_name(name)))
        });
        let value = renamed.as_deref().unwrap_or(&option.value);
        out.push_str(&render_option_line(option.card, value, width));
    }
    Ok(out)
}

/// Write `<name>.prj` and every owned sub-file into `directory`
///
/// The project and precipitation text are rendered before anything is
/// written, so a pivot failure leaves no files behind.
pub fn write_project<S: EntityStore>(
    ctx: WriteContext<'_, S>,
    id: ProjectFileId,
    directory: &Path,
    name: &str,
) -> Result<WrittenFiles> {
    let project = ctx.store.require::<ProjectFile>(id)?;
    let atomic = ctx.config.io.atomic_writes;

    let project_text = render_project(ctx, id, Some(name))?;
    let precip = project
        .precip_file
        .map(|file| render_precip_file(ctx, file))
        .transpose()?;

    let project_path = directory.join(format!("{}.{}", name, extensions::PROJECT));
    info!("Writing project file {}", project_path.display());
    write_text(&project_path, &project_text, atomic)?;

    let mut written = WrittenFiles {
        project: project_path,
        sub_files: Vec::new(),
    };

    if let Some(text) = precip {
        let path = directory.join(SubFileKind::Precipitation.file_name(name));
        info!("Writing precipitation file {}", path.display());
        write_text(&path, &text, atomic)?;
        written.sub_files.push(path);
    }

    if let Some(file) = project.projection_file {
        let path = directory.join(SubFileKind::Projection.file_name(name));
        write_projection_file(ctx, file, &path)?;
        written.sub_files.push(path);
    }

    if let Some(file) = project.map_table_file {
        let path = directory.join(SubFileKind::MapTable.file_name(name));
        write_map_table_file(ctx, file, &path)?;
        written.sub_files.push(path);
    }

    Ok(written)
}
