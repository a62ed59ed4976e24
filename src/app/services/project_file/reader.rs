//! Project file reader

use super::SubFileKind;
use super::options::put_option;
use super::resolve_path;
use crate::app::context::ReadContext;
use crate::app::models::{ProjectFile, ProjectFileId};
use crate::app::services::card_registry::lookup_card;
use crate::app::services::file_io::{file_label, read_text};
use crate::app::services::map_table_file::read_map_table_file;
use crate::app::services::precip_file::read_precip_file;
use crate::app::services::projection_file::read_projection_file;
use crate::app::store::EntityStore;
use crate::constants::PROJECT_HEADER;
use crate::{Error, Result};
use std::path::Path;
use tracing::{debug, info};

/// Read a project file and every sub-file it references
///
/// Sub-file paths resolve against the project file's directory. Everything
/// is staged on `ctx.uow`; the caller decides whether to commit.
pub fn read_project_file(ctx: &mut ReadContext<'_, '_>, path: &Path) -> Result<ProjectFileId> {
    info!("Reading project file {}", path.display());
    let text = read_text(path)?;
    let name = path.file_stem().map(|s| s.to_string_lossy().to_string());
    let directory = path.parent().unwrap_or_else(|| Path::new(""));

    read_project_text(ctx, &text, name.as_deref(), Some(directory))
        .map_err(|e| e.in_file(file_label(path)))
}

/// Read project text
///
/// Sub-files are only followed when `directory` is given; without it the
/// PATH options are kept as plain values.
pub fn read_project_text(
    ctx: &mut ReadContext<'_, '_>,
    text: &str,
    name: Option<&str>,
    directory: Option<&Path>,
) -> Result<ProjectFileId> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line))
        .filter(|(_, line)| !line.trim().is_empty());

    match lines.next() {
        Some((_, line)) if line.trim() == PROJECT_HEADER => {}
        Some((number, line)) => {
            return Err(Error::format_at(
                "",
                number,
                format!("expected {} header, found '{}'", PROJECT_HEADER, line.trim()),
            ));
        }
        None => return Err(Error::format("", format!("missing {} header", PROJECT_HEADER))),
    }

    let id: ProjectFileId = ctx.uow.allocate();
    let mut project = ProjectFile::new(id, name.map(str::to_string));
    project.directory = directory.map(Path::to_path_buf);
    ctx.uow.add(project);

    for (_, line) in lines {
        let (card_name, value) = split_option_line(line);
        let card = lookup_card(card_name)?;
        put_option(ctx.uow, id, card, value.to_string())?;
    }

    if directory.is_some() {
        read_sub_files(ctx, id)?;
    }

    debug!(
        "Staged project {} with {} options",
        name.unwrap_or("<unnamed>"),
        ctx.uow.require::<ProjectFile>(id)?.option_ids.len()
    );
    Ok(id)
}

/// Card name and raw value (quotes kept) of an option line
fn split_option_line(line: &str) -> (&str, &str) {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((card, value)) => (card, value.trim()),
        None => (trimmed, ""),
    }
}

fn read_sub_files(ctx: &mut ReadContext<'_, '_>, id: ProjectFileId) -> Result<()> {
    let project = ctx.uow.require::<ProjectFile>(id)?.clone();
    let references: Vec<(SubFileKind, String)> = ctx
        .uow
        .options_of(id)?
        .into_iter()
        .filter(|option| option.card.is_path())
        .filter_map(|option| match SubFileKind::for_card(option.card.name) {
            Some(kind) => Some((kind, option.value.clone())),
            None => {
                debug!("Not reading {} ({})", option.card.name, option.value);
                None
            }
        })
        .collect();

    for (kind, value) in references {
        let path = resolve_path(&project, &value);
        match kind {
            SubFileKind::Precipitation => {
                let file = read_precip_file(ctx, &path)?;
                ctx.uow
                    .update::<ProjectFile, _>(id, |p| p.precip_file = Some(file))?;
            }
            SubFileKind::Projection => {
                let file = read_projection_file(ctx, &path)?;
                ctx.uow
                    .update::<ProjectFile, _>(id, |p| p.projection_file = Some(file))?;
            }
            SubFileKind::MapTable => {
                let file = read_map_table_file(ctx, &path)?;
                ctx.uow
                    .update::<ProjectFile, _>(id, |p| p.map_table_file = Some(file))?;
            }
        }
    }

    Ok(())
}
