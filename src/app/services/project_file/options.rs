//! Project option editing
//!
//! A project holds at most one option per card. Setting a card that is
//! already present replaces its value in place; a new card is appended.

use super::resolve_path;
use crate::app::models::{Card, OptionId, ProjectFile, ProjectFileId, ProjectOption};
use crate::app::services::card_registry::lookup_card;
use crate::app::services::grid::{Grid, GridProvider, Pixel};
use crate::app::store::{EntityStore, UnitOfWork};
use crate::{Error, Result};
use tracing::debug;

/// Set a card's value on a project
///
/// With `add_quotes` the stored value is wrapped in double quotes, as GSSHA
/// expects for file names. An unregistered card name fails before anything
/// is staged.
pub fn set_option(
    uow: &mut UnitOfWork<'_>,
    project: ProjectFileId,
    name: &str,
    value: &str,
    add_quotes: bool,
) -> Result<OptionId> {
    let card = lookup_card(name)?;
    let value = if add_quotes {
        format!("\"{}\"", value)
    } else {
        value.to_string()
    };
    put_option(uow, project, card, value)
}

pub(crate) fn put_option(
    uow: &mut UnitOfWork<'_>,
    project: ProjectFileId,
    card: &'static Card,
    value: String,
) -> Result<OptionId> {
    let existing = find_option(uow, project, card.name)?.map(|o| o.id);

    if let Some(id) = existing {
        uow.update::<ProjectOption, _>(id, |option| option.value = value)?;
        debug!("Replaced {} on {}", card.name, project);
        return Ok(id);
    }

    let id = uow.allocate();
    uow.add(ProjectOption {
        id,
        project,
        card,
        value,
    });
    uow.update::<ProjectFile, _>(project, |p| p.option_ids.push(id))?;
    Ok(id)
}

/// Stored value of a card, if the project sets it
pub fn get_option<'s, S: EntityStore>(
    store: &'s S,
    project: ProjectFileId,
    name: &str,
) -> Result<Option<&'s str>> {
    let card = lookup_card(name)?;
    Ok(find_option(store, project, card.name)?.map(|o| o.value.as_str()))
}

/// Remove a card from a project, keeping the order of the rest
///
/// Returns whether the card was present.
pub fn remove_option(uow: &mut UnitOfWork<'_>, project: ProjectFileId, name: &str) -> Result<bool> {
    let card = lookup_card(name)?;
    let Some(id) = find_option(uow, project, card.name)?.map(|o| o.id) else {
        return Ok(false);
    };

    uow.update::<ProjectFile, _>(project, |p| p.option_ids.retain(|o| *o != id))?;
    uow.remove::<ProjectOption>(id);
    Ok(true)
}

fn find_option<'s, S: EntityStore>(
    store: &'s S,
    project: ProjectFileId,
    card_name: &str,
) -> Result<Option<&'s ProjectOption>> {
    Ok(store
        .options_of(project)?
        .into_iter()
        .find(|o| o.card.name == card_name))
}

/// Point the outlet cards at the cell containing (`x`, `y`)
///
/// `OUTROW` and `OUTCOL` are 1-based.
pub fn set_outlet<G: Grid>(
    uow: &mut UnitOfWork<'_>,
    project: ProjectFileId,
    grid: &G,
    x: f64,
    y: f64,
    outslope: f64,
) -> Result<Pixel> {
    let pixel = grid.coord_to_pixel(x, y)?;

    set_option(uow, project, "OUTROW", &(pixel.row + 1).to_string(), false)?;
    set_option(uow, project, "OUTCOL", &(pixel.col + 1).to_string(), false)?;
    set_option(uow, project, "OUTSLOPE", &outslope.to_string(), false)?;

    debug!("Outlet at row {} col {}", pixel.row + 1, pixel.col + 1);
    Ok(pixel)
}

/// Open the elevation raster a project references
pub fn project_grid<S: EntityStore, P: GridProvider>(
    store: &S,
    project: ProjectFileId,
    provider: &P,
) -> Result<P::Grid> {
    let value = get_option(store, project, "ELEVATION")?
        .ok_or_else(|| Error::grid(format!("{} has no ELEVATION card", project)))?;
    let path = resolve_path(store.require::<ProjectFile>(project)?, value);
    provider.open(&path)
}
