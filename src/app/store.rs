//! Entity store and unit of work
//!
//! The store is an id-keyed arena: one ordered table per entity kind, all
//! sharing a single id counter. Reads go through the [`EntityStore`] trait so
//! readers and writers work the same against committed data or an open unit
//! of work.
//!
//! A [`UnitOfWork`] stages additions, updates and removals on top of the
//! committed tables. Nothing becomes visible in the [`Database`] until
//! [`UnitOfWork::commit`] succeeds; dropping it discards the staged work.

use crate::app::models::{
    EntityId, Event, EventId, Gage, GageId, MapTableFile, MapTableFileId, OptionId, PrecipFile,
    PrecipFileId, PrecipValue, ProjectFile, ProjectFileId, ProjectOption, ProjectionFile,
    ProjectionFileId, ValueId,
};
use crate::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Entity tables keyed by id
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub project_files: BTreeMap<ProjectFileId, ProjectFile>,
    pub options: BTreeMap<OptionId, ProjectOption>,
    pub precip_files: BTreeMap<PrecipFileId, PrecipFile>,
    pub events: BTreeMap<EventId, Event>,
    pub gages: BTreeMap<GageId, Gage>,
    pub values: BTreeMap<ValueId, PrecipValue>,
    pub projection_files: BTreeMap<ProjectionFileId, ProjectionFile>,
    pub map_table_files: BTreeMap<MapTableFileId, MapTableFile>,
}

impl Tables {
    fn is_empty(&self) -> bool {
        self.entity_count() == 0
    }

    /// Total number of entities across all tables
    pub fn entity_count(&self) -> usize {
        self.project_files.len()
            + self.options.len()
            + self.precip_files.len()
            + self.events.len()
            + self.gages.len()
            + self.values.len()
            + self.projection_files.len()
            + self.map_table_files.len()
    }
}

/// An entity kind stored in its own table
pub trait Record: Clone {
    type Id: EntityId;

    /// Human-readable kind name for error messages
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
    fn table(tables: &Tables) -> &BTreeMap<Self::Id, Self>;
    fn table_mut(tables: &mut Tables) -> &mut BTreeMap<Self::Id, Self>;
}

macro_rules! record {
    ($ty:ty, $id:ty, $field:ident, $kind:literal) => {
        impl Record for $ty {
            type Id = $id;
            const KIND: &'static str = $kind;

            fn id(&self) -> Self::Id {
                self.id
            }

            fn table(tables: &Tables) -> &BTreeMap<Self::Id, Self> {
                &tables.$field
            }

            fn table_mut(tables: &mut Tables) -> &mut BTreeMap<Self::Id, Self> {
                &mut tables.$field
            }
        }
    };
}

record!(ProjectFile, ProjectFileId, project_files, "project file");
record!(ProjectOption, OptionId, options, "project option");
record!(PrecipFile, PrecipFileId, precip_files, "precipitation file");
record!(Event, EventId, events, "event");
record!(Gage, GageId, gages, "gage");
record!(PrecipValue, ValueId, values, "value");
record!(ProjectionFile, ProjectionFileId, projection_files, "projection file");
record!(MapTableFile, MapTableFileId, map_table_files, "map table file");

/// Read access to stored entities and their relationships
pub trait EntityStore {
    /// Look up an entity by id
    fn get<R: Record>(&self, id: R::Id) -> Option<&R>;

    /// All entities of one kind in ascending id order
    fn all<R: Record>(&self) -> Vec<&R>;

    /// Look up an entity that must exist
    fn require<R: Record>(&self, id: R::Id) -> Result<&R> {
        self.get::<R>(id)
            .ok_or_else(|| Error::persistence(format!("{} {:?} not found", R::KIND, id)))
    }

    /// Options of a project in the project's option order
    fn options_of(&self, project: ProjectFileId) -> Result<Vec<&ProjectOption>> {
        let project = self.require::<ProjectFile>(project)?;
        project
            .option_ids
            .iter()
            .map(|id| self.require::<ProjectOption>(*id))
            .collect()
    }

    /// Events of a precipitation file in file order
    fn events_of(&self, precip_file: PrecipFileId) -> Result<Vec<&Event>> {
        let file = self.require::<PrecipFile>(precip_file)?;
        file.event_ids
            .iter()
            .map(|id| self.require::<Event>(*id))
            .collect()
    }

    /// Gages of an event ordered by column position
    fn gages_of(&self, event: EventId) -> Result<Vec<&Gage>> {
        let event = self.require::<Event>(event)?;
        let mut gages = event
            .gage_ids
            .iter()
            .map(|id| self.require::<Gage>(*id))
            .collect::<Result<Vec<_>>>()?;
        gages.sort_by_key(|g| g.position);
        Ok(gages)
    }

    /// Values of an event in stored order
    fn values_of(&self, event: EventId) -> Result<Vec<&PrecipValue>> {
        let event = self.require::<Event>(event)?;
        event
            .value_ids
            .iter()
            .map(|id| self.require::<PrecipValue>(*id))
            .collect()
    }
}

// =============================================================================
// Database
// =============================================================================

/// Committed entity store
#[derive(Debug, Default)]
pub struct Database {
    tables: Tables,
    next_id: u64,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a unit of work against this database
    pub fn begin(&mut self) -> UnitOfWork<'_> {
        let next_id = self.next_id;
        UnitOfWork {
            db: self,
            pending: Tables::default(),
            removed: BTreeSet::new(),
            next_id,
            finished: false,
        }
    }

    /// Total number of committed entities
    pub fn entity_count(&self) -> usize {
        self.tables.entity_count()
    }
}

impl EntityStore for Database {
    fn get<R: Record>(&self, id: R::Id) -> Option<&R> {
        R::table(&self.tables).get(&id)
    }

    fn all<R: Record>(&self) -> Vec<&R> {
        R::table(&self.tables).values().collect()
    }
}

// =============================================================================
// Unit of Work
// =============================================================================

/// Summary of a successful commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitStats {
    pub written: usize,
    pub removed: usize,
}

/// Staged changes over a [`Database`], applied atomically on commit
#[derive(Debug)]
pub struct UnitOfWork<'db> {
    db: &'db mut Database,
    pending: Tables,
    removed: BTreeSet<u64>,
    next_id: u64,
    finished: bool,
}

impl UnitOfWork<'_> {
    /// Allocate a fresh id
    pub fn allocate<I: EntityId>(&mut self) -> I {
        let id = I::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    /// Stage an entity for insertion, replacing any staged copy
    pub fn add<R: Record>(&mut self, record: R) {
        let id = record.id();
        self.removed.remove(&id.raw());
        R::table_mut(&mut self.pending).insert(id, record);
    }

    /// Stage a modification of an existing entity
    pub fn update<R: Record, F>(&mut self, id: R::Id, f: F) -> Result<()>
    where
        F: FnOnce(&mut R),
    {
        if !R::table(&self.pending).contains_key(&id) {
            let current = self.require::<R>(id)?.clone();
            R::table_mut(&mut self.pending).insert(id, current);
        }

        let record = R::table_mut(&mut self.pending)
            .get_mut(&id)
            .ok_or_else(|| Error::persistence(format!("{} {:?} not staged", R::KIND, id)))?;
        f(record);
        Ok(())
    }

    /// Stage removal of an entity
    pub fn remove<R: Record>(&mut self, id: R::Id) {
        R::table_mut(&mut self.pending).remove(&id);
        self.removed.insert(id.raw());
    }

    /// Number of staged entities
    pub fn pending_count(&self) -> usize {
        self.pending.entity_count()
    }

    /// Check references in the merged view, then apply all staged changes
    pub fn commit(mut self) -> Result<CommitStats> {
        self.check_references()?;

        let pending = std::mem::take(&mut self.pending);
        let removed = std::mem::take(&mut self.removed);
        let stats = CommitStats {
            written: pending.entity_count(),
            removed: removed.len(),
        };

        let tables = &mut self.db.tables;
        merge(&mut tables.project_files, pending.project_files, &removed);
        merge(&mut tables.options, pending.options, &removed);
        merge(&mut tables.precip_files, pending.precip_files, &removed);
        merge(&mut tables.events, pending.events, &removed);
        merge(&mut tables.gages, pending.gages, &removed);
        merge(&mut tables.values, pending.values, &removed);
        merge(&mut tables.projection_files, pending.projection_files, &removed);
        merge(&mut tables.map_table_files, pending.map_table_files, &removed);

        self.db.next_id = self.next_id;
        self.finished = true;

        debug!(
            "Committed unit of work: {} written, {} removed",
            stats.written, stats.removed
        );
        Ok(stats)
    }

    /// Discard all staged changes
    pub fn rollback(mut self) {
        debug!(
            "Rolled back unit of work with {} staged entities",
            self.pending.entity_count()
        );
        self.finished = true;
    }

    fn check_references(&self) -> Result<()> {
        for project in self.pending.project_files.values() {
            for option in &project.option_ids {
                self.require::<ProjectOption>(*option)?;
            }
            if let Some(id) = project.precip_file {
                self.require::<PrecipFile>(id)?;
            }
            if let Some(id) = project.projection_file {
                self.require::<ProjectionFile>(id)?;
            }
            if let Some(id) = project.map_table_file {
                self.require::<MapTableFile>(id)?;
            }
        }

        for option in self.pending.options.values() {
            self.require::<ProjectFile>(option.project)?;
        }

        for event in self.pending.events.values() {
            self.require::<PrecipFile>(event.precip_file)?;
            for gage in &event.gage_ids {
                self.require::<Gage>(*gage)?;
            }
        }

        for gage in self.pending.gages.values() {
            self.require::<Event>(gage.event)?;
        }

        for value in self.pending.values.values() {
            self.require::<Event>(value.event)?;
            let gage = self.require::<Gage>(value.gage)?;
            if gage.event != value.event {
                return Err(Error::persistence(format!(
                    "value {:?} links gage {:?} of a different event",
                    value.id, gage.id
                )));
            }
        }

        Ok(())
    }
}

fn merge<I: EntityId, R>(committed: &mut BTreeMap<I, R>, staged: BTreeMap<I, R>, removed: &BTreeSet<u64>) {
    committed.retain(|id, _| !removed.contains(&id.raw()));
    committed.extend(staged);
}

impl EntityStore for UnitOfWork<'_> {
    fn get<R: Record>(&self, id: R::Id) -> Option<&R> {
        if self.removed.contains(&id.raw()) {
            return None;
        }
        R::table(&self.pending)
            .get(&id)
            .or_else(|| R::table(&self.db.tables).get(&id))
    }

    fn all<R: Record>(&self) -> Vec<&R> {
        let mut merged: BTreeMap<R::Id, &R> = R::table(&self.db.tables)
            .iter()
            .filter(|(id, _)| !self.removed.contains(&id.raw()))
            .map(|(id, record)| (*id, record))
            .collect();
        merged.extend(R::table(&self.pending).iter().map(|(id, r)| (*id, r)));
        merged.into_values().collect()
    }
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if !self.finished && (!self.pending.is_empty() || !self.removed.is_empty()) {
            warn!(
                "Unit of work dropped without commit; discarding {} staged entities",
                self.pending.entity_count()
            );
        }
    }
}
