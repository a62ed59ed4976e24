//! Context objects threaded through every read and write call
//!
//! Readers receive the open unit of work they register entities with;
//! writers receive a read-only store to query. Both carry the active
//! configuration so no reader or writer depends on global state.

use crate::app::store::{EntityStore, UnitOfWork};
use crate::config::Config;

/// Context for reading files into a unit of work
pub struct ReadContext<'a, 'db> {
    pub uow: &'a mut UnitOfWork<'db>,
    pub config: &'a Config,
}

impl<'a, 'db> ReadContext<'a, 'db> {
    pub fn new(uow: &'a mut UnitOfWork<'db>, config: &'a Config) -> Self {
        Self { uow, config }
    }
}

/// Context for rendering and writing stored entities
pub struct WriteContext<'a, S: EntityStore> {
    pub store: &'a S,
    pub config: &'a Config,
}

impl<'a, S: EntityStore> WriteContext<'a, S> {
    pub fn new(store: &'a S, config: &'a Config) -> Self {
        Self { store, config }
    }
}

impl<S: EntityStore> Clone for WriteContext<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: EntityStore> Copy for WriteContext<'_, S> {}
