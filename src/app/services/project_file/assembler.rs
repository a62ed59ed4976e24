//! Project assembler state machine
//!
//! ```text
//! Unloaded -> Reading -> Loaded -> Writing -> Written
//! ```
//!
//! A load runs inside one unit of work: the project file and every cascaded
//! sub-file read either commit together or not at all. A failed load returns
//! to `Unloaded`; a failed write returns to `Loaded`.

use super::options;
use super::reader::read_project_file;
use super::writer::{WrittenFiles, write_project};
use crate::app::context::{ReadContext, WriteContext};
use crate::app::models::{OptionId, ProjectFileId};
use crate::app::store::{Database, UnitOfWork};
use crate::config::Config;
use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Lifecycle state of a [`ProjectAssembler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblerState {
    Unloaded,
    Reading,
    Loaded,
    Writing,
    Written,
}

impl fmt::Display for AssemblerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssemblerState::Unloaded => "unloaded",
            AssemblerState::Reading => "reading",
            AssemblerState::Loaded => "loaded",
            AssemblerState::Writing => "writing",
            AssemblerState::Written => "written",
        };
        f.write_str(name)
    }
}

/// Owns the store a project is loaded into and sequences reads and writes
#[derive(Debug)]
pub struct ProjectAssembler {
    config: Config,
    db: Database,
    state: AssemblerState,
    project: Option<ProjectFileId>,
}

impl ProjectAssembler {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            db: Database::new(),
            state: AssemblerState::Unloaded,
            project: None,
        }
    }

    pub fn state(&self) -> AssemblerState {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Committed entities
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Id of the loaded project
    pub fn project(&self) -> Result<ProjectFileId> {
        self.project
            .ok_or_else(|| Error::invalid_state(self.state.to_string(), "access the project"))
    }

    /// Read a project and its sub-files as one unit of work
    pub fn load(&mut self, path: &Path) -> Result<ProjectFileId> {
        self.require(&[AssemblerState::Unloaded], "load a project")?;
        self.transition(AssemblerState::Reading);

        let result = {
            let mut uow = self.db.begin();
            let read = read_project_file(&mut ReadContext::new(&mut uow, &self.config), path);
            match read {
                Ok(id) => uow.commit().map(|stats| (id, stats)),
                Err(e) => {
                    uow.rollback();
                    Err(e)
                }
            }
        };

        match result {
            Ok((id, stats)) => {
                info!(
                    "Loaded {} ({} entities committed)",
                    path.display(),
                    stats.written
                );
                self.project = Some(id);
                self.transition(AssemblerState::Loaded);
                Ok(id)
            }
            Err(e) => {
                self.transition(AssemblerState::Unloaded);
                Err(e)
            }
        }
    }

    /// Apply changes to the loaded project in one unit of work
    pub fn edit<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut UnitOfWork<'_>, ProjectFileId) -> Result<T>,
    {
        self.require(
            &[AssemblerState::Loaded, AssemblerState::Written],
            "edit the project",
        )?;
        let project = self.project()?;

        let mut uow = self.db.begin();
        let value = f(&mut uow, project)?;
        uow.commit()?;

        self.transition(AssemblerState::Loaded);
        Ok(value)
    }

    /// Set a card on the loaded project
    pub fn set_option(&mut self, name: &str, value: &str, add_quotes: bool) -> Result<OptionId> {
        self.edit(|uow, project| options::set_option(uow, project, name, value, add_quotes))
    }

    /// Write the project and its sub-files under a new name
    pub fn write(&mut self, directory: &Path, name: &str) -> Result<WrittenFiles> {
        self.require(
            &[AssemblerState::Loaded, AssemblerState::Written],
            "write the project",
        )?;
        let project = self.project()?;
        self.transition(AssemblerState::Writing);

        match write_project(WriteContext::new(&self.db, &self.config), project, directory, name) {
            Ok(written) => {
                self.transition(AssemblerState::Written);
                Ok(written)
            }
            Err(e) => {
                self.transition(AssemblerState::Loaded);
                Err(e)
            }
        }
    }

    fn require(&self, allowed: &[AssemblerState], action: &str) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(Error::invalid_state(self.state.to_string(), action))
        }
    }

    fn transition(&mut self, next: AssemblerState) {
        debug!("Assembler {} -> {}", self.state, next);
        self.state = next;
    }
}
