//! CLI route: single route table and run context. Dispatches to the state layer and presentation.

use crate::config::ConfigLoader;
use crate::error::{ApiError, EntryError};
use crate::path::AbsPath;
use crate::store::{buckets, open_persistent_state, AccessMode, PersistentState};
use crate::system::{build_system, System};
use std::io;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cli::parse::{command_name, Cli, Commands, StateCommands};
use crate::cli::presentation::{format_state_data, format_state_dump, OutputFormat};
use crate::cli::prompt::{confirm, DialoguerPrompter, Prompter};

/// Runtime context for CLI execution: resolved store path, system stack and prompting.
pub struct RunContext {
    persistent_state_path: AbsPath,
    system: Arc<dyn System>,
    force: bool,
    prompter: Box<dyn Prompter>,
}

impl RunContext {
    /// Create run context from parsed arguments. Uses ConfigLoader only.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let config = match cli.config {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load()?,
        };
        let persistent_state_path = config
            .persistent_state
            .resolve_path(cli.persistent_state.as_ref())?;

        Ok(Self {
            persistent_state_path,
            system: build_system(cli.dry_run, cli.verbose),
            force: cli.force,
            prompter: Box::new(DialoguerPrompter),
        })
    }

    /// Create run context from already-resolved parts.
    pub fn from_parts(
        persistent_state_path: AbsPath,
        system: Arc<dyn System>,
        force: bool,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        Self {
            persistent_state_path,
            system,
            force,
            prompter,
        }
    }

    pub fn persistent_state_path(&self) -> &AbsPath {
        &self.persistent_state_path
    }

    /// Execute a CLI command via the single route table.
    ///
    /// The full output is produced before anything is returned, so a failing
    /// command never yields partial output.
    pub fn execute(&self, command: &Commands) -> Result<Vec<u8>, ApiError> {
        debug!(command = command_name(command), "executing command");
        match command {
            Commands::State { command } => self.handle_state_command(command),
        }
    }

    fn handle_state_command(&self, command: &StateCommands) -> Result<Vec<u8>, ApiError> {
        match command {
            StateCommands::Data { format } => {
                let format: OutputFormat = format.parse()?;
                self.with_persistent_state(AccessMode::ReadOnly, |state| {
                    Ok(format_state_data(&state.data()?, format)?.into_bytes())
                })
            }
            StateCommands::Delete { bucket, key } => {
                self.with_persistent_state(AccessMode::ReadWrite, |state| {
                    state.delete(bucket.as_bytes(), key.as_bytes())?;
                    info!(bucket = %bucket, key = %key, "deleted key");
                    Ok(Vec::new())
                })
            }
            StateCommands::Dump { format } => {
                let format: OutputFormat = format.parse()?;
                self.with_persistent_state(AccessMode::ReadOnly, |state| {
                    Ok(format_state_dump(&buckets::dump(state)?, format)?.into_bytes())
                })
            }
            StateCommands::Get { bucket, key } => {
                self.with_persistent_state(AccessMode::ReadOnly, |state| {
                    Ok(state
                        .get(bucket.as_bytes(), key.as_bytes())?
                        .unwrap_or_default())
                })
            }
            StateCommands::Reset => self.reset(),
            StateCommands::Set { bucket, key, value } => {
                self.with_persistent_state(AccessMode::ReadWrite, |state| {
                    state.set(bucket.as_bytes(), key.as_bytes(), value.as_bytes())?;
                    info!(bucket = %bucket, key = %key, "set key");
                    Ok(Vec::new())
                })
            }
        }
    }

    /// Open the store, run `f`, and close the store on every path.
    fn with_persistent_state<F>(&self, mode: AccessMode, f: F) -> Result<Vec<u8>, ApiError>
    where
        F: FnOnce(&dyn PersistentState) -> Result<Vec<u8>, ApiError>,
    {
        let state = open_persistent_state(self.persistent_state_path.as_path(), mode)?;
        let result = f(state.as_ref());
        let closed = state.close();
        let output = result?;
        closed?;
        Ok(output)
    }

    fn reset(&self) -> Result<Vec<u8>, ApiError> {
        let path = &self.persistent_state_path;
        match self.system.stat(path) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path, "no persistent state to reset");
                return Ok(Vec::new());
            }
            Err(e) => return Err(EntryError::from(e).into()),
        }

        if !self.force && !confirm(self.prompter.as_ref(), &format!("Remove {}", path))? {
            info!(path = %path, "reset declined");
            return Ok(Vec::new());
        }

        self.system.remove_all(path).map_err(EntryError::from)?;
        info!(path = %path, "persistent state reset");
        Ok(Vec::new())
    }
}
