use crate::app::error::ArchiveError;
use crate::app::models::DriverConfig;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Regenerates the results for a scenario before it is archived.
pub trait ScenarioDriver {
    fn run(&self, scenario: &Path) -> Result<(), ArchiveError>;
}

/// Used by `archive`, and by `rebase` when no driver is configured.
#[derive(Debug, Default)]
pub struct NoDriver;

impl ScenarioDriver for NoDriver {
    fn run(&self, _scenario: &Path) -> Result<(), ArchiveError> {
        Ok(())
    }
}

/// Runs `program [args...] <scenario>` from the root directory.
#[derive(Debug)]
pub struct CommandDriver {
    program: PathBuf,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandDriver {
    pub fn new(config: &DriverConfig, working_dir: &Path) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            working_dir: working_dir.to_path_buf(),
        }
    }
}

impl ScenarioDriver for CommandDriver {
    fn run(&self, scenario: &Path) -> Result<(), ArchiveError> {
        log::info!("{} {}", self.program.display(), scenario.display());

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(scenario)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|e| ArchiveError::DriverSpawn(self.program.clone(), e))?;

        if !status.success() {
            return Err(ArchiveError::DriverFailed(scenario.to_path_buf(), status));
        }
        Ok(())
    }
}
