use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Per-item failures recorded while archiving or rebasing.
///
/// None of these stop a run; they are collected into a `RunReport`.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("{} is not a valid results file", .0.display())]
    InvalidPath(PathBuf),
    #[error("{} is a directory", .0.display())]
    UnexpectedDirectory(PathBuf),
    #[error("Unable to create {}: {}", .0.display(), .1)]
    CreateDirectory(PathBuf, #[source] io::Error),
    #[error("Unable to remove {}: {}", .0.display(), .1)]
    ArchiveRemoval(PathBuf, #[source] io::Error),
    #[error("Unable to write to {}: {}", .0.display(), .1)]
    ArchiveWrite(PathBuf, #[source] zip::result::ZipError),
    #[error("{} would overwrite {}, archived earlier in this run", .1.display(), .0.display())]
    ArchiveCollision(PathBuf, PathBuf),
    #[error("Cannot cleanup {}: it is or contains the root directory", .0.display())]
    CleanupRefused(PathBuf),
    #[error("Unable to cleanup {}: {}", .0.display(), .1)]
    Cleanup(PathBuf, #[source] io::Error),
    #[error("Failed to start scenario driver {}: {}", .0.display(), .1)]
    DriverSpawn(PathBuf, #[source] io::Error),
    #[error("Scenario driver failed on {}: {}", .0.display(), .1)]
    DriverFailed(PathBuf, ExitStatus),
    #[error("File system walk error: {0}")]
    Walk(#[from] ignore::Error),
}
