use crate::app::error::ArchiveError;
use pathdiff::diff_paths;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

pub const BASELINE_DIR: &str = "baselines";
pub const ARCHIVE_EXTENSION: &str = "zip";

/// External program invoked on each scenario during a rebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub root_directory: PathBuf,
    pub output_directory: PathBuf,
    pub verbosity: u8,
    pub baseline_subdir_name: String,
    pub driver: Option<DriverConfig>,
}

impl RunConfig {
    /// Directory that receives the archive for `source`, mirrored from the
    /// root into the output tree.
    pub fn baseline_dir_for(&self, source: &Path) -> PathBuf {
        let relative = diff_paths(source, &self.root_directory).unwrap_or_else(|| {
            PathBuf::from(source.file_name().unwrap_or_default())
        });

        let mut destination = self.output_directory.clone();
        if let Some(parent) = relative.parent() {
            destination.push(parent);
        }
        destination.push(&self.baseline_subdir_name);
        destination
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Archive,
    Rebase,
}

impl CommandKind {
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            CommandKind::Archive => &["txt", "csv"],
            CommandKind::Rebase => &["xml"],
        }
    }

    /// Exact, case-sensitive comparison against the command's extension set.
    pub fn matches(self, path: &Path) -> bool {
        path.extension()
            .and_then(OsStr::to_str)
            .map_or(false, |ext| self.extensions().contains(&ext))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Invalid,
}

/// A path under consideration during traversal.
#[derive(Debug)]
pub struct PathEntry {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl PathEntry {
    /// Classifies `path`, following symlinks.
    pub fn classify(path: PathBuf) -> Self {
        let kind = match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => EntryKind::File,
            Ok(meta) if meta.is_dir() => EntryKind::Directory,
            _ => EntryKind::Invalid,
        };
        Self { path, kind }
    }
}

/// Outcome of a single archive or rebase run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub archived: Vec<PathBuf>,
    pub failures: Vec<ArchiveError>,
}

impl RunReport {
    pub fn record_failure(&mut self, err: ArchiveError) {
        log::error!("{}", err);
        self.failures.push(err);
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}
