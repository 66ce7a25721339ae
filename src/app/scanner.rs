use crate::app::error::ArchiveError;
use crate::app::models::{CommandKind, EntryKind, PathEntry, RunConfig, RunReport};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

pub struct Scanner<'a> {
    root: &'a Path,
    kind: CommandKind,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a RunConfig, kind: CommandKind) -> Self {
        Self {
            root: &config.root_directory,
            kind,
        }
    }

    /// Walks `path` (relative to the root) and hands every matching file to
    /// `on_match`. Failures are recorded and the walk carries on.
    pub fn scan<F>(&self, path: &Path, recurse: bool, mut on_match: F) -> RunReport
    where
        F: FnMut(&Path) -> Result<PathBuf, ArchiveError>,
    {
        let mut report = RunReport::default();
        let target = PathEntry::classify(self.root.join(path));
        log::debug!(
            "scan(root: {}, path: {}, recurse: {})",
            self.root.display(),
            path.display(),
            recurse
        );

        match target.kind {
            EntryKind::File => self.visit_file(&target.path, &mut on_match, &mut report),
            EntryKind::Directory if recurse => {
                self.walk_directory(&target.path, &mut on_match, &mut report)
            }
            EntryKind::Directory => {
                report.record_failure(ArchiveError::UnexpectedDirectory(target.path))
            }
            EntryKind::Invalid => report.record_failure(ArchiveError::InvalidPath(target.path)),
        }

        report
    }

    fn walk_directory<F>(&self, dir: &Path, on_match: &mut F, report: &mut RunReport)
    where
        F: FnMut(&Path) -> Result<PathBuf, ArchiveError>,
    {
        // Plain walk: no ignore files, hidden entries included, links not followed.
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    report.record_failure(err.into());
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }

            let classified = PathEntry::classify(entry.path().to_path_buf());
            match classified.kind {
                EntryKind::File => self.visit_file(&classified.path, on_match, report),
                EntryKind::Directory if entry.path_is_symlink() => {
                    log::warn!("not following symlinked directory {}", classified.path.display())
                }
                EntryKind::Directory => {}
                EntryKind::Invalid => {
                    report.record_failure(ArchiveError::InvalidPath(classified.path))
                }
            }
        }
    }

    fn visit_file<F>(&self, path: &Path, on_match: &mut F, report: &mut RunReport)
    where
        F: FnMut(&Path) -> Result<PathBuf, ArchiveError>,
    {
        if !self.kind.matches(path) {
            log::trace!("skipping {}", path.display());
            return;
        }

        match on_match(path) {
            Ok(archive) => report.archived.push(archive),
            Err(err) => report.record_failure(err),
        }
    }
}
