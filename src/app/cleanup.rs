use crate::app::error::ArchiveError;
use crate::app::models::RunConfig;
use std::fs;
use std::path::Path;

/// Deletes `target`, recursively if it is a directory.
///
/// Refuses when `target` is the configured root or one of its ancestors.
/// Nothing else is guarded: no prompt, no dry run.
pub fn cleanup(config: &RunConfig, target: &Path) -> Result<(), ArchiveError> {
    if contains_root(target, &config.root_directory) {
        return Err(ArchiveError::CleanupRefused(target.to_path_buf()));
    }

    if target.is_file() {
        log::debug!("removing file {}", target.display());
        fs::remove_file(target).map_err(|e| ArchiveError::Cleanup(target.to_path_buf(), e))
    } else if target.is_dir() {
        log::debug!("removing directory {}", target.display());
        fs::remove_dir_all(target).map_err(|e| ArchiveError::Cleanup(target.to_path_buf(), e))
    } else {
        log::debug!("{} does not exist, nothing to clean", target.display());
        Ok(())
    }
}

fn contains_root(target: &Path, root: &Path) -> bool {
    match (fs::canonicalize(target), fs::canonicalize(root)) {
        (Ok(target), Ok(root)) => root.starts_with(target),
        _ => root.starts_with(target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::BASELINE_DIR;
    use std::path::PathBuf;

    fn config(root: &Path, out: &Path) -> RunConfig {
        RunConfig {
            root_directory: root.to_path_buf(),
            output_directory: out.to_path_buf(),
            verbosity: 0,
            baseline_subdir_name: BASELINE_DIR.to_string(),
            driver: None,
        }
    }

    #[test]
    fn refuses_to_remove_root() {
        let temp = tempfile::tempdir().unwrap();
        let kept = temp.path().join("results.csv");
        fs::write(&kept, "1").unwrap();
        let config = config(temp.path(), temp.path());

        let err = cleanup(&config, temp.path()).unwrap_err();

        assert!(matches!(err, ArchiveError::CleanupRefused(_)));
        assert!(kept.exists());
    }

    #[test]
    fn refuses_root_reached_through_a_different_spelling() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        let config = config(temp.path(), temp.path());

        let err = cleanup(&config, &temp.path().join("sub").join("..")).unwrap_err();

        assert!(matches!(err, ArchiveError::CleanupRefused(_)));
        assert!(temp.path().join("sub").exists());
    }

    #[test]
    fn refuses_ancestor_of_root() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().join("runs");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("run1.csv"), "1").unwrap();
        let config = config(&root, temp.path());

        let err = cleanup(&config, temp.path()).unwrap_err();

        assert!(matches!(err, ArchiveError::CleanupRefused(_)));
        assert!(root.join("run1.csv").exists());
    }

    #[test]
    fn removes_directory_tree() {
        let temp = tempfile::tempdir().unwrap();
        let out = temp.path().join("out");
        fs::create_dir_all(out.join("a").join(BASELINE_DIR)).unwrap();
        fs::write(out.join("a").join(BASELINE_DIR).join("run.zip"), "z").unwrap();
        let config = config(temp.path(), &out);

        cleanup(&config, &out).unwrap();

        assert!(!out.exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn removes_single_file() {
        let temp = tempfile::tempdir().unwrap();
        let file = temp.path().join("stale.zip");
        fs::write(&file, "z").unwrap();
        let config = config(temp.path(), &file);

        cleanup(&config, &file).unwrap();

        assert!(!file.exists());
    }

    #[test]
    fn missing_target_is_not_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let missing: PathBuf = temp.path().join("never-created");
        let config = config(temp.path(), &missing);

        assert!(cleanup(&config, &missing).is_ok());
    }
}
