use crate::app::error::ArchiveError;
use crate::app::models::ARCHIVE_EXTENSION;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::result::ZipResult;
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

/// Compresses `source` into `destination/<stem>.zip` as the archive's only
/// entry, replacing any archive already there.
pub fn store(source: &Path, destination: &Path) -> Result<PathBuf, ArchiveError> {
    let archive = archive_path(source, destination);

    if !destination.exists() {
        fs::create_dir_all(destination)
            .map_err(|e| ArchiveError::CreateDirectory(destination.to_path_buf(), e))?;
    }

    if archive.exists() {
        log::debug!("removing {}", archive.display());
        if let Err(e) = fs::remove_file(&archive) {
            // The write below truncates, so a failed removal only matters if it fails too.
            log::error!("{}", ArchiveError::ArchiveRemoval(archive.clone(), e));
        }
    }

    log::info!("{} -> {}", source.display(), archive.display());
    if let Err(e) = write_single_entry(source, &archive) {
        let _ = fs::remove_file(&archive);
        return Err(ArchiveError::ArchiveWrite(archive, e));
    }

    Ok(archive)
}

/// Where `store` puts the archive for `source`.
pub fn archive_path(source: &Path, destination: &Path) -> PathBuf {
    let mut name = PathBuf::from(source.file_stem().unwrap_or_default());
    name.set_extension(ARCHIVE_EXTENSION);
    destination.join(name)
}

fn write_single_entry(source: &Path, archive: &Path) -> ZipResult<()> {
    let entry_name = source
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned();

    let mut input = File::open(source)?;
    let mut zip = ZipWriter::new(File::create(archive)?);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    log::debug!("Archiving {} in {}", source.display(), archive.display());
    zip.start_file(entry_name, options)?;
    io::copy(&mut input, &mut zip)?;
    zip.finish()?;
    Ok(())
}
