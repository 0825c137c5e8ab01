use crate::error::{PrefError, Result};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Write a fully rendered override file.
///
/// The contents go to a temporary file in the destination directory which is
/// then renamed over `path`, so a failed write leaves any previous file intact.
pub fn write_overrides(path: &Path, contents: &str) -> Result<()> {
    replace_file(path, |file| file.write_all(contents.as_bytes()))?;

    debug!(path = %path.display(), bytes = contents.len(), "overrides written");
    Ok(())
}

fn replace_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let to_err = |source: io::Error| PrefError::OutputWriteError {
        path: path.to_path_buf(),
        source,
    };

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(to_err)?;

    let mut staged = NamedTempFile::new_in(parent).map_err(to_err)?;
    write(staged.as_file_mut()).map_err(to_err)?;
    staged.as_file().sync_all().map_err(to_err)?;
    staged.persist(path).map_err(|e| to_err(e.error))?;

    Ok(())
}
