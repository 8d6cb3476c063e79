use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::error::{Result, ValidagenError};

/// One rendered validator ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Type key in `Validators`.
    pub key: String,
    pub path: PathBuf,
    pub mode: u32,
    pub contents: String,
}

/// Destination for rendered validators.
pub trait OutputWriter {
    fn write(&mut self, file: &GeneratedFile) -> Result<()>;
}

/// Writes files to disk, creating missing directories and applying the
/// resolved permission bits. Existing files are overwritten.
#[derive(Debug, Default)]
pub struct FsWriter;

impl OutputWriter for FsWriter {
    fn write(&mut self, file: &GeneratedFile) -> Result<()> {
        if let Some(parent) = file.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ValidagenError::io(parent, e))?;
        }
        fs::write(&file.path, &file.contents).map_err(|e| ValidagenError::io(&file.path, e))?;
        set_mode(file)?;
        info!(
            key = %file.key,
            path = %file.path.display(),
            mode = %format!("{:#o}", file.mode),
            "generated validator"
        );
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(file: &GeneratedFile) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(&file.path, fs::Permissions::from_mode(file.mode))
        .map_err(|e| ValidagenError::io(&file.path, e))
}

#[cfg(not(unix))]
fn set_mode(_file: &GeneratedFile) -> Result<()> {
    Ok(())
}

/// Logs what would be written and keeps the files in memory.
#[derive(Debug, Default)]
pub struct DryRunWriter {
    pub files: Vec<GeneratedFile>,
}

impl OutputWriter for DryRunWriter {
    fn write(&mut self, file: &GeneratedFile) -> Result<()> {
        info!(
            key = %file.key,
            path = %file.path.display(),
            mode = %format!("{:#o}", file.mode),
            bytes = file.contents.len(),
            "dry run: would generate validator"
        );
        self.files.push(file.clone());
        Ok(())
    }
}
