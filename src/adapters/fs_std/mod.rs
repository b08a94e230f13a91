// Filesystem adapter - File system operations over std::fs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::errors::*;
use crate::ports::*;

/// Standard library filesystem adapter
#[derive(Debug, Default)]
pub struct FsStdAdapter;

impl FsStdAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl FsPort for FsStdAdapter {
    fn file_exists(&self, file_path: &Path) -> bool {
        file_path.is_file()
    }

    fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError> {
        let metadata = fs::metadata(file_path).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to get file size of {}: {}",
                file_path.display(),
                e
            ))
        })?;
        Ok(metadata.len())
    }

    fn move_file(&self, from: &Path, to: &Path) -> Result<(), DomainError> {
        debug!("Moving {} to {}", from.display(), to.display());
        fs::rename(from, to).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to move {} to {}: {}",
                from.display(),
                to.display(),
                e
            ))
        })
    }
}
