//! Filesystem infrastructure: implements `PackageDirectory`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::PackageDirectory;

/// Production filesystem implementation of `PackageDirectory`.
pub struct LocalFs;

impl PackageDirectory for LocalFs {
    fn exists(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    /// Returned paths are absolute; the automation server resolves relative
    /// paths against its own working directory.
    fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let dir = std::path::absolute(dir)
            .with_context(|| format!("resolving directory {}", dir.display()))?;
        let dir = dir.as_path();
        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)
            .with_context(|| format!("reading directory {}", dir.display()))?
        {
            let entry = entry.with_context(|| format!("reading entry in {}", dir.display()))?;
            let is_file = entry
                .file_type()
                .with_context(|| format!("inspecting {}", entry.path().display()))?
                .is_file();
            if is_file {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }
}
