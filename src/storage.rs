//! Filesystem store for templates and generated output.
//!
//! Three flat directories live under one root: `templates/` (seeded by the
//! operator), `documents/` and `pdfs/` (generated). Every generation clears
//! `documents/` and `pdfs/` first, so only the most recent invoice's files are
//! kept, system wide. Two generations running at the same time race on the
//! same directories and may delete each other's output.

use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("'{0}' is not a valid file name")]
    InvalidName(String),
    #[error("file '{0}' not found")]
    NotFound(String),
    #[error("storage I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directory {
    Templates,
    Documents,
    Pdfs,
}

impl Directory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Directory::Templates => "templates",
            Directory::Documents => "documents",
            Directory::Pdfs => "pdfs",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn dir(&self, directory: Directory) -> PathBuf {
        self.root.join(directory.as_str())
    }

    /// Create all three directories if missing.
    pub fn ensure_dirs(&self) -> io::Result<()> {
        for directory in [Directory::Templates, Directory::Documents, Directory::Pdfs] {
            std::fs::create_dir_all(self.dir(directory))?;
        }
        Ok(())
    }

    /// Path of `name` inside `directory`; `name` must be a plain file name.
    pub fn path_of(&self, directory: Directory, name: &str) -> Result<PathBuf, StorageError> {
        validate_file_name(name)?;
        Ok(self.dir(directory).join(name))
    }

    /// Like [`FileStore::path_of`] but the file must exist.
    pub async fn existing_path(
        &self,
        directory: Directory,
        name: &str,
    ) -> Result<PathBuf, StorageError> {
        let path = self.path_of(directory, name)?;
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(StorageError::NotFound(name.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    /// File names in `directory`, sorted.
    pub async fn list(&self, directory: Directory) -> Result<Vec<String>, StorageError> {
        let mut entries = tokio::fs::read_dir(self.dir(directory)).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    /// Remove every file in `directory`. Returns how many were removed.
    pub async fn clear(&self, directory: Directory) -> Result<usize, StorageError> {
        let mut entries = tokio::fs::read_dir(self.dir(directory)).await?;
        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if entry.file_type().await?.is_dir() {
                warn!("Skipping sub-directory {} while clearing {}", path.display(), directory.as_str());
                continue;
            }
            tokio::fs::remove_file(&path).await?;
            removed += 1;
        }
        debug!("Removed {} file(s) from {}", removed, directory.as_str());
        Ok(removed)
    }
}

/// Reject anything that would escape a store directory.
pub fn validate_file_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || sanitize_filename::sanitize(name) != name
    {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}
