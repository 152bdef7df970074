use crate::artifacts::database::store_error::StoreError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::entry_mode::{EntryMode, FileMode};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use is_executable::IsExecutable;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

const IGNORED_PATHS: [&str; 3] = [".git", ".", ".."];

/// One directory entry of the working copy
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkspaceEntry {
    pub name: OsString,
    pub mode: EntryMode,
}

impl WorkspaceEntry {
    pub fn is_dir(&self) -> bool {
        self.mode.is_tree()
    }
}

/// Read-only view of the working directory
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_ignored_name(name: &OsStr) -> bool {
        IGNORED_PATHS.iter().any(|ignored| name == *ignored)
    }

    /// List a single level of the working copy
    ///
    /// # Arguments
    ///
    /// * `dir_path` - Directory relative to the workspace root
    ///
    /// # Returns
    ///
    /// The entries sorted by their raw name. A missing directory, or a path that is
    /// not a directory, lists as empty: it simply has no entries on disk.
    pub fn list_dir(&self, dir_path: &Path) -> anyhow::Result<Vec<WorkspaceEntry>> {
        let full_path = self.path.join(dir_path);
        if !full_path.is_dir() {
            return Ok(Vec::new());
        }

        let read_dir = std::fs::read_dir(&full_path).map_err(|source| StoreError::Io {
            path: full_path.clone(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| StoreError::Io {
                path: full_path.clone(),
                source,
            })?;
            let name = entry.file_name();
            if Self::is_ignored_name(&name) {
                continue;
            }

            let mode = self.stat_mode(&entry.path())?;
            entries.push(WorkspaceEntry::new(name, mode));
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Mode a tree entry for `path` would be recorded with
    fn stat_mode(&self, path: &Path) -> anyhow::Result<EntryMode> {
        let metadata = std::fs::symlink_metadata(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if metadata.file_type().is_symlink() {
            Ok(EntryMode::Symlink)
        } else if metadata.is_dir() {
            Ok(EntryMode::Directory)
        } else if path.is_executable() {
            Ok(FileMode::Executable.into())
        } else {
            Ok(FileMode::Regular.into())
        }
    }

    /// Read the content git would store for the entry at `file_path`
    ///
    /// Symbolic links are stored as their target path, not the file they point at.
    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let full_path = self.path.join(file_path);
        let metadata = std::fs::symlink_metadata(&full_path).map_err(|source| StoreError::Io {
            path: full_path.clone(),
            source,
        })?;

        let content = if metadata.file_type().is_symlink() {
            let target = std::fs::read_link(&full_path)
                .with_context(|| format!("Unable to read link {}", full_path.display()))?;
            target.into_os_string().into_encoded_bytes()
        } else {
            std::fs::read(&full_path).map_err(|source| StoreError::Io {
                path: full_path.clone(),
                source,
            })?
        };

        Ok(content.into())
    }

    pub fn parse_blob(&self, file_path: &Path) -> anyhow::Result<Blob> {
        Ok(Blob::new(self.read_file(file_path)?))
    }

    /// Blob id of the current content of `file_path`
    pub fn hash_file(&self, file_path: &Path) -> anyhow::Result<ObjectId> {
        self.parse_blob(file_path)?.object_id()
    }

    pub fn absolute(&self, relative: &Path) -> PathBuf {
        self.path.join(relative)
    }
}
