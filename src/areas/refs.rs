//! Git references (branches, HEAD)
//!
//! References are human-readable names pointing to commits. They can be:
//! - Direct: containing a commit SHA-1
//! - Symbolic: pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! The change model only reads references to resolve comparison endpoints; the
//! `commit` command is the one writer, advancing whatever HEAD points at.

use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::ops::DerefMut;
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Git references manager rooted at the `.git` directory
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

#[derive(Debug, Clone)]
enum SymRefOrOid {
    SymRef(String),
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> anyhow::Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string())))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(
                content.to_string(),
            )?)))
        }
    }
}

impl Refs {
    /// Follow a reference chain until reaching an object id
    ///
    /// Returns `None` for an unborn branch (the chain ends at a missing or empty file).
    fn read_symref(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        match SymRefOrOid::read_symref_or_oid(path)? {
            Some(SymRefOrOid::SymRef(target)) => self.read_symref(&self.path.join(target)),
            Some(SymRefOrOid::Oid(oid)) => Ok(Some(oid)),
            None => Ok(None),
        }
    }

    /// Update the reference at `path`, following symbolic references to their target
    ///
    /// Acquires an exclusive lock on the reference file during the update.
    fn update_symref(&self, path: &Path, oid: &ObjectId) -> anyhow::Result<()> {
        if let Some(SymRefOrOid::SymRef(target)) = SymRefOrOid::read_symref_or_oid(path)? {
            return self.update_symref(&self.path.join(target), oid);
        }

        self.update_ref_file(path, oid.as_ref())
    }

    pub fn update_head(&self, oid: &ObjectId) -> anyhow::Result<()> {
        self.update_symref(&self.head_path(), oid)
    }

    pub fn read_head(&self) -> anyhow::Result<Option<ObjectId>> {
        self.read_symref(&self.head_path())
    }

    /// Point HEAD at the branch called `branch`, whether or not it exists yet
    pub fn set_head_branch(&self, branch: &str) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), &format!("ref: refs/heads/{}", branch))
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        std::fs::create_dir_all(path.parent().with_context(|| {
            format!(
                "failed to create parent directories for ref file at {:?}",
                path
            )
        })?)?;

        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to open ref file at {:?}", path))?;
        let mut lock = file_guard::lock(&mut ref_file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().write_all(raw_ref.as_bytes())?;

        Ok(())
    }

    /// Resolve a reference name the way `git rev-parse` looks it up
    ///
    /// Searches `.git/<name>`, `.git/refs/<name>` and `.git/refs/heads/<name>`.
    ///
    /// # Returns
    ///
    /// - `Ok(None)` if no reference with that name exists
    /// - `Ok(Some(None))` if the reference exists but its branch is unborn
    /// - `Ok(Some(Some(oid)))` otherwise
    pub fn read_ref(&self, name: &str) -> anyhow::Result<Option<Option<ObjectId>>> {
        let candidate = [
            self.path.to_path_buf(),
            self.refs_path().to_path_buf(),
            self.heads_path().to_path_buf(),
        ]
        .into_iter()
        .map(|base_path| base_path.join(name))
        .find(|path| path.is_file());

        match candidate {
            Some(path) => Ok(Some(self.read_symref(&path)?)),
            None => Ok(None),
        }
    }

    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }
}
