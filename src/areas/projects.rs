//! Project bindings
//!
//! A project is any working-copy directory holding one of the configured marker
//! files. Nodes of the change model report the projects they touch so a front end
//! can navigate from a change to the project that owns it.

use crate::artifacts::walk::ignore_rules::IgnoreRules;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProjectBinding {
    /// Directory of the project, relative to the working copy root (empty for the root)
    path: PathBuf,
    name: String,
}

impl ProjectBinding {
    pub fn new(path: PathBuf, name: String) -> Self {
        ProjectBinding { path, name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether `path` lies inside this project
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.path)
    }

    /// Whether this project and the directory `path` share any file
    pub fn overlaps(&self, path: &Path) -> bool {
        self.contains(path) || self.path.starts_with(path)
    }
}

/// Find every project of the working copy at `root`
///
/// Ignored directories and the `.git` directory are not searched.
pub fn discover_projects(
    root: &Path,
    markers: &[String],
    rules: &IgnoreRules,
) -> anyhow::Result<BTreeSet<ProjectBinding>> {
    let mut projects = BTreeSet::new();
    if markers.is_empty() {
        return Ok(projects);
    }

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if !entry.file_type().is_dir() {
            return false;
        }
        if entry.file_name() == ".git" {
            return false;
        }
        match entry.path().strip_prefix(root) {
            Ok(relative) => !rules.is_ignored(relative, true),
            Err(_) => false,
        }
    });

    for entry in walker {
        let entry = entry?;
        let is_project = markers
            .iter()
            .any(|marker| entry.path().join(marker).is_file());
        if !is_project {
            continue;
        }

        let relative = entry.path().strip_prefix(root)?.to_path_buf();
        let name = entry
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.path().display().to_string());

        tracing::trace!(project = %name, path = %relative.display(), "found project");
        projects.insert(ProjectBinding::new(relative, name));
    }

    Ok(projects)
}
