use crate::areas::config::SyncConfig;
use crate::areas::database::Database;
use crate::areas::projects::{ProjectBinding, discover_projects};
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::walk::ignore_rules::IgnoreRules;
use anyhow::Context;
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Handle to a repository and its working copy
///
/// Every component only reads from disk on demand, so a single handle can be
/// shared (behind an `Arc`) by a whole tree of change nodes and across threads.
pub struct Repository {
    path: Box<Path>,
    writer: Mutex<Box<dyn Write + Send>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
    config: SyncConfig,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn Write + Send>) -> anyhow::Result<Self> {
        Self::with_config(path, writer, SyncConfig::load_from_env())
    }

    pub fn with_config(
        path: &str,
        writer: Box<dyn Write + Send>,
        config: SyncConfig,
    ) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)
                .with_context(|| format!("Unable to create {}", path.display()))?;
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("Unable to resolve {}", path.display()))?;

        let git_path = path.join(".git");
        let database = Database::new(git_path.join("objects").into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(git_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: Mutex::new(writer),
            database,
            workspace,
            refs,
            config,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn git_path(&self) -> Box<Path> {
        self.path.join(".git").into_boxed_path()
    }

    pub fn writer(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        // a panic while printing leaves the writer usable
        self.writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Read the current ignore rules of the working copy
    pub fn ignore_rules(&self) -> anyhow::Result<IgnoreRules> {
        IgnoreRules::load(&self.path, &self.config.exclude_patterns)
    }

    /// Projects currently present in the working copy
    pub fn projects(&self) -> anyhow::Result<BTreeSet<ProjectBinding>> {
        discover_projects(
            &self.path,
            &self.config.project_markers,
            &self.ignore_rules()?,
        )
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
