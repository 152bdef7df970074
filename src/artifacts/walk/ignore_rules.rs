//! Gitignore-style exclusion rules for the working copy
//!
//! Sources, lowest precedence first:
//! 1. patterns from the configuration
//! 2. `.git/info/exclude`
//! 3. the root `.gitignore`
//! 4. nested `.gitignore` files, each scoped to the directory holding it
//!
//! The deepest directory whose rules have an opinion about a path decides, but
//! nothing below an excluded directory can be re-included.

use anyhow::Context;
use ignore::Match;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORE_FILE: &str = ".gitignore";

#[derive(Debug, Clone)]
pub struct IgnoreRules {
    root: PathBuf,
    root_rules: Gitignore,
    /// Nested rule sets keyed by their directory, deepest first
    nested_rules: Vec<(PathBuf, Gitignore)>,
}

impl IgnoreRules {
    /// Rules that ignore nothing
    pub fn empty(root: &Path) -> Self {
        IgnoreRules {
            root: root.to_path_buf(),
            root_rules: Gitignore::empty(),
            nested_rules: Vec::new(),
        }
    }

    /// Read every ignore source of the working copy at `root`
    pub fn load(root: &Path, extra_patterns: &[String]) -> anyhow::Result<Self> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in extra_patterns {
            builder
                .add_line(None, pattern)
                .with_context(|| format!("Invalid exclude pattern {pattern:?}"))?;
        }
        for source in [root.join(".git").join("info").join("exclude"), root.join(IGNORE_FILE)] {
            if source.is_file()
                && let Some(error) = builder.add(&source)
            {
                tracing::warn!(file = %source.display(), %error, "skipping malformed ignore rules");
            }
        }
        let root_rules = builder
            .build()
            .context("Unable to build root ignore rules")?;

        let mut rules = IgnoreRules {
            root: root.to_path_buf(),
            root_rules,
            nested_rules: Vec::new(),
        };
        rules.nested_rules = rules.load_nested()?;

        tracing::debug!(
            root = %root.display(),
            nested = rules.nested_rules.len(),
            "loaded ignore rules"
        );
        Ok(rules)
    }

    fn load_nested(&self) -> anyhow::Result<Vec<(PathBuf, Gitignore)>> {
        let mut nested_rules = Vec::new();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return true;
                }
                if entry.file_name() == ".git" {
                    return false;
                }
                // ignored directories are never searched for further rules
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .map(|relative| !self.root_rules_ignore(relative, true))
                    .unwrap_or(false)
            });

        for entry in walker.filter_map(|entry| entry.ok()) {
            if entry.file_name() != IGNORE_FILE || entry.depth() < 2 || !entry.file_type().is_file() {
                continue;
            }

            let Some(dir) = entry.path().parent() else {
                continue;
            };
            let mut builder = GitignoreBuilder::new(dir);
            if let Some(error) = builder.add(entry.path()) {
                tracing::warn!(file = %entry.path().display(), %error, "skipping malformed ignore rules");
                continue;
            }
            let relative_dir = dir.strip_prefix(&self.root)?.to_path_buf();
            nested_rules.push((relative_dir, builder.build()?));
        }

        nested_rules.sort_by_key(|(dir, _)| std::cmp::Reverse(dir.components().count()));
        Ok(nested_rules)
    }

    fn root_rules_ignore(&self, relative: &Path, is_dir: bool) -> bool {
        if relative.as_os_str().is_empty() {
            return false;
        }

        self.root_rules
            .matched_path_or_any_parents(self.root.join(relative), is_dir)
            .is_ignore()
    }

    /// Whether `path` (relative to the working copy root) is excluded
    ///
    /// # Arguments
    ///
    /// * `path` - Working-copy path relative to the root
    /// * `is_dir` - Whether `path` names a directory, for `dir/` patterns
    ///
    /// # Returns
    ///
    /// `true` when a parent directory of `path` is excluded, or when the deepest
    /// rules with an opinion about `path` itself exclude it. A negated pattern
    /// cannot re-include anything below an excluded directory.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if path.as_os_str().is_empty() {
            return false;
        }

        if let Some(parent) = path.parent()
            && self.is_ignored(parent, true)
        {
            return true;
        }

        let absolute = self.root.join(path);
        for (dir, rules) in &self.nested_rules {
            if !path.starts_with(dir) || path == dir {
                continue;
            }

            match rules.matched(&absolute, is_dir) {
                Match::Ignore(_) => return true,
                Match::Whitelist(_) => return false,
                Match::None => {}
            }
        }

        self.root_rules.matched(&absolute, is_dir).is_ignore()
    }
}
