use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("Failed to create .git/refs/heads directory")?;

        if !self.refs().head_path().exists() {
            self.refs()
                .set_head_branch(DEFAULT_BRANCH)
                .context("Failed to create initial HEAD reference")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty Git repository in {}",
            self.git_path().display()
        )?;

        Ok(())
    }
}
