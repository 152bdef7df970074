use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Commit the working copy as the author named by `GIT_AUTHOR_*`
    pub fn commit(&self, message: &str) -> anyhow::Result<ObjectId> {
        self.commit_as(message, Author::load_from_env()?)
    }

    /// Record the non-ignored working copy as a commit on top of `HEAD`
    pub fn commit_as(&self, message: &str, author: Author) -> anyhow::Result<ObjectId> {
        let tree_id = self.write_tree()?;

        let parent = self.refs().read_head()?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let message = message.trim().to_string();
        let commit = Commit::new(parent.into_iter().collect(), tree_id, author, message);
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        writeln!(
            self.writer(),
            "[{}{}] {}",
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}
