use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::cmp::Reverse;
use std::collections::{HashSet, VecDeque};

/// The commits of `source..destination`: reachable from `destination` and not
/// from `source`
#[derive(Debug, Clone, new)]
pub struct RevList<'r> {
    repository: &'r Repository,
    destination: Option<ObjectId>,
    source: Option<ObjectId>,
}

impl<'r> RevList<'r> {
    /// Every selected commit, newest first
    ///
    /// Commits are ordered by committer time; commits made in the same second are
    /// ordered by id so the listing is stable.
    pub fn commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let excluded = match &self.source {
            Some(source) => self.ancestry(source, &HashSet::new())?,
            None => Vec::new(),
        };
        let excluded = excluded.into_iter().map(|(oid, _)| oid).collect::<HashSet<_>>();

        let mut commits = match &self.destination {
            Some(destination) => self.ancestry(destination, &excluded)?,
            None => Vec::new(),
        };
        commits.sort_by(|(a_oid, a), (b_oid, b)| {
            (Reverse(a.timestamp()), a_oid).cmp(&(Reverse(b.timestamp()), b_oid))
        });

        tracing::debug!(
            destination = ?self.destination,
            source = ?self.source,
            commits = commits.len(),
            "listed commits"
        );
        Ok(commits)
    }

    /// `start` and all its ancestors, stopping at any commit in `stop`
    fn ancestry(
        &self,
        start: &ObjectId,
        stop: &HashSet<ObjectId>,
    ) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([start.clone()]);
        let mut commits = Vec::new();

        while let Some(oid) = queue.pop_front() {
            if stop.contains(&oid) || !seen.insert(oid.clone()) {
                continue;
            }

            let commit = self.repository.database().parse_object_as_commit(&oid)?;
            queue.extend(commit.parents().iter().cloned());
            commits.push((oid, commit));
        }

        Ok(commits)
    }
}
