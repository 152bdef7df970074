//! Revision expressions naming the commits a comparison starts from
//!
//! Accepted forms:
//! - reference names: `master`, `feature/login`, `HEAD`
//! - the alias `@` for `HEAD`
//! - full or abbreviated (4 or more hex digits) object ids, used when no
//!   reference with that name exists
//! - `<revision>^` for the first parent
//! - `<revision>~<n>` for the n-th first-parent ancestor

use crate::areas::repository::Repository;
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;

pub const INVALID_REF_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const PARENT_REGEX: &str = r"^(.+)\^$";
pub const ANCESTOR_REGEX: &str = r"^(.+)\~(\d+)$";
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};

const MIN_ABBREV_LENGTH: usize = 4;

/// A syntactically valid reference name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("revision cannot be empty");
        }

        let re = regex::Regex::new(INVALID_REF_NAME_REGEX)
            .with_context(|| format!("invalid ref name regex: {INVALID_REF_NAME_REGEX}"))?;

        if re.is_match(&name) {
            anyhow::bail!("invalid revision: {}", name);
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A reference, or an object id when no reference has that name
    Ref(RefName),
    /// The n-th first-parent ancestor (`HEAD~3`)
    Ancestor(Box<Revision>, usize),
    /// The first parent (`HEAD^`)
    Parent(Box<Revision>),
}

impl Revision {
    pub fn try_parse(revision: &str) -> anyhow::Result<Revision> {
        let parent_re = regex::Regex::new(PARENT_REGEX)
            .with_context(|| format!("invalid parent regex: {PARENT_REGEX}"))?;
        let ancestor_re = regex::Regex::new(ANCESTOR_REGEX)
            .with_context(|| format!("invalid ancestor regex: {ANCESTOR_REGEX}"))?;

        if let Some(caps) = parent_re.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;
            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = ancestor_re.captures(revision) {
            let generations: usize = caps[2]
                .parse()
                .with_context(|| format!("failed to parse generations in revision: {revision}"))?;
            let base_revision = Self::try_parse(&caps[1])?;
            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            Ok(Revision::Ref(RefName::try_parse(resolved_name.to_string())?))
        }
    }

    /// Find the commit this revision names
    ///
    /// # Returns
    ///
    /// `None` when the revision names an unborn branch, or walks past the first
    /// commit of the history.
    pub fn resolve(&self, repository: &Repository) -> anyhow::Result<Option<ObjectId>> {
        match self {
            Revision::Ref(name) => match repository.refs().read_ref(name.as_ref())? {
                Some(oid) => Ok(oid),
                None if Self::looks_like_oid(name.as_ref()) => {
                    Self::resolve_oid(name.as_ref(), repository).map(Some)
                }
                None => anyhow::bail!(
                    "ambiguous argument '{}': unknown revision or path not in the working tree",
                    name.as_ref()
                ),
            },
            Revision::Parent(base_revision) => {
                Self::resolve_commit_parent(base_revision.resolve(repository)?, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_commit_parent(
        oid: Option<ObjectId>,
        repository: &Repository,
    ) -> anyhow::Result<Option<ObjectId>> {
        let Some(oid) = oid else {
            return Ok(None);
        };

        let commit = repository.database().parse_object_as_commit(&oid)?;
        Ok(commit.parent().cloned())
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> anyhow::Result<ObjectId> {
        let oid_str = oid_str.to_ascii_lowercase();

        if oid_str.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(oid_str)?;
            Self::validate_oid_is_commit(&oid, repository)?;
            return Ok(oid);
        }

        let commit_matches = repository
            .database()
            .find_objects_by_prefix(&oid_str)?
            .into_iter()
            .filter(|oid| {
                repository
                    .database()
                    .get_object_type(oid)
                    .map(|object_type| object_type == ObjectType::Commit)
                    .unwrap_or(false)
            })
            .collect::<Vec<_>>();

        match commit_matches.as_slice() {
            [] => anyhow::bail!(
                "ambiguous argument '{}': unknown revision or path not in the working tree",
                oid_str
            ),
            [oid] => Ok(oid.clone()),
            candidates => {
                let mut error_msg = format!(
                    "short SHA1 {} is ambiguous\nhint: The candidates are:",
                    oid_str
                );
                for oid in candidates {
                    error_msg.push_str(&format!("\nhint:   {} commit", oid.to_short_oid()));
                }
                anyhow::bail!(error_msg)
            }
        }
    }

    fn validate_oid_is_commit(oid: &ObjectId, repository: &Repository) -> anyhow::Result<()> {
        let object_type = repository
            .database()
            .get_object_type(oid)
            .with_context(|| format!("object {} not found", oid))?;

        if object_type != ObjectType::Commit {
            anyhow::bail!(
                "object {} is a {}, not a commit",
                oid.to_short_oid(),
                object_type
            );
        }

        Ok(())
    }

    fn looks_like_oid(s: &str) -> bool {
        (MIN_ABBREV_LENGTH..=OBJECT_ID_LENGTH).contains(&s.len())
            && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}
