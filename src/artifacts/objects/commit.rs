//! Git commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::io::BufRead;

/// Author or committer information
///
/// Contains name, email, and timestamp with timezone information.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: DateTime<FixedOffset>,
}

impl Author {
    /// Create a new author with the current timestamp
    ///
    /// # Arguments
    ///
    /// * `name` - Author's name
    /// * `email` - Author's email address
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    /// Create a new author with a fixed timestamp
    ///
    /// # Arguments
    ///
    /// * `name` - Author's name
    /// * `email` - Author's email address
    /// * `timestamp` - When the change was authored, with its timezone
    pub fn new_with_timestamp(name: String, email: String, timestamp: DateTime<FixedOffset>) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Format complete author info including timestamp
    ///
    /// # Returns
    ///
    /// String in format "Name <email> timestamp timezone"
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Load author information from environment variables
    ///
    /// Reads GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL, and optionally GIT_AUTHOR_DATE.
    /// If no date is provided, uses current time.
    pub fn load_from_env() -> anyhow::Result<Self> {
        let name = std::env::var("GIT_AUTHOR_NAME").context("GIT_AUTHOR_NAME not set")?;
        let email = std::env::var("GIT_AUTHOR_EMAIL").context("GIT_AUTHOR_EMAIL not set")?;
        let timestamp = std::env::var("GIT_AUTHOR_DATE").ok().and_then(|date_str| {
            DateTime::parse_from_rfc2822(&date_str)
                .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                .ok()
        });

        match timestamp {
            Some(ts) => Ok(Author::new_with_timestamp(name, email, ts)),
            None => Ok(Author::new(name, email)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }
}

impl TryFrom<&str> for Author {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        // Split from the right: the name itself may contain spaces
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(anyhow::anyhow!("Invalid author format"));
        }

        let timezone = parts[0];
        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| anyhow::anyhow!("Invalid timestamp"))?;
        let name_email_part = parts[2];

        let email_start = name_email_part
            .find('<')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '<'"))?;
        let email_end = name_email_part
            .rfind('>')
            .ok_or_else(|| anyhow::anyhow!("Invalid author format: missing '>'"))?;

        let name = name_email_part[..email_start].trim().to_string();
        let email = name_email_part[email_start + 1..email_end].to_string();

        let offset = parse_timezone(timezone)?;
        let timestamp = DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| anyhow::anyhow!("Invalid timestamp"))?
            .with_timezone(&offset);

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

fn parse_timezone(timezone: &str) -> anyhow::Result<FixedOffset> {
    let invalid = || anyhow::anyhow!("Invalid timezone: {timezone}");

    let (sign, digits) = match timezone.split_at_checked(1) {
        Some(("+", digits)) => (1, digits),
        Some(("-", digits)) => (-1, digits),
        _ => return Err(invalid()),
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let hours = digits[..2].parse::<i32>()?;
    let minutes = digits[2..].parse::<i32>()?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}

/// Git commit object
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for initial commit, multiple for merge commits)
    parents: Vec<ObjectId>,
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    /// Create a new commit whose committer is its author
    ///
    /// # Arguments
    ///
    /// * `parents` - Parent commit ids, empty for a root commit
    /// * `tree_oid` - Tree recording the snapshot
    /// * `author` - Author, also used as committer
    /// * `message` - Full commit message
    pub fn new(parents: Vec<ObjectId>, tree_oid: ObjectId, author: Author, message: String) -> Self {
        Commit {
            parents,
            tree_oid,
            committer: author.clone(),
            author,
            message,
        }
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    /// Commit time, used to order history newest first
    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.committer.timestamp()
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = vec![];

        object_content.push(format!("tree {}", self.tree_oid.as_ref()));
        for parent in &self.parents {
            object_content.push(format!("parent {}", parent.as_ref()));
        }
        object_content.push(format!("author {}", self.author.display()));
        object_content.push(format!("committer {}", self.committer.display()));
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        let object_content = object_content.join("\n");

        Ok(with_header(self.object_type(), object_content.as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8_lossy(&content);
        let (headers, message) = content
            .split_once("\n\n")
            .unwrap_or((content.as_ref(), ""));
        let mut lines = headers.lines();

        let tree_oid = lines
            .next()
            .and_then(|line| line.strip_prefix("tree "))
            .context("Invalid commit object: missing tree line")?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        // There can be 0, 1, or multiple parents
        let mut parents = Vec::new();
        let mut next_line = lines
            .next()
            .context("Invalid commit object: missing author line")?;

        while let Some(parent_oid) = next_line.strip_prefix("parent ") {
            parents.push(ObjectId::try_parse(parent_oid.to_string())?);

            next_line = lines
                .next()
                .context("Invalid commit object: missing author line")?;
        }

        let author = next_line
            .strip_prefix("author ")
            .context("Invalid commit object: invalid author line")?;
        let author = Author::try_from(author)?;

        let committer = lines
            .next()
            .and_then(|line| line.strip_prefix("committer "))
            .context("Invalid commit object: missing committer line")?;
        let committer = Author::try_from(committer)?;

        // remaining headers (encoding, gpgsig, ...) are not needed by the change model

        Ok(Commit {
            parents,
            tree_oid,
            author,
            committer,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
