//! Git tree object
//!
//! Trees represent directory snapshots in Git. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are kept keyed by name, which is also the order the tree walk visits them in.
//! Serialization re-sorts them into git's canonical order, where a directory compares
//! as if its name ended with `/`.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::io::{BufRead, Write};

/// Git tree object representing one directory level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    entries: BTreeMap<OsString, DatabaseEntry>,
}

impl Tree {
    /// Add or replace the entry called `name`
    ///
    /// # Arguments
    ///
    /// * `name` - Raw file name of the entry, kept byte for byte
    /// * `entry` - Object id and mode recorded under that name
    ///
    /// # Returns
    ///
    /// An error if `name` is empty or contains `/` or a NUL byte
    pub fn insert(&mut self, name: impl Into<OsString>, entry: DatabaseEntry) -> anyhow::Result<()> {
        let name = name.into();
        let bytes = name.as_encoded_bytes();
        if bytes.is_empty() || bytes.contains(&b'/') || bytes.contains(&0) {
            anyhow::bail!("Invalid tree entry name: {:?}", name);
        }

        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: impl AsRef<OsStr>) -> Option<&DatabaseEntry> {
        self.entries.get(name.as_ref())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&OsString, &DatabaseEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (OsString, DatabaseEntry)> {
        self.entries.into_iter()
    }

    fn canonical_order(&self) -> Vec<(&OsString, &DatabaseEntry)> {
        let mut entries = self.entries.iter().collect::<Vec<_>>();
        entries.sort_by_cached_key(|(name, entry)| {
            let mut key = name.as_encoded_bytes().to_vec();
            if entry.is_tree() {
                key.push(b'/');
            }
            key
        });
        entries
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();

        for (name, entry) in self.canonical_order() {
            let header = format!("{:o} ", entry.mode.as_u32());
            content_bytes.write_all(header.as_bytes())?;
            content_bytes.write_all(name.as_encoded_bytes())?;
            content_bytes.push(0);
            entry.oid.write_h40_to(&mut content_bytes)?;
        }

        Ok(with_header(self.object_type(), &content_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            if mode_bytes.pop() != Some(b' ') {
                return Err(anyhow::anyhow!("unexpected EOF in mode"));
            }
            let mode = EntryMode::from_octal_str(std::str::from_utf8(&mode_bytes)?)?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(anyhow::anyhow!("unexpected EOF in name"));
            }
            let name = name_from_bytes(name_bytes.clone());

            let oid =
                ObjectId::read_h40_from(&mut reader).context("unexpected EOF in object id")?;

            entries.insert(name, DatabaseEntry::new(oid, mode));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}

#[cfg(unix)]
fn name_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

// Names outside unicode cannot be represented on these platforms.
#[cfg(not(unix))]
fn name_from_bytes(bytes: Vec<u8>) -> OsString {
    String::from_utf8_lossy(&bytes).into_owned().into()
}
