use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// Prefix `content` with the `<type> <size>\0` header shared by every object kind.
pub fn with_header(object_type: ObjectType, content: &[u8]) -> Bytes {
    let header = format!("{} {}\0", object_type.as_str(), content.len());

    let mut object_bytes = Vec::with_capacity(header.len() + content.len());
    object_bytes.extend_from_slice(header.as_bytes());
    object_bytes.extend_from_slice(content);

    Bytes::from(object_bytes)
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn object_type(&self) -> ObjectType {
        match self {
            ObjectBox::Blob(_) => ObjectType::Blob,
            ObjectBox::Tree(_) => ObjectType::Tree,
            ObjectBox::Commit(_) => ObjectType::Commit,
        }
    }
}
