use crate::artifacts::database::store_error::StoreError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

/// Loose object database rooted at `.git/objects`
///
/// Reads never mutate the store, so one database can serve any number of
/// concurrent walks.
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self, object_id: &ObjectId) -> bool {
        self.path.join(object_id.to_path()).is_file()
    }

    /// Store an object unless an object with the same id already exists
    ///
    /// # Returns
    ///
    /// The id of the stored object
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object.serialize()?)?;
            tracing::trace!(oid = %object_id, kind = %object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(Tree::deserialize(object_reader)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_of_type(object_id, ObjectType::Blob)?;
        Blob::deserialize(object_reader)
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        let object_reader = self.parse_object_of_type(object_id, ObjectType::Tree)?;
        Tree::deserialize(object_reader).with_context(|| format!("Corrupt tree object {object_id}"))
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let object_reader = self.parse_object_of_type(object_id, ObjectType::Commit)?;
        Commit::deserialize(object_reader)
            .with_context(|| format!("Corrupt commit object {object_id}"))
    }

    /// Get the type of an object without parsing its content
    pub fn get_object_type(&self, object_id: &ObjectId) -> anyhow::Result<ObjectType> {
        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(object_type)
    }

    fn parse_object_of_type(
        &self,
        object_id: &ObjectId,
        expected: ObjectType,
    ) -> anyhow::Result<impl BufRead> {
        let (actual, object_reader) = self.parse_object_as_bytes(object_id)?;

        if actual != expected {
            return Err(StoreError::UnexpectedObjectType {
                oid: object_id.clone(),
                expected,
                actual,
            }
            .into());
        }

        Ok(object_reader)
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.read_object(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let (object_type, size) = ObjectType::parse_header(&mut object_reader)
            .with_context(|| format!("Corrupt object header in {object_id}"))?;
        let remaining = object_reader.get_ref().len() - object_reader.position() as usize;
        if remaining != size {
            anyhow::bail!("Corrupt object {object_id}: expected {size} bytes, found {remaining}");
        }

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());
        tracing::trace!(oid = %object_id, "reading object");

        let object_content = std::fs::read(&object_path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::MissingObject {
                    oid: object_id.clone(),
                }
            } else {
                StoreError::Io {
                    path: object_path.clone(),
                    source,
                }
            }
        })?;

        Self::decompress(object_content.into()).map_err(|source| {
            StoreError::Io {
                path: object_path,
                source,
            }
            .into()
        })
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// Used to resolve abbreviated OIDs to their full form. An empty result means
    /// the prefix is unknown; more than one match means it is ambiguous.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        let dir_names = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255).map(|i| format!("{:02x}", i)).collect()
        };

        for dir_name in dir_names {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path)? {
                let full_oid = format!("{}{}", dir_name, entry?.file_name().to_string_lossy());

                if full_oid.starts_with(&prefix)
                    && let Ok(oid) = ObjectId::try_parse(full_oid)
                {
                    matches.push(oid);
                }
            }
        }

        matches.sort();
        Ok(matches)
    }
}
