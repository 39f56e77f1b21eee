//! Content store
//!
//! Append-only object database keyed by digest. Blobs and commits live in
//! separate collections (`.vcs/blobs`, `.vcs/commits`), each fanned out by the
//! first two digest characters. Objects are never updated or deleted.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::VcsError;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

const COLLECTIONS: [ObjectType; 2] = [ObjectType::Commit, ObjectType::Blob];

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn collection_path(&self, object_type: ObjectType) -> PathBuf {
        self.path.join(object_type.collection())
    }

    pub fn object_path(&self, object_type: ObjectType, object_id: &ObjectId) -> PathBuf {
        self.collection_path(object_type).join(object_id.to_path())
    }

    pub fn contains(&self, object_type: ObjectType, object_id: &ObjectId) -> bool {
        self.object_path(object_type, object_id).exists()
    }

    /// Persist an object and return its digest
    ///
    /// Storing content that is already present is a no-op.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.object_path(object.object_type(), &object_id);

        if object_path.exists() {
            tracing::debug!(oid = %object_id, kind = %object.object_type(), "object already stored");
            return Ok(object_id);
        }

        let payload = object.serialize()?;
        let mut object_content = Vec::with_capacity(payload.len() + 16);
        write!(
            object_content,
            "{} {}\0",
            object.object_type().as_str(),
            payload.len()
        )?;
        object_content.write_all(&payload)?;

        std::fs::create_dir_all(
            object_path
                .parent()
                .context(format!("Invalid object path {}", object_path.display()))?,
        )
        .context(format!(
            "Unable to create object directory {}",
            object_path.display()
        ))?;

        self.write_object(object_path, object_content.into())?;
        tracing::debug!(oid = %object_id, kind = %object.object_type(), "object stored");

        Ok(object_id)
    }

    /// Load a commit, failing with `NotFound` if no commit has that digest
    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Commit, object_id)?;
        Commit::deserialize(object_reader)
            .with_context(|| format!("Corrupted commit object {}", object_id))
    }

    /// Load a blob, failing with `NotFound` if no blob has that digest
    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let object_reader = self.parse_object_as_bytes(ObjectType::Blob, object_id)?;
        Blob::deserialize(object_reader)
    }

    /// Load an object of any type
    pub fn parse_object(&self, object_id: &ObjectId) -> anyhow::Result<ObjectBox> {
        if self.contains(ObjectType::Commit, object_id) {
            Ok(ObjectBox::Commit(Box::new(
                self.parse_object_as_commit(object_id)?,
            )))
        } else if self.contains(ObjectType::Blob, object_id) {
            Ok(ObjectBox::Blob(Box::new(self.parse_object_as_blob(object_id)?)))
        } else {
            Err(VcsError::NotFound(object_id.to_string()).into())
        }
    }

    fn parse_object_as_bytes(
        &self,
        expected_type: ObjectType,
        object_id: &ObjectId,
    ) -> anyhow::Result<impl BufRead> {
        let object_path = self.object_path(expected_type, object_id);
        if !object_path.exists() {
            return Err(VcsError::NotFound(object_id.to_string()).into());
        }

        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;
        if object_type != expected_type {
            anyhow::bail!(
                "Object {} is a {}, expected a {}",
                object_id,
                object_type,
                expected_type
            );
        }

        Ok(object_reader)
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
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

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }

    /// Find all objects whose digest starts with the given prefix.
    ///
    /// Searches both collections. An empty result means no match; more than
    /// one match means the prefix is ambiguous.
    pub fn find_objects_by_prefix(&self, prefix: &str) -> anyhow::Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(matches);
        }

        for object_type in COLLECTIONS {
            let collection = self.collection_path(object_type);
            if !collection.is_dir() {
                continue;
            }

            for dir in std::fs::read_dir(&collection)? {
                let dir = dir?;
                let dir_name = dir.file_name().to_string_lossy().to_string();
                let shared = prefix.len().min(dir_name.len());

                if !dir.path().is_dir() || !dir_name.starts_with(&prefix[..shared]) {
                    continue;
                }

                for entry in std::fs::read_dir(dir.path())? {
                    let file_name = entry?.file_name().to_string_lossy().to_string();
                    let full_oid = format!("{}{}", dir_name, file_name);

                    if full_oid.starts_with(&prefix)
                        && let Ok(oid) = ObjectId::try_parse(full_oid)
                    {
                        matches.push(oid);
                    }
                }
            }
        }

        matches.sort();
        matches.dedup();

        Ok(matches)
    }
}
