//! Staging index
//!
//! The index holds the content staged for the next commit. It lives in its
//! own directory (`.vcs/index`), separate from the content store: every staged
//! entry is a file named by the digest of its content and holding a copy of
//! that content.
//!
//! Because entries are keyed by content, two files with identical content
//! collapse into one entry and the original file names are not recorded.
//!
//! The index keeps no in-memory state; every call reads the directory.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::FileManifest;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};

const TEMP_PREFIX: &str = ".tmp-index-";

/// Staging area
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index directory (typically `.vcs/index`)
    path: Box<Path>,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stage a blob and return its identifier
    ///
    /// Staging content that is already staged is a no-op.
    pub fn add(&mut self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let blob_id = blob.object_id()?;
        let entry_path = self.entry_path(&blob_id);

        if entry_path.is_file() {
            tracing::debug!(oid = %blob_id, "content already staged");
            return Ok(blob_id);
        }

        std::fs::create_dir_all(&self.path)
            .with_context(|| format!("Unable to create index directory {:?}", self.path))?;

        let temp_path = self
            .path
            .join(format!("{TEMP_PREFIX}{}", rand::random::<u32>()));
        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("Unable to open index entry {:?}", temp_path))?;
        file.write_all(blob.content())
            .with_context(|| format!("Unable to write index entry {:?}", temp_path))?;

        std::fs::rename(&temp_path, &entry_path)
            .with_context(|| format!("Unable to rename index entry to {:?}", entry_path))?;

        Ok(blob_id)
    }

    /// Identifiers of all staged entries, sorted
    pub fn entries(&self) -> anyhow::Result<Vec<ObjectId>> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to read index directory {:?}", self.path))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                match ObjectId::try_parse(name) {
                    Ok(oid) => Some(oid),
                    Err(_) => {
                        tracing::warn!(path = ?entry.path(), "skipping foreign file in index");
                        None
                    }
                }
            })
            .collect::<Vec<_>>();
        entries.sort();

        Ok(entries)
    }

    pub fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.entries()?.is_empty())
    }

    /// Current staged set, identifier mapped to content digest
    ///
    /// The digest is recomputed from the staged bytes and must match the
    /// entry's identifier, otherwise the staged copy was altered after
    /// staging and the snapshot fails. The index is left untouched.
    pub fn snapshot(&self) -> anyhow::Result<FileManifest> {
        self.entries()?
            .into_iter()
            .map(|identifier| -> anyhow::Result<(String, ObjectId)> {
                let entry_path = self.entry_path(&identifier);
                let content = std::fs::read(&entry_path)
                    .with_context(|| format!("Unable to read index entry {:?}", entry_path))?;
                let digest = ObjectId::hash(&content);

                if digest != identifier {
                    tracing::error!(
                        entry = %identifier,
                        digest = %digest,
                        "staged content does not match its identifier"
                    );
                    anyhow::bail!(
                        "staged entry {} does not match its content digest {}",
                        identifier,
                        digest
                    );
                }

                Ok((identifier.to_string(), digest))
            })
            .collect()
    }

    /// Remove every staged entry
    pub fn clear(&mut self) -> anyhow::Result<()> {
        if !self.path.is_dir() {
            return Ok(());
        }

        for entry in std::fs::read_dir(&self.path)
            .with_context(|| format!("Unable to read index directory {:?}", self.path))?
        {
            let entry_path = entry?.path();
            if entry_path.is_file() {
                std::fs::remove_file(&entry_path)
                    .with_context(|| format!("Unable to remove index entry {:?}", entry_path))?;
            }
        }

        Ok(())
    }

    fn entry_path(&self, identifier: &ObjectId) -> PathBuf {
        self.path.join(identifier.to_string())
    }
}
