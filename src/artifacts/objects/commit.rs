//! Commit object
//!
//! A commit records a snapshot of the staging index together with:
//! - A message
//! - A UTC timestamp
//! - The digest of its parent commit (absent for the first commit)
//! - The file manifest: staged-file identifier mapped to blob digest
//!
//! ## Format
//!
//! Payload (field order is fixed and files are sorted by identifier, so equal
//! commits always serialize to the same bytes):
//! ```text
//! timestamp <RFC 3339, UTC, second precision>
//! parent <parent-sha>
//! file <identifier> <blob-sha>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, SecondsFormat, Timelike, Utc};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "VCS_COMMIT_DATE";

/// Ordered manifest of a commit's files
pub type FileManifest = BTreeMap<String, ObjectId>;

/// Immutable commit record
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit ID (None for the first commit of a lineage)
    parent: Option<ObjectId>,
    /// Snapshot of the staging index at commit time
    files: FileManifest,
    timestamp: DateTime<Utc>,
    message: String,
}

impl Commit {
    /// Create a new commit
    ///
    /// The timestamp is truncated to whole seconds, the precision it is
    /// stored with.
    pub fn new(
        parent: Option<ObjectId>,
        files: FileManifest,
        timestamp: DateTime<Utc>,
        message: String,
    ) -> Self {
        Commit {
            parent,
            files,
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
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

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn files(&self) -> &FileManifest {
        &self.files
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    /// Timestamp for a new commit
    ///
    /// Reads `VCS_COMMIT_DATE` (RFC 3339 or `%Y-%m-%d %H:%M:%S %z`) and falls
    /// back to the current time when it is not set.
    pub fn load_timestamp_from_env() -> anyhow::Result<DateTime<Utc>> {
        match std::env::var(COMMIT_DATE_ENV) {
            Ok(date_str) => {
                let timestamp = DateTime::parse_from_rfc3339(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .with_context(|| format!("invalid {COMMIT_DATE_ENV}: {date_str}"))?;

                Ok(timestamp.with_timezone(&Utc))
            }
            Err(_) => Ok(Utc::now()),
        }
    }

    fn header_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "timestamp {}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
        )];

        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent));
        }
        for (name, oid) in &self.files {
            lines.push(format!("file {} {}", name, oid));
        }

        lines
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut object_content = self.header_lines();
        object_content.push(String::new());
        object_content.push(self.message.to_string());

        Ok(Bytes::from(object_content.join("\n")))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;
        let mut lines = header.lines();

        let timestamp_line = lines
            .next()
            .context("Invalid commit object: missing timestamp line")?;
        let timestamp = timestamp_line
            .strip_prefix("timestamp ")
            .context("Invalid commit object: invalid timestamp line")?;
        let timestamp = DateTime::parse_from_rfc3339(timestamp)
            .context("Invalid commit object: malformed timestamp")?
            .with_timezone(&Utc);

        let mut parent = None;
        let mut files = FileManifest::new();

        for line in lines {
            if let Some(parent_oid) = line.strip_prefix("parent ") {
                if parent.is_some() {
                    anyhow::bail!("Invalid commit object: more than one parent");
                }
                parent = Some(ObjectId::try_parse(parent_oid.to_string())?);
            } else if let Some(file) = line.strip_prefix("file ") {
                let (name, oid) = file
                    .rsplit_once(' ')
                    .context("Invalid commit object: invalid file line")?;
                files.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
            } else {
                anyhow::bail!("Invalid commit object: unexpected line {:?}", line);
            }
        }

        Ok(Self::new(parent, files, timestamp, message.to_string()))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = self.header_lines();
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
