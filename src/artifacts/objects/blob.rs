//! Blob object
//!
//! Blobs store file content. They hold only the raw bytes, without a file
//! name or any other metadata.
//!
//! ## Format
//!
//! Payload: the content bytes, unchanged. The digest of a blob is therefore
//! the SHA-1 of the file content itself.

use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Immutable file content
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &Bytes {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        Ok(self.content.clone())
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the frame header has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        Ok(Self::new(Bytes::from(content)))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).to_string()
    }
}
