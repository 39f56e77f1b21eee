use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Result;
use bytes::Bytes;
use std::io::BufRead;

/// Canonical payload of an object, the bytes its digest is computed over
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

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        Ok(ObjectId::hash(&content))
    }
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}
