use crate::areas::repository::Repository;
use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use std::io::Write;

/// Shortest object id prefix accepted by `cat-file`
const MIN_PREFIX_LENGTH: usize = 4;

impl Repository {
    /// Print a stored object given its full id or an unambiguous prefix
    ///
    /// Blobs are written byte for byte, commits in their canonical text.
    pub fn cat_file(&mut self, object_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let object_id = self.resolve_object_id(object_id)?;
        let object = self.database().parse_object(&object_id)?;

        match object {
            ObjectBox::Blob(blob) => self.writer().write_all(blob.content())?,
            commit @ ObjectBox::Commit(_) => write!(self.writer(), "{}", commit.display())?,
        }
        self.writer().flush()?;

        Ok(())
    }

    fn resolve_object_id(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        if prefix.len() < MIN_PREFIX_LENGTH {
            anyhow::bail!(
                "object id prefix {} is too short (at least {} characters)",
                prefix,
                MIN_PREFIX_LENGTH
            );
        }

        let mut candidates = self.database().find_objects_by_prefix(prefix)?;
        match candidates.len() {
            0 => Err(VcsError::NotFound(prefix.to_string()).into()),
            1 => Ok(candidates.remove(0)),
            _ => {
                let candidates = candidates
                    .iter()
                    .map(|oid| oid.to_short_oid())
                    .collect::<Vec<_>>()
                    .join(", ");
                anyhow::bail!("object id {} is ambiguous: {}", prefix, candidates)
            }
        }
    }
}
