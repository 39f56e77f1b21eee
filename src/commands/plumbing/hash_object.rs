use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::errors::VcsError;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let object_path = Path::new(object_path);
        let content = match std::fs::read(object_path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(VcsError::FileNotFound(object_path.to_path_buf()).into());
            }
            Err(error) => return Err(error.into()),
        };

        let blob = Blob::new(content.into());

        let object_id = if write {
            self.ensure_initialized()?;
            self.database().store(&blob)?
        } else {
            blob.object_id()?
        };

        writeln!(self.writer(), "{}", object_id)?;

        Ok(())
    }
}
