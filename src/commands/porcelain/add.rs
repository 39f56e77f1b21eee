use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Stage files and directories for the next commit
    ///
    /// Every path is resolved before anything is staged, so a missing path
    /// (`FileNotFound`) leaves the index unchanged. Files matching an ignore
    /// rule are reported and skipped.
    pub async fn add(&mut self, paths: &[String]) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let _lock = self.lock().await?;

        let index = self.index();
        let mut index = index.lock().await;

        // Resolve each provided path and expand it if it's a directory
        let files = paths
            .iter()
            .map(|path| {
                let relative_path = self.workspace().resolve(Path::new(path))?;
                self.workspace().list_files(&relative_path)
            })
            .collect::<anyhow::Result<Vec<_>>>()?
            .into_iter()
            .flatten();

        let ignore_rules = self.ignore_rules()?;

        for file in files {
            if ignore_rules.is_ignored(&file, false) {
                tracing::info!(path = ?file, "skipping ignored file");
                writeln!(self.writer(), "Ignored file: {}", file.display())?;
                continue;
            }

            let blob = Blob::new(self.workspace().read_file(&file)?);
            self.database().store(&blob)?;
            let blob_id = index.add(&blob)?;

            tracing::debug!(path = ?file, oid = %blob_id, "file staged");
            writeln!(self.writer(), "Staged {}", file.display())?;
        }

        Ok(())
    }
}
