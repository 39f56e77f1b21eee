use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::VcsError;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    /// Create an empty repository with a `main` branch and no commits
    ///
    /// Fails with `AlreadyInitialized`, changing nothing, if the repository
    /// directory exists.
    pub async fn init(&mut self) -> anyhow::Result<()> {
        let repository_path = self.repository_path();

        // create_dir is atomic: of two racing inits exactly one succeeds
        match fs::create_dir(&repository_path) {
            Ok(()) => {}
            Err(error) if error.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(VcsError::AlreadyInitialized(self.path().to_path_buf()).into());
            }
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("Failed to create repository directory {:?}", repository_path)
                });
            }
        }

        for object_type in [ObjectType::Blob, ObjectType::Commit] {
            let collection_path = self.database().collection_path(object_type);
            fs::create_dir_all(&collection_path)
                .with_context(|| format!("Failed to create {:?}", collection_path))?;
        }

        fs::create_dir_all(self.refs().branches_path())
            .context("Failed to create branches directory")?;

        let index = self.index();
        let index = index.lock().await;
        fs::create_dir_all(index.path()).context("Failed to create index directory")?;

        let default_branch = BranchName::default_branch();
        self.refs()
            .create_branch(&default_branch, None, false)
            .context("Failed to create default branch")?;
        self.refs()
            .set_head(&default_branch)
            .context("Failed to create initial HEAD")?;

        tracing::info!(path = ?repository_path, "repository initialized");
        writeln!(
            self.writer(),
            "Initialized empty repository in {}",
            repository_path.display()
        )?;

        Ok(())
    }
}
