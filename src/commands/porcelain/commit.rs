use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Record the staged files as a new commit on the active branch
    ///
    /// Reading the index, storing the commit, moving the branch and clearing
    /// the index all happen under the repository lock.
    pub async fn commit(&mut self, message: &str) -> anyhow::Result<ObjectId> {
        self.ensure_initialized()?;
        let _lock = self.lock().await?;

        let index = self.index();
        let mut index = index.lock().await;

        let branch = self.refs().active_branch()?;
        let parent = self.refs().read_branch(&branch)?;

        let files = index.snapshot()?;
        if files.is_empty() {
            tracing::warn!(branch = %branch, "committing with nothing staged");
        }

        let is_root = match parent {
            Some(_) => "",
            None => " (root-commit)",
        };

        let timestamp = Commit::load_timestamp_from_env()?;
        let message = message.trim().to_string();

        let commit = Commit::new(parent, files, timestamp, message);
        let commit_id = self.database().store(&commit)?;
        self.refs().update_branch(&branch, &commit_id)?;
        index.clear()?;

        tracing::info!(branch = %branch, oid = %commit_id, "commit created");
        writeln!(
            self.writer(),
            "[{}{} {}] {}",
            branch,
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}
