use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::VcsError;

impl Repository {
    /// Make `name` the active branch
    ///
    /// Only HEAD changes; the index and working files are left as they are.
    pub async fn checkout(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let target = BranchName::try_parse(name.to_string())
            .map_err(|_| VcsError::BranchNotFound(name.to_string()))?;
        let _lock = self.lock().await?;

        if !self.refs().branch_exists(&target) {
            return Err(VcsError::BranchNotFound(target.to_string()).into());
        }

        // an unreadable HEAD is simply overwritten
        let current = self.refs().current_branch().ok();
        if current.as_ref() == Some(&target) {
            eprintln!("Already on '{}'", target);
            return Ok(());
        }

        self.refs().set_head(&target)?;

        tracing::info!(branch = %target, "switched branch");
        eprintln!("Switched to branch '{}'", target);

        Ok(())
    }
}
