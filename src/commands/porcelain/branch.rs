use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::errors::VcsError;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create a branch at the active branch's head
    ///
    /// An existing branch is re-pointed only with `force`; otherwise the
    /// call fails with `BranchAlreadyExists`.
    pub async fn branch(&mut self, name: &str, force: bool) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let branch_name = BranchName::try_parse(name.to_string())?;
        let _lock = self.lock().await?;

        let current_branch = self.refs().active_branch()?;
        let source_oid = self.refs().read_branch(&current_branch)?;

        let existed = self.refs().branch_exists(&branch_name);
        self.refs()
            .create_branch(&branch_name, source_oid.as_ref(), force)?;

        let action = if existed { "Reset" } else { "Created" };
        tracing::info!(branch = %branch_name, source = %current_branch, "branch updated");
        writeln!(self.writer(), "{} branch {}", action, branch_name)?;

        Ok(())
    }

    /// Print every branch, marking the active one with `*`
    pub fn list_branches(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let current_branch = self.refs().current_branch()?;

        for branch in self.refs().list_branches()? {
            if branch == current_branch {
                writeln!(self.writer(), "* {}", branch.to_string().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch)?;
            }
        }

        Ok(())
    }

    /// Remove a branch; the active branch cannot be deleted
    pub async fn delete_branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let branch_name = BranchName::try_parse(name.to_string())
            .map_err(|_| VcsError::BranchNotFound(name.to_string()))?;
        let _lock = self.lock().await?;

        if self.refs().is_current_branch(&branch_name)? {
            return Err(VcsError::CannotDeleteCurrentBranch(branch_name.to_string()).into());
        }

        let oid = self.refs().delete_branch(&branch_name)?;

        tracing::info!(branch = %branch_name, "branch deleted");
        match oid {
            Some(oid) => writeln!(
                self.writer(),
                "Deleted branch {} (was {})",
                branch_name,
                oid.to_short_oid()
            )?,
            None => writeln!(self.writer(), "Deleted branch {}", branch_name)?,
        }

        Ok(())
    }
}
