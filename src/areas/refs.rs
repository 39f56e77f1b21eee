//! Branch table and HEAD
//!
//! Branches are named pointers to commits; HEAD names the active branch.
//!
//! ## File Format
//!
//! - `.vcs/HEAD`: the active branch name, plain text
//! - `.vcs/branches/<name>`: the branch's commit digest, plain text. An empty
//!   file is a branch without commits.
//!
//! Both are replaced atomically (temp file + rename), so a concurrent reader
//! sees either the old or the new pointer.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use anyhow::Context;
use derive_new::new;
use fake::rand;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name of the HEAD record
pub const HEAD_REF_NAME: &str = "HEAD";

const BRANCHES_DIR: &str = "branches";

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.vcs`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_REF_NAME)
    }

    pub fn branches_path(&self) -> PathBuf {
        self.path.join(BRANCHES_DIR)
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.branches_path().join(name.to_string())
    }

    /// Name of the branch HEAD points to
    ///
    /// The branch is not required to exist; see [`Refs::active_branch`].
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("failed to read HEAD at {:?}", head_path))?;
        let content = content.trim();

        BranchName::try_parse(content.to_string())
            .map_err(|_| VcsError::NoActiveBranch(content.to_string()).into())
    }

    /// Name of the branch HEAD points to, checked against the branch table
    ///
    /// Fails with `NoActiveBranch` when HEAD names a missing branch.
    pub fn active_branch(&self) -> anyhow::Result<BranchName> {
        let branch = self.current_branch()?;

        if !self.branch_exists(&branch) {
            return Err(VcsError::NoActiveBranch(branch.to_string()).into());
        }

        Ok(branch)
    }

    pub fn is_current_branch(&self, branch_name: &BranchName) -> anyhow::Result<bool> {
        Ok(branch_name == &self.current_branch()?)
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Commit a branch points to, `None` for a branch without commits
    ///
    /// Fails with `BranchNotFound` for an unknown branch.
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);

        if !branch_path.is_file() {
            return Err(VcsError::BranchNotFound(name.to_string()).into());
        }

        self.read_ref_file(&branch_path)
    }

    /// Point an existing branch at a new commit
    pub fn update_branch(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<()> {
        if !self.branch_exists(name) {
            return Err(VcsError::BranchNotFound(name.to_string()).into());
        }

        self.update_ref_file(&self.branch_path(name), oid.as_ref())?;
        tracing::debug!(branch = %name, oid = %oid, "branch updated");

        Ok(())
    }

    /// Create a branch pointing at `source_oid`
    ///
    /// An existing branch is only re-pointed when `force` is set. Returns the
    /// commit the branch pointed to before, if it was overwritten.
    pub fn create_branch(
        &self,
        name: &BranchName,
        source_oid: Option<&ObjectId>,
        force: bool,
    ) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);

        let previous = if branch_path.is_file() {
            if !force {
                return Err(VcsError::BranchAlreadyExists(name.to_string()).into());
            }
            self.read_ref_file(&branch_path)?
        } else {
            None
        };

        // a file or directory of the same name blocks hierarchical names
        if branch_path.is_dir() {
            anyhow::bail!("branch {} conflicts with existing branches below it", name);
        }

        self.update_ref_file(&branch_path, source_oid.map(|oid| oid.as_ref()).unwrap_or(""))?;
        tracing::debug!(branch = %name, oid = ?source_oid.map(ToString::to_string), "branch created");

        Ok(previous)
    }

    /// Remove a branch and return the commit it pointed to
    pub fn delete_branch(&self, name: &BranchName) -> anyhow::Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        let oid = self.read_branch(name)?;

        std::fs::remove_file(&branch_path)
            .with_context(|| format!("failed to delete branch file at {:?}", branch_path))?;
        self.prune_branch_empty_parent_dirs(&branch_path)?;

        Ok(oid)
    }

    /// Make `name` the active branch
    pub fn set_head(&self, name: &BranchName) -> anyhow::Result<()> {
        self.update_ref_file(&self.head_path(), name.as_ref())
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> anyhow::Result<Vec<BranchName>> {
        let branches_path = self.branches_path();

        let mut branches = WalkDir::new(&branches_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&branches_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn read_ref_file(&self, path: &Path) -> anyhow::Result<Option<ObjectId>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read ref file at {:?}", path))?;
        let content = content.trim();

        if content.is_empty() {
            Ok(None)
        } else {
            Ok(Some(ObjectId::try_parse(content.to_string()).with_context(
                || format!("corrupted ref file at {:?}", path),
            )?))
        }
    }

    fn update_ref_file(&self, path: &Path, raw_ref: &str) -> anyhow::Result<()> {
        let parent = path
            .parent()
            .with_context(|| format!("invalid ref path {:?}", path))?;
        // create all the parent directories if they don't exist
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create parent directories for ref file at {:?}", path)
        })?;

        let temp_path = parent.join(format!(".tmp-ref-{}", rand::random::<u32>()));
        let mut ref_file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&temp_path)
            .with_context(|| format!("failed to open ref file at {:?}", temp_path))?;
        ref_file.write_all(raw_ref.as_bytes())?;
        ref_file.sync_all()?;

        std::fs::rename(&temp_path, path)
            .with_context(|| format!("failed to replace ref file at {:?}", path))?;

        Ok(())
    }

    fn prune_branch_empty_parent_dirs(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent()
            && parent != self.branches_path().as_path()
            && parent.read_dir()?.next().is_none()
        {
            std::fs::remove_dir(parent).with_context(|| {
                format!("failed to remove empty branch directory at {:?}", parent)
            })?;
            self.prune_branch_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
