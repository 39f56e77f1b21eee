use crate::areas::repository::REPOSITORY_DIR;
use crate::errors::VcsError;
use anyhow::Context;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 1] = [REPOSITORY_DIR];

/// Working tree the repository tracks
#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a user-supplied path to one relative to the workspace root
    ///
    /// Relative paths are resolved against the current directory. Fails with
    /// `FileNotFound` if the path does not exist.
    pub fn resolve(&self, path: &Path) -> anyhow::Result<PathBuf> {
        let absolute_path = match path.canonicalize() {
            Ok(absolute_path) => absolute_path,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(VcsError::FileNotFound(path.to_path_buf()).into());
            }
            Err(error) => {
                return Err(error).with_context(|| format!("Unable to resolve path {:?}", path));
            }
        };

        absolute_path
            .strip_prefix(&self.path)
            .map(PathBuf::from)
            .with_context(|| format!("Path {:?} is outside of the repository", path))
    }

    /// List the files below a workspace-relative path
    ///
    /// A file lists as itself; a directory is walked recursively. The
    /// repository directory is skipped. Results are relative to the workspace
    /// root and sorted.
    pub fn list_files(&self, relative_path: &Path) -> anyhow::Result<Vec<PathBuf>> {
        let root_file_path = self.path.join(relative_path);

        if !root_file_path.exists() {
            return Err(VcsError::FileNotFound(relative_path.to_path_buf()).into());
        }

        if Self::is_ignored(relative_path) {
            return Ok(Vec::new());
        }

        if root_file_path.is_dir() {
            Ok(WalkDir::new(&root_file_path)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| {
                    entry
                        .path()
                        .strip_prefix(self.path.as_ref())
                        .map(|path| !Self::is_ignored(path))
                        .unwrap_or(true)
                })
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| self.check_if_not_ignored_file_path(entry.path()))
                .collect::<Vec<_>>())
        } else {
            Ok(vec![relative_path.to_path_buf()])
        }
    }

    fn is_ignored(path: &Path) -> bool {
        // Check if any component of the path is in IGNORED_PATHS
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                let name_str = name.to_string_lossy();
                IGNORED_PATHS.contains(&name_str.as_ref())
            } else {
                false
            }
        })
    }

    fn check_if_not_ignored_file_path(&self, path: &Path) -> Option<PathBuf> {
        let relative_path = path.strip_prefix(self.path.as_ref()).ok()?;

        if path.is_file() && !Self::is_ignored(relative_path) {
            Some(relative_path.to_path_buf())
        } else {
            None
        }
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<Bytes> {
        let file_path = self.path.join(file_path);

        let content = std::fs::read(&file_path)
            .with_context(|| format!("Unable to read file {:?}", file_path))?;

        Ok(content.into())
    }
}
