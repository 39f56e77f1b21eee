use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::lock::{self, LOCK_FILE_NAME, RepositoryLock};
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::ignore::IGNORE_FILE_NAME;
use crate::artifacts::ignore::ignore_rules::IgnoreRules;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::VcsError;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Name of the repository directory inside the workspace root
pub const REPOSITORY_DIR: &str = ".vcs";

/// Handle on one repository
///
/// Owns the location of the repository and every component operating on it.
/// Components keep no cached state, so each operation re-reads disk.
pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    index: Arc<Mutex<Index>>,
    database: Database,
    workspace: Workspace,
    refs: Refs,
}

impl Repository {
    /// Open the repository rooted at `path`, creating the directory if needed
    ///
    /// The repository itself does not have to exist yet (see `init`).
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);

        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;
        let repository_path = path.join(REPOSITORY_DIR);

        let index = Index::new(repository_path.join("index").into_boxed_path());
        let database = Database::new(repository_path.clone().into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(repository_path.into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: Arc::new(Mutex::new(index)),
            database,
            workspace,
            refs,
        })
    }

    /// Open the repository containing `start`, searching parent directories
    ///
    /// Fails with `NotARepository` if no ancestor holds a repository.
    pub fn discover(start: &Path, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let start = start.canonicalize()?;

        let root = start
            .ancestors()
            .find(|candidate| candidate.join(REPOSITORY_DIR).is_dir())
            .ok_or_else(|| VcsError::NotARepository(start.clone()))?;

        Self::new(&root.to_string_lossy(), writer)
    }

    /// Workspace root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Repository directory (`<root>/.vcs`)
    pub fn repository_path(&self) -> PathBuf {
        self.path.join(REPOSITORY_DIR)
    }

    pub fn is_initialized(&self) -> bool {
        self.repository_path().is_dir()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(VcsError::NotARepository(self.path.to_path_buf()).into())
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&self) -> Arc<Mutex<Index>> {
        self.index.clone()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Take the repository-wide lock guarding mutating operations
    pub async fn lock(&self) -> anyhow::Result<RepositoryLock> {
        RepositoryLock::acquire(
            &self.repository_path().join(LOCK_FILE_NAME),
            lock::timeout_from_env(),
        )
        .await
    }

    pub fn ignore_rules(&self) -> anyhow::Result<IgnoreRules> {
        IgnoreRules::load(&self.path, &self.repository_path().join(IGNORE_FILE_NAME))
    }

    /// Name of the active branch
    pub fn current_branch(&self) -> anyhow::Result<BranchName> {
        self.refs.current_branch()
    }

    /// Latest commit of a branch, `None` if it has no commits
    pub fn branch_head(&self, name: &str) -> anyhow::Result<Option<ObjectId>> {
        let name = BranchName::try_parse(name.to_string())
            .map_err(|_| VcsError::BranchNotFound(name.to_string()))?;

        self.refs.read_branch(&name)
    }

    /// Lazy newest-to-oldest walk starting at `start`
    pub fn history(&self, start: Option<ObjectId>) -> RevList<'_> {
        RevList::new(&self.database, start)
    }
}
