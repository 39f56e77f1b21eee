use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// History walk from a starting commit
///
/// Each call to `into_iter` starts a fresh walk from disk.
#[derive(Clone, new)]
pub struct RevList<'r> {
    database: &'r Database,
    start: Option<ObjectId>,
}

impl<'r> IntoIterator for RevList<'r> {
    type Item = anyhow::Result<(ObjectId, Commit)>;
    type IntoIter = RevListIntoIter<'r>;

    fn into_iter(self) -> Self::IntoIter {
        RevListIntoIter {
            database: self.database,
            current_commit_oid: self.start,
        }
    }
}

/// Newest-to-oldest iterator over a chain of commits
///
/// Ends after the root commit. A parent that cannot be loaded is yielded as
/// an error once and ends the walk, so a broken chain is never mistaken for
/// a complete history.
pub struct RevListIntoIter<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for RevListIntoIter<'_> {
    type Item = anyhow::Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(commit) => {
                // Move to the parent commit for the next iteration
                self.current_commit_oid = commit.parent().cloned();
                Some(Ok((commit_oid, commit)))
            }
            Err(error) => Some(Err(error)),
        }
    }
}
