use crate::CommitDisplayFormat;
use crate::areas::refs::HEAD_REF_NAME;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Branch to start from, the active branch if unset
    pub branch: Option<String>,
    pub oneline: bool,
    pub abbrev_commit: bool,
    pub format: CommitDisplayFormat,
}

/// Branch names pointing at each commit, used for decorations
type ReverseRefs = BTreeMap<ObjectId, Vec<BranchName>>;

impl Repository {
    /// Print the history of a branch, newest commit first
    ///
    /// The branch pointer is read once; commits made while the walk runs are
    /// not shown. A branch without commits prints nothing.
    pub fn log(&self, opts: &LogOptions) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let start = match &opts.branch {
            Some(branch) => self.branch_head(branch)?,
            None => {
                let branch = self.refs().active_branch()?;
                self.refs().read_branch(&branch)?
            }
        };

        let current_branch = self.refs().current_branch()?;
        let reverse_refs = self.reverse_refs()?;

        for entry in self.history(start) {
            let (commit_oid, commit) = entry?;

            let decoration = Self::commit_decoration(&commit_oid, &reverse_refs, &current_branch);
            self.display_commit(&commit_oid, &commit, &decoration, opts)?;
        }

        Ok(())
    }

    fn reverse_refs(&self) -> anyhow::Result<ReverseRefs> {
        let mut reverse_refs = ReverseRefs::new();

        for branch in self.refs().list_branches()? {
            if let Some(oid) = self.refs().read_branch(&branch)? {
                reverse_refs.entry(oid).or_default().push(branch);
            }
        }

        Ok(reverse_refs)
    }

    fn display_commit(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
        decoration: &str,
        opts: &LogOptions,
    ) -> anyhow::Result<()> {
        if opts.oneline {
            return self.show_commit_oneline(commit_oid, commit, decoration, true);
        }

        match opts.format {
            CommitDisplayFormat::Medium => {
                self.show_commit_medium(commit_oid, commit, decoration, opts.abbrev_commit)
            }
            CommitDisplayFormat::OneLine => {
                self.show_commit_oneline(commit_oid, commit, decoration, opts.abbrev_commit)
            }
        }
    }

    fn show_commit_medium(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
        decoration: &str,
        abbrev_commit: bool,
    ) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(
            writer,
            "{}{}",
            format!("commit {}", Self::abbrev_commit_id(commit_oid, abbrev_commit)).yellow(),
            decoration
        )?;
        writeln!(writer, "Date:   {}", commit.readable_timestamp())?;
        if let Some(parent) = commit.parent() {
            writeln!(
                writer,
                "Parent: {}",
                Self::abbrev_commit_id(parent, abbrev_commit)
            )?;
        }
        writeln!(writer)?;
        for message_line in commit.message().lines() {
            writeln!(writer, "    {}", message_line)?;
        }
        writeln!(writer)?;

        Ok(())
    }

    fn show_commit_oneline(
        &self,
        commit_oid: &ObjectId,
        commit: &Commit,
        decoration: &str,
        abbrev_commit: bool,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer(),
            "{}{} {}",
            Self::abbrev_commit_id(commit_oid, abbrev_commit).yellow(),
            decoration,
            commit.short_message()
        )?;

        Ok(())
    }

    /// ` (HEAD -> main, feature)` style suffix, empty if no branch points here
    fn commit_decoration(
        commit_oid: &ObjectId,
        reverse_refs: &ReverseRefs,
        current_branch: &BranchName,
    ) -> String {
        let Some(branches) = reverse_refs.get(commit_oid) else {
            return String::new();
        };

        let names = branches
            .iter()
            .map(|branch| {
                let name = branch.to_string().green().bold();
                if branch == current_branch {
                    format!("{} {}", format!("{HEAD_REF_NAME} ->").cyan().bold(), name)
                } else {
                    name.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");

        format!(" ({})", names)
    }

    fn abbrev_commit_id(oid: &ObjectId, abbrev_commit: bool) -> String {
        if abbrev_commit {
            oid.to_short_oid()
        } else {
            oid.to_string()
        }
    }
}
