use crate::common::READABLE_COMMIT_DATE;
use crate::common::command::{
    get_parent_commit_id, read_branch, repository_with_multiple_commits, run_vcs_command,
};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_multiple_commits_in_medium_format(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits.path();
    let third = read_branch(dir, "main").expect("main should have commits");
    let second = get_parent_commit_id(dir, &third).expect("third commit has a parent");
    let first = get_parent_commit_id(dir, &second).expect("second commit has a parent");

    let expected = format!(
        "commit {third} (HEAD -> main)\n\
         Date:   {READABLE_COMMIT_DATE}\n\
         Parent: {second}\n\
         \n    Third commit\n\n\
         commit {second}\n\
         Date:   {READABLE_COMMIT_DATE}\n\
         Parent: {first}\n\
         \n    Second commit\n\n\
         commit {first}\n\
         Date:   {READABLE_COMMIT_DATE}\n\
         \n    First commit\n\n"
    );

    let output = run_vcs_command(dir, &["log"]).output()?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout)?, expected);

    Ok(())
}

#[rstest]
fn medium_format_with_abbrev_commit(
    repository_with_multiple_commits: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = repository_with_multiple_commits.path();
    let third = read_branch(dir, "main").expect("main should have commits");

    let output = run_vcs_command(dir, &["log", "--abbrev-commit"]).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(
        stdout.lines().next(),
        Some(format!("commit {} (HEAD -> main)", &third[..7]).as_str())
    );

    Ok(())
}
