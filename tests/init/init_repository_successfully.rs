use crate::common::command::{read_branch, read_head, repository_dir, run_vcs_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let repository_path = repository_dir.path().canonicalize()?.join(".vcs");

    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Initialized empty repository in"))
        .stdout(predicate::str::contains(repository_path.display().to_string()));

    for dir in ["blobs", "commits", "branches", "index"] {
        assert!(repository_path.join(dir).is_dir(), "{} should exist", dir);
    }
    assert_eq!(read_head(repository_dir.path()), "main");
    assert_eq!(read_branch(repository_dir.path(), "main"), None);

    Ok(())
}

#[rstest]
fn init_repository_at_given_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    run_vcs_command(repository_dir.path(), &["init", "nested/project"])
        .assert()
        .success();

    let project_path = repository_dir.path().join("nested").join("project");
    assert!(project_path.join(".vcs").join("HEAD").is_file());
    assert_eq!(read_head(&project_path), "main");

    Ok(())
}
