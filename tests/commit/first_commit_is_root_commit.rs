use crate::common::command::{
    cat_commit, empty_repository_dir, read_branch, run_vcs_command, staged_entries, vcs_commit,
};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn first_commit_is_root_commit(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = empty_repository_dir;
    write_file(FileSpec::new(
        repository_dir.path().join("a.txt"),
        "hello".to_string(),
    ));
    run_vcs_command(repository_dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    vcs_commit(repository_dir.path(), "Initial commit\n\nWith a body")
        .assert()
        .success()
        .stdout(predicate::str::is_match(
            r"^\[main \(root-commit\) [0-9a-f]{7}\] Initial commit\n$",
        )?);

    let oid = read_branch(repository_dir.path(), "main").expect("main should have a commit");
    let text = cat_commit(repository_dir.path(), &oid);

    // blob digest of "hello"
    let blob = "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d";
    assert_eq!(
        text,
        format!(
            "timestamp 2023-01-01T12:00:00Z\nfile {blob} {blob}\n\nInitial commit\n\nWith a body"
        )
    );
    assert!(staged_entries(repository_dir.path()).is_empty());

    Ok(())
}

#[rstest]
fn commit_with_nothing_staged_is_allowed(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = empty_repository_dir;

    vcs_commit(repository_dir.path(), "empty")
        .assert()
        .success();

    let oid = read_branch(repository_dir.path(), "main").expect("main should have a commit");
    assert_eq!(
        cat_commit(repository_dir.path(), &oid),
        "timestamp 2023-01-01T12:00:00Z\n\nempty"
    );

    Ok(())
}

#[rstest]
fn commit_requires_a_message(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    run_vcs_command(empty_repository_dir.path(), &["commit"])
        .assert()
        .code(2);

    Ok(())
}
