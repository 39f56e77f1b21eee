use crate::common::command::{empty_repository_dir, run_vcs_command, staged_entries};
use crate::common::file::{FileSpec, write_file, write_generated_files};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
fn add_files_from_nested_directories(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = empty_repository_dir;

    write_file(FileSpec::new(
        repository_dir.path().join("a").join("b").join("deep.txt"),
        "deep".to_string(),
    ));
    let generated = write_generated_files(&repository_dir.path().join("a"), 3);

    run_vcs_command(repository_dir.path(), &["add", "a"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Staged a/b/deep.txt"));

    let distinct_contents = generated
        .iter()
        .map(|file| file.content.clone())
        .chain(std::iter::once("deep".to_string()))
        .collect::<std::collections::BTreeSet<_>>();
    assert_eq!(
        staged_entries(repository_dir.path()).len(),
        distinct_contents.len()
    );

    Ok(())
}

#[rstest]
fn add_never_stages_the_repository_directory(
    empty_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let repository_dir = empty_repository_dir;
    write_file(FileSpec::new(
        repository_dir.path().join("only.txt"),
        "only".to_string(),
    ));

    run_vcs_command(repository_dir.path(), &["add", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains(".vcs").not());

    assert_eq!(staged_entries(repository_dir.path()).len(), 1);

    Ok(())
}
