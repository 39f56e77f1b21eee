use crate::common::command::{init_repository_dir, read_head, run_vcs_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case("ghost")]
#[case("not..valid")]
fn checkout_unknown_branch(
    init_repository_dir: TempDir,
    #[case] branch_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_vcs_command(dir, &["checkout", branch_name])
        .assert()
        .code(6)
        .stderr(predicate::str::starts_with("error: branch"));

    assert_eq!(read_head(dir), "main");

    Ok(())
}
