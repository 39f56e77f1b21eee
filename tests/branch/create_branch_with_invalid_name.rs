use crate::common::command::{init_repository_dir, run_vcs_command};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

#[rstest]
#[case(".hidden")]
#[case("feature..x")]
#[case("ends-with/")]
#[case("with space")]
#[case("branch.lock")]
#[case("what?")]
#[case("@")]
fn create_branch_with_invalid_name(
    init_repository_dir: TempDir,
    #[case] branch_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let dir = init_repository_dir.path();

    run_vcs_command(dir, &["branch", branch_name])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("invalid branch name"));

    assert!(!dir.join(".vcs").join("branches").join(branch_name).exists());

    Ok(())
}
