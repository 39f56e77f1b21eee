use crate::common::command::{get_parent_commit_id, read_branch, run_vcs_command, vcs_commit};
use crate::common::file::{FileSpec, write_file};
use futures::future::join_all;

#[tokio::test]
async fn concurrent_commits_stay_linear() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_vcs_command(dir.path(), &["init"]).assert().success();
    write_file(FileSpec::new(dir.path().join("a.txt"), "a".to_string()));
    run_vcs_command(dir.path(), &["add", "a.txt"])
        .assert()
        .success();

    let commits = (0..3)
        .map(|index| {
            let dir = dir.path().to_path_buf();
            tokio::task::spawn_blocking(move || {
                vcs_commit(&dir, &format!("commit {}", index))
                    .assert()
                    .success();
            })
        })
        .collect::<Vec<_>>();

    for result in join_all(commits).await {
        result.expect("commit task should complete successfully");
    }

    // every commit landed on the chain, none was lost to a race
    let mut oid = read_branch(dir.path(), "main");
    let mut length = 0;
    while let Some(current) = oid {
        length += 1;
        oid = get_parent_commit_id(dir.path(), &current);
    }
    assert_eq!(length, 3);

    Ok(())
}
