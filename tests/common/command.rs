use crate::common::COMMIT_DATE;
use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn empty_repository_dir(repository_dir: TempDir) -> TempDir {
    run_vcs_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

#[fixture]
pub fn init_repository_dir(empty_repository_dir: TempDir) -> TempDir {
    let repository_dir = empty_repository_dir;

    let file1 = FileSpec::new(repository_dir.path().join("1.txt"), "one".to_string());
    write_file(file1);

    let file2 = FileSpec::new(
        repository_dir.path().join("a").join("2.txt"),
        "two".to_string(),
    );
    write_file(file2);

    let file3 = FileSpec::new(
        repository_dir.path().join("a").join("b").join("3.txt"),
        "three".to_string(),
    );
    write_file(file3);

    run_vcs_command(repository_dir.path(), &["add", "."])
        .assert()
        .success();

    vcs_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

#[fixture]
pub fn repository_with_multiple_commits(empty_repository_dir: TempDir) -> TempDir {
    let repository_dir = empty_repository_dir;

    for (index, message) in ["First commit", "Second commit", "Third commit"]
        .iter()
        .enumerate()
    {
        let file = FileSpec::new(
            repository_dir.path().join(format!("file{}.txt", index + 1)),
            format!("content {}", index + 1),
        );
        write_file(file);

        run_vcs_command(repository_dir.path(), &["add", "."])
            .assert()
            .success();
        vcs_commit(repository_dir.path(), message)
            .assert()
            .success();
    }

    repository_dir
}

pub fn run_vcs_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("vcs").expect("Failed to find vcs binary");
    cmd.envs(vec![("NO_PAGER", "1")]);
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn vcs_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_vcs_command(dir, &["commit", "-m", message]);
    cmd.env("VCS_COMMIT_DATE", COMMIT_DATE);
    cmd
}

/// Commit id a branch points to, `None` for a branch without commits
pub fn read_branch(dir: &Path, branch: &str) -> Option<String> {
    let content = std::fs::read_to_string(dir.join(".vcs").join("branches").join(branch))
        .unwrap_or_else(|e| panic!("Failed to read branch {}: {}", branch, e));
    let content = content.trim();

    (!content.is_empty()).then(|| content.to_string())
}

pub fn read_head(dir: &Path) -> String {
    std::fs::read_to_string(dir.join(".vcs").join("HEAD"))
        .expect("Failed to read HEAD")
        .trim()
        .to_string()
}

/// Names of the staged entries
pub fn staged_entries(dir: &Path) -> Vec<String> {
    let mut entries = std::fs::read_dir(dir.join(".vcs").join("index"))
        .expect("Failed to read index directory")
        .map(|entry| {
            entry
                .expect("Failed to read index entry")
                .file_name()
                .to_string_lossy()
                .to_string()
        })
        .collect::<Vec<_>>();
    entries.sort();
    entries
}

/// Canonical text of a stored commit, via `cat-file`
pub fn cat_commit(dir: &Path, oid: &str) -> String {
    let output = run_vcs_command(dir, &["cat-file", oid])
        .output()
        .expect("Failed to run cat-file");
    assert!(output.status.success(), "cat-file {} failed", oid);

    String::from_utf8(output.stdout).expect("commit text is not utf-8")
}

/// Parent line of a stored commit
pub fn get_parent_commit_id(dir: &Path, oid: &str) -> Option<String> {
    cat_commit(dir, oid)
        .lines()
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix("parent ").map(ToString::to_string))
}
