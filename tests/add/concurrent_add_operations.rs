use crate::common::command::{run_vcs_command, staged_entries};
use assert_fs::fixture::{FileWriteStr, PathChild};
use std::time::Duration;

#[tokio::test]
async fn concurrent_add_operations_keep_both_files() -> Result<(), Box<dyn std::error::Error>> {
    let dir = assert_fs::TempDir::new()?;
    run_vcs_command(dir.path(), &["init"]).assert().success();

    dir.child("alice.rb").write_str("puts 'Hello from Alice'")?;
    dir.child("bob.py").write_str("print('Hello from Bob')")?;

    let alice_dir = dir.path().to_path_buf();
    let bob_dir = dir.path().to_path_buf();

    let (alice_result, bob_result) = tokio::join!(
        tokio::task::spawn_blocking(move || {
            run_vcs_command(&alice_dir, &["add", "alice.rb"])
                .assert()
                .success();
        }),
        tokio::task::spawn_blocking(move || {
            std::thread::sleep(Duration::from_millis(10));
            run_vcs_command(&bob_dir, &["add", "bob.py"])
                .assert()
                .success();
        })
    );

    alice_result.expect("Alice's add should complete successfully");
    bob_result.expect("Bob's add should complete successfully");

    assert_eq!(staged_entries(dir.path()).len(), 2);

    Ok(())
}
