use crate::common::command::{repository_dir, run_bit_command};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn init_repository_successfully(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let git_dir = repository_dir.path().canonicalize()?.join(".git");

    run_bit_command(repository_dir.path(), &["init"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Initialized empty Git repository in",
        ))
        .stdout(predicate::str::contains(git_dir.display().to_string()));

    assert!(git_dir.join("objects").is_dir());
    assert!(git_dir.join("refs").join("heads").is_dir());
    assert_eq!(
        std::fs::read_to_string(git_dir.join("HEAD"))?.trim(),
        "ref: refs/heads/master"
    );

    Ok(())
}

#[rstest]
fn init_repository_at_explicit_path(repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let target = repository_dir.path().join("nested").join("project");

    run_bit_command(repository_dir.path(), &["init", &target.to_string_lossy()])
        .assert()
        .success();

    assert!(target.join(".git").join("objects").is_dir());

    Ok(())
}
