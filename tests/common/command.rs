use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

/// A repository whose single commit holds `1.txt`, `a/2.txt` and `a/b/3.txt`
#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_bit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

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

    bit_commit(repository_dir.path(), "Initial commit")
        .assert()
        .success();

    repository_dir
}

pub fn run_bit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("bitsync").expect("Failed to find bitsync binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("BITSYNC_EXCLUDES");
    cmd.env_remove("BITSYNC_PROJECT_MARKERS");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn bit_commit(dir: &Path, message: &str) -> Command {
    bit_commit_at(dir, message, "2023-01-01 12:00:00 +0000")
}

/// Commit with an explicit author date (`%Y-%m-%d %H:%M:%S %z`)
pub fn bit_commit_at(dir: &Path, message: &str, date: &str) -> Command {
    let mut cmd = run_bit_command(dir, &["commit", "-m", message]);
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "fake_user"),
        ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("GIT_AUTHOR_DATE", date),
    ]);
    cmd
}

/// Get the current HEAD commit SHA
pub fn get_head_commit_sha(dir: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let head_path = dir.join(".git").join("HEAD");
    let head_content = std::fs::read_to_string(head_path)?;

    // HEAD file contains either a commit SHA or a ref like "ref: refs/heads/master"
    if let Some(ref_path) = head_content.strip_prefix("ref: ") {
        let ref_file = dir.join(".git").join(ref_path.trim());
        let commit_sha = std::fs::read_to_string(ref_file)?;
        Ok(commit_sha.trim().to_string())
    } else {
        Ok(head_content.trim().to_string())
    }
}
