use crate::common::command::{init_repository_dir, repository_dir, run_bit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn flat_listing_prints_changed_paths(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("a").join("b").join("3.txt"),
        "three, edited".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("z").join("new.txt"),
        "new".to_string(),
    ));

    run_bit_command(init_repository_dir.path(), &["changes", "--flat"])
        .assert()
        .success()
        .stdout("a/b/3.txt\nz/new.txt\n");
}

#[rstest]
fn configured_excludes_hide_paths(init_repository_dir: TempDir) {
    write_file(FileSpec::new(
        init_repository_dir.path().join("target").join("out.bin"),
        "binary".to_string(),
    ));
    write_file(FileSpec::new(
        init_repository_dir.path().join("1.txt"),
        "one, edited".to_string(),
    ));

    run_bit_command(init_repository_dir.path(), &["changes", "--flat"])
        .env("BITSYNC_EXCLUDES", "target/")
        .assert()
        .success()
        .stdout("1.txt\n");
}

#[rstest]
fn repository_without_commits_lists_nothing(repository_dir: TempDir) {
    run_bit_command(repository_dir.path(), &["init"])
        .assert()
        .success();
    write_file(FileSpec::new(
        repository_dir.path().join("draft.txt"),
        "draft".to_string(),
    ));

    run_bit_command(repository_dir.path(), &["changes", "--flat"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[rstest]
fn outside_a_repository_fails(repository_dir: TempDir) {
    run_bit_command(repository_dir.path(), &["changes"])
        .assert()
        .failure();
}
