use crate::common::command::{get_head_commit_sha, init_repository_dir, run_bit_command};
use crate::common::file::{FileSpec, delete_path, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// The root line: the repository's working directory
fn repository_name(dir: &TempDir) -> String {
    dir.path().canonicalize().unwrap().display().to_string()
}

fn edit_working_copy(dir: &TempDir) {
    write_file(FileSpec::new(dir.path().join("1.txt"), "one, edited".to_string()));
    write_file(FileSpec::new(
        dir.path().join("a").join("b").join("3.txt"),
        "three, edited".to_string(),
    ));
    write_file(FileSpec::new(
        dir.path().join("a").join("new.txt"),
        "new".to_string(),
    ));
    delete_path(&dir.path().join("a").join("2.txt"));
}

#[rstest]
fn changes_are_rendered_as_an_indented_tree(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    edit_working_copy(&init_repository_dir);
    let head = get_head_commit_sha(init_repository_dir.path())?;

    let output = run_bit_command(init_repository_dir.path(), &["changes"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expected = format!(
        "{}\n  {} Initial commit\n    M 1.txt\n    a/\n      D 2.txt\n      b/\n        M 3.txt\n      A new.txt\n",
        repository_name(&init_repository_dir),
        &head[..6]
    );
    assert_eq!(String::from_utf8(output)?, expected);

    Ok(())
}

#[rstest]
fn depth_limits_the_rendered_levels(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    edit_working_copy(&init_repository_dir);
    let head = get_head_commit_sha(init_repository_dir.path())?;

    let output = run_bit_command(init_repository_dir.path(), &["changes", "--depth", "2"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expected = format!(
        "{}\n  {} Initial commit\n    M 1.txt\n    a/\n",
        repository_name(&init_repository_dir),
        &head[..6]
    );
    assert_eq!(String::from_utf8(output)?, expected);

    Ok(())
}

#[rstest]
fn diff_filter_keeps_matching_files_and_their_directories(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    edit_working_copy(&init_repository_dir);
    let head = get_head_commit_sha(init_repository_dir.path())?;

    let output = run_bit_command(init_repository_dir.path(), &["changes", "--diff-filter", "A"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expected = format!(
        "{}\n  {} Initial commit\n    a/\n      A new.txt\n",
        repository_name(&init_repository_dir),
        &head[..6]
    );
    assert_eq!(String::from_utf8(output)?, expected);

    Ok(())
}

#[rstest]
fn invalid_diff_filter_is_rejected(init_repository_dir: TempDir) {
    run_bit_command(init_repository_dir.path(), &["changes", "--diff-filter", "X"])
        .assert()
        .failure();
}

#[rstest]
fn clean_working_copy_shows_only_the_commit(
    init_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let head = get_head_commit_sha(init_repository_dir.path())?;

    let output = run_bit_command(init_repository_dir.path(), &["changes"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let expected = format!(
        "{}\n  {} Initial commit\n",
        repository_name(&init_repository_dir),
        &head[..6]
    );
    assert_eq!(String::from_utf8(output)?, expected);

    Ok(())
}
