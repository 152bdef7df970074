use crate::common::repository::{TestRepository, find_child, test_repository};
use bitsync::areas::config::SyncConfig;
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::Path;

fn project_names(node: &bitsync::artifacts::model::change_node::ChangeNode<'_>) -> Vec<String> {
    node.projects()
        .unwrap()
        .iter()
        .map(|project| project.name().to_string())
        .collect()
}

#[rstest]
fn projects_and_locations_follow_node_paths(test_repository: TestRepository) {
    test_repository
        .write("Cargo.toml", "[workspace]")
        .write("crates/core/Cargo.toml", "[package]")
        .write("crates/core/src/lib.rs", "// core")
        .write("crates/cli/Cargo.toml", "[package]")
        .write("crates/cli/src/main.rs", "fn main() {}");
    test_repository.commit("Initial commit");
    test_repository
        .write("crates/core/src/lib.rs", "// core, edited")
        .write("crates/cli/src/main.rs", "fn main() { run() }");

    let root = test_repository.root();
    let repository_name = test_repository
        .path()
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();
    let mut all = vec![repository_name, "cli".to_string(), "core".to_string()];
    all.sort();
    let mut root_projects = project_names(&root);
    root_projects.sort();
    assert_eq!(root_projects, all);

    let commits = root.children().unwrap();
    let crates = commits[0].children().unwrap();
    let crates_dir = find_child(&crates, "crates");
    assert_eq!(crates_dir.location(), test_repository.path().join("crates"));

    let members = crates_dir.children().unwrap();
    let core = find_child(&members, "core");
    let mut core_projects = project_names(core);
    core_projects.sort();
    // the enclosing workspace overlaps too
    assert!(core_projects.contains(&"core".to_string()));
    assert!(!core_projects.contains(&"cli".to_string()));

    let core_src = core.children().unwrap();
    let lib_rs = core_src[0].children().unwrap();
    let lib = find_child(&lib_rs, "lib.rs");
    assert_eq!(
        lib.location(),
        test_repository.path().join("crates/core/src/lib.rs")
    );
    assert_eq!(lib.path(), Path::new("crates/core/src/lib.rs"));
    assert!(project_names(lib).contains(&"core".to_string()));
    assert!(!project_names(lib).contains(&"cli".to_string()));
}

#[test]
fn project_markers_are_configurable() {
    let test_repository = TestRepository::with_config(SyncConfig {
        project_markers: vec!["package.json".to_string()],
        ..SyncConfig::default()
    });
    test_repository
        .write("web/package.json", "{}")
        .write("api/Cargo.toml", "[package]");

    let root = test_repository.root();

    assert_eq!(project_names(&root), vec!["web".to_string()]);
}
