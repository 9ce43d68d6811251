//! End-to-end scenarios driven through the repository handle.

use std::fs;
use std::path::Path;

use strata_diff::Change;
use strata_repo::{Repository, Status};
use strata_worktree::IgnoreNothing;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn modify_one_file_then_status_reports_exactly_that_file() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.txt", "alpha");
    write(dir.path(), "b.txt", "beta");
    repo.commit(&IgnoreNothing).unwrap();

    write(dir.path(), "a.txt", "alpha v2");

    let status = repo.status(&IgnoreNothing).unwrap();
    assert_eq!(status.changes(), &[Change::Modified("a.txt".into())]);
}

#[test]
fn rename_without_edit_reports_a_single_rename() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.txt", "alpha");
    write(dir.path(), "b.txt", "beta");
    repo.commit(&IgnoreNothing).unwrap();

    fs::rename(dir.path().join("a.txt"), dir.path().join("c.txt")).unwrap();

    let status = repo.status(&IgnoreNothing).unwrap();
    assert_eq!(
        status.changes(),
        &[Change::Renamed {
            from: "a.txt".into(),
            to: "c.txt".into(),
        }]
    );
}

#[test]
fn committing_an_unchanged_tree_leaves_the_chain_alone() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.txt", "alpha");
    let first = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

    let again = repo.commit(&IgnoreNothing).unwrap();
    assert!(again.is_no_change());
    assert_eq!(repo.head().unwrap(), Some(first));
    assert_eq!(repo.history().unwrap().len(), 1);
}

#[test]
fn checkout_round_trips_a_nested_tree_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "readme.md", "top level");
    write(dir.path(), "src/lib.rs", "pub fn v1() {}");
    write(dir.path(), "src/deep/mod.rs", "mod inner;");
    let first = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

    write(dir.path(), "src/lib.rs", "pub fn v2() {}");
    fs::remove_file(dir.path().join("src/deep/mod.rs")).unwrap();
    write(dir.path(), "extra.txt", "should vanish");
    repo.commit(&IgnoreNothing).unwrap();

    repo.checkout(&first, &IgnoreNothing).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("readme.md")).unwrap(),
        "top level"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("src/lib.rs")).unwrap(),
        "pub fn v1() {}"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("src/deep/mod.rs")).unwrap(),
        "mod inner;"
    );
    assert!(!dir.path().join("extra.txt").exists());
    assert!(repo.status(&IgnoreNothing).unwrap().is_clean());
}

#[test]
fn checkout_across_a_rename_leaves_a_clean_tree() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.txt", "alpha");
    let first = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

    fs::rename(dir.path().join("a.txt"), dir.path().join("c.txt")).unwrap();
    repo.commit(&IgnoreNothing).unwrap();

    repo.checkout(&first, &IgnoreNothing).unwrap();

    assert!(dir.path().join("a.txt").exists());
    assert!(!dir.path().join("c.txt").exists());
    assert!(repo.status(&IgnoreNothing).unwrap().is_clean());
}

#[test]
fn empty_repository_reports_no_commits_everywhere() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    assert_eq!(repo.status(&IgnoreNothing).unwrap(), Status::NoCommits);
    assert!(repo.history().unwrap().is_empty());
    assert_eq!(repo.head().unwrap(), None);
}

#[test]
fn history_spans_reopened_repositories() {
    let dir = TempDir::new().unwrap();
    let first;
    {
        let repo = Repository::init(dir.path()).unwrap();
        write(dir.path(), "a.txt", "one");
        first = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();
    }

    let repo = Repository::open(dir.path()).unwrap();
    write(dir.path(), "a.txt", "two");
    let second = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

    let chain = repo.history().unwrap();
    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].0, first);
    assert_eq!(chain[1].0, second);
    assert!(chain[0].1.is_root());
    assert_eq!(chain[1].1.parent, Some(first));
}

#[test]
fn ignored_paths_stay_out_of_commits() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    write(dir.path(), "a.txt", "kept");
    write(dir.path(), "scratch.log", "ignored");

    let ignore = |path: &Path, _depth: usize| {
        path.extension().is_some_and(|e| e == "log")
    };
    repo.commit(&ignore).unwrap();

    let (digest, _) = repo.history().unwrap().pop().unwrap();
    let commit = repo.load_commit(&digest).unwrap();
    assert_eq!(commit.tree.len(), 1);
    assert!(commit.tree.get("a.txt").is_some());
    assert!(commit.tree.get("scratch.log").is_none());
}
