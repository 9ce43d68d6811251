//! Repository handle: commit chain, status, restore, and history over a
//! control directory on disk.

use std::path::{Path, PathBuf};

use strata_diff::{diff_trees, Change};
use strata_refs::{FsHeadStore, HeadStore};
use strata_store::{
    load_commit, persist_commit, Commit, FsObjectStore, StoreError, Tree,
};
use strata_types::Digest;
use strata_worktree::IgnorePredicate;
use tracing::{debug, info};

use crate::error::{RepoError, RepoResult};
use crate::outcome::{CommitOutcome, Status};

/// Name of the control directory at the working tree root.
pub const CONTROL_DIR: &str = ".strata";

const OBJECTS_DIR: &str = "objects";
const HEAD_FILE: &str = "HEAD";

/// A repository rooted at a working tree directory.
///
/// All state lives under `<root>/.strata`: one file per object in
/// `objects/`, plus a plain-text `HEAD` file holding the hex digest of the
/// latest commit. The control directory is always excluded from snapshots,
/// on top of whatever predicate the caller supplies.
pub struct Repository {
    root: PathBuf,
    store: FsObjectStore,
    head: FsHeadStore,
}

impl Repository {
    /// Create a fresh repository at `root`. Fails if one already exists.
    pub fn init(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let root = root.into();
        let control = root.join(CONTROL_DIR);
        if control.exists() {
            return Err(RepoError::AlreadyInitialized(root));
        }
        let store = FsObjectStore::open(control.join(OBJECTS_DIR))?;
        let head = FsHeadStore::new(control.join(HEAD_FILE));
        info!(root = %root.display(), "initialized repository");
        Ok(Self { root, store, head })
    }

    /// Open an existing repository at `root`.
    pub fn open(root: impl Into<PathBuf>) -> RepoResult<Self> {
        let root = root.into();
        let control = root.join(CONTROL_DIR);
        if !control.is_dir() {
            return Err(RepoError::NotARepository(root));
        }
        let store = FsObjectStore::open(control.join(OBJECTS_DIR))?;
        let head = FsHeadStore::new(control.join(HEAD_FILE));
        Ok(Self { root, store, head })
    }

    /// Working tree root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Digest of the head commit, if any commit exists.
    pub fn head(&self) -> RepoResult<Option<Digest>> {
        Ok(self.head.read()?)
    }

    /// Snapshot the working tree, excluding the control directory.
    pub fn snapshot(&self, ignore: &dyn IgnorePredicate) -> RepoResult<Tree> {
        let guard = SkipControlDir { inner: ignore };
        Ok(strata_worktree::snapshot(&self.root, &guard)?)
    }

    /// Snapshot the working tree and record it as a new commit.
    ///
    /// No-change detection works in two steps. A candidate commit is first
    /// built with the head's own parent, so that the parent link cancels
    /// out of the digest comparison: if the candidate's digest equals the
    /// head digest the trees are identical and nothing is written. Only
    /// when they differ is the commit rebuilt with the head as parent,
    /// persisted, and published as the new head.
    pub fn commit(&self, ignore: &dyn IgnorePredicate) -> RepoResult<CommitOutcome> {
        let tree = self.snapshot(ignore)?;
        let commit = match self.head.read()? {
            None => Commit::new(tree, None),
            Some(head_digest) => {
                let head = self.load(&head_digest)?;
                let candidate = Commit::new(tree, head.parent);
                if candidate.digest() == head_digest {
                    debug!(head = %head_digest, "snapshot matches head");
                    return Ok(CommitOutcome::NoChange);
                }
                Commit::new(candidate.tree, Some(head_digest))
            }
        };
        let digest = persist_commit(&self.store, &commit)?;
        self.head.write(&digest)?;
        info!(commit = %digest, "created commit");
        Ok(CommitOutcome::Created(digest))
    }

    /// Compare the working tree to the head commit.
    pub fn status(&self, ignore: &dyn IgnorePredicate) -> RepoResult<Status> {
        let head_digest = match self.head.read()? {
            None => return Ok(Status::NoCommits),
            Some(d) => d,
        };
        let head = self.load(&head_digest)?;
        let snapshot = self.snapshot(ignore)?;
        let changes = diff_trees(&head.tree, &snapshot);
        if changes.is_empty() {
            Ok(Status::Clean)
        } else {
            Ok(Status::Changed(changes))
        }
    }

    /// Changes from one commit's tree to another's.
    pub fn diff_commits(&self, old: &Digest, new: &Digest) -> RepoResult<Vec<Change>> {
        let old = self.load(old)?;
        let new = self.load(new)?;
        Ok(diff_trees(&old.tree, &new.tree))
    }

    /// Reconstruct `target`'s tree in the working directory and move the
    /// head to it. Returns the changes that drove the cleanup pass.
    pub fn checkout(
        &self,
        target: &Digest,
        ignore: &dyn IgnorePredicate,
    ) -> RepoResult<Vec<Change>> {
        let commit = self.load(target)?;
        let guard = SkipControlDir { inner: ignore };
        let changes = strata_worktree::restore(&commit, &self.root, &guard)?;
        self.head.write(target)?;
        info!(commit = %target, "checked out commit");
        Ok(changes)
    }

    /// Load a commit's full tree from the store.
    pub fn load_commit(&self, digest: &Digest) -> RepoResult<Commit> {
        self.load(digest)
    }

    /// Every commit from the first to the head, oldest first.
    pub fn history(&self) -> RepoResult<Vec<(Digest, Commit)>> {
        let mut chain = Vec::new();
        let mut cursor = self.head.read()?;
        while let Some(digest) = cursor {
            let commit = self.load(&digest)?;
            cursor = commit.parent;
            chain.push((digest, commit));
        }
        chain.reverse();
        Ok(chain)
    }

    fn load(&self, digest: &Digest) -> RepoResult<Commit> {
        match load_commit(&self.store, digest) {
            Ok(commit) => Ok(commit),
            Err(StoreError::MissingObject(d)) if d == *digest => {
                Err(RepoError::UnknownCommit(*digest))
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .finish()
    }
}

/// Hides the control directory from snapshots before delegating to the
/// caller's predicate.
struct SkipControlDir<'a> {
    inner: &'a dyn IgnorePredicate,
}

impl IgnorePredicate for SkipControlDir<'_> {
    fn is_ignored(&self, path: &Path, depth: usize) -> bool {
        if depth == 1 && path.file_name().is_some_and(|n| n == CONTROL_DIR) {
            return true;
        }
        self.inner.is_ignored(path, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_worktree::IgnoreNothing;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn init_creates_control_layout() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        assert!(dir.path().join(CONTROL_DIR).join(OBJECTS_DIR).is_dir());
    }

    #[test]
    fn init_refuses_existing_repository() {
        let dir = TempDir::new().unwrap();
        Repository::init(dir.path()).unwrap();
        let err = Repository::init(dir.path()).unwrap_err();
        assert!(matches!(err, RepoError::AlreadyInitialized(_)));
    }

    #[test]
    fn debug_names_the_root() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let rendered = format!("{repo:?}");
        assert!(rendered.contains("Repository"));
        assert!(rendered.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn open_requires_control_dir() {
        let dir = TempDir::new().unwrap();
        let err = Repository::open(dir.path()).unwrap_err();
        assert!(matches!(err, RepoError::NotARepository(_)));
    }

    #[test]
    fn first_commit_sets_head() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        write(dir.path(), "a.txt", "alpha");

        let outcome = repo.commit(&IgnoreNothing).unwrap();
        let digest = outcome.digest().unwrap();
        assert_eq!(repo.head().unwrap(), Some(digest));
        assert!(repo.load_commit(&digest).unwrap().is_root());
    }

    #[test]
    fn unchanged_tree_commits_to_no_change() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        write(dir.path(), "a.txt", "alpha");

        let first = repo.commit(&IgnoreNothing).unwrap();
        let second = repo.commit(&IgnoreNothing).unwrap();
        assert!(second.is_no_change());
        assert_eq!(repo.head().unwrap(), first.digest());
    }

    #[test]
    fn commit_chain_links_to_previous_head() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        write(dir.path(), "a.txt", "alpha");
        let first = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

        write(dir.path(), "a.txt", "beta");
        let second = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

        let commit = repo.load_commit(&second).unwrap();
        assert_eq!(commit.parent, Some(first));
    }

    #[test]
    fn status_reports_unborn_clean_and_changed() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert_eq!(repo.status(&IgnoreNothing).unwrap(), Status::NoCommits);

        write(dir.path(), "a.txt", "alpha");
        repo.commit(&IgnoreNothing).unwrap();
        assert!(repo.status(&IgnoreNothing).unwrap().is_clean());

        write(dir.path(), "a.txt", "beta");
        let status = repo.status(&IgnoreNothing).unwrap();
        assert_eq!(status.changes(), &[Change::Modified("a.txt".into())]);
    }

    #[test]
    fn control_dir_never_appears_in_snapshots() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        write(dir.path(), "a.txt", "alpha");

        let tree = repo.snapshot(&IgnoreNothing).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(tree.get(CONTROL_DIR).is_none());
    }

    #[test]
    fn checkout_restores_old_content_and_moves_head() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        write(dir.path(), "a.txt", "alpha");
        let first = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

        write(dir.path(), "a.txt", "beta");
        write(dir.path(), "b.txt", "extra");
        repo.commit(&IgnoreNothing).unwrap();

        repo.checkout(&first, &IgnoreNothing).unwrap();
        let restored = std::fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(restored, "alpha");
        assert!(!dir.path().join("b.txt").exists());
        assert_eq!(repo.head().unwrap(), Some(first));
    }

    #[test]
    fn checkout_unknown_commit_fails() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let bogus = Digest::of_bytes(b"nope");
        let err = repo.checkout(&bogus, &IgnoreNothing).unwrap_err();
        assert!(matches!(err, RepoError::UnknownCommit(d) if d == bogus));
    }

    #[test]
    fn history_runs_oldest_first() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        assert!(repo.history().unwrap().is_empty());

        write(dir.path(), "a.txt", "one");
        let first = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();
        write(dir.path(), "a.txt", "two");
        let second = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

        let chain = repo.history().unwrap();
        let digests: Vec<Digest> = chain.iter().map(|(d, _)| *d).collect();
        assert_eq!(digests, vec![first, second]);
    }

    #[test]
    fn diff_commits_reports_rename() {
        let dir = TempDir::new().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        write(dir.path(), "a.txt", "alpha");
        write(dir.path(), "keep.txt", "same");
        let first = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

        std::fs::rename(dir.path().join("a.txt"), dir.path().join("c.txt")).unwrap();
        let second = repo.commit(&IgnoreNothing).unwrap().digest().unwrap();

        let changes = repo.diff_commits(&first, &second).unwrap();
        assert_eq!(
            changes,
            vec![Change::Renamed {
                from: "a.txt".into(),
                to: "c.txt".into(),
            }]
        );
    }
}
