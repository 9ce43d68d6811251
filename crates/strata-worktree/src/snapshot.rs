//! Snapshot builder: walk a live directory into an in-memory tree.

use std::path::Path;

use strata_store::{Blob, FileEntry, Node, Tree};
use tracing::debug;

use crate::error::{WorktreeError, WorktreeResult};
use crate::ignore::IgnorePredicate;

/// Build a [`Tree`] mirroring the directory rooted at `root`.
///
/// The walk is depth-first with children sorted by name, so an unchanged
/// directory always snapshots to the same digest. Entries matched by
/// `ignore` are excluded entirely and never descended into. The root
/// directory names the returned tree but is never added as its own child.
/// Non-regular, non-directory entries (sockets, broken symlinks) are
/// skipped.
pub fn snapshot(root: &Path, ignore: &dyn IgnorePredicate) -> WorktreeResult<Tree> {
    if !root.is_dir() {
        return Err(WorktreeError::NotADirectory(root.to_path_buf()));
    }
    let name = root
        .canonicalize()?
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tree = walk(root, name, 0, ignore)?;
    debug!(root = %root.display(), digest = %tree.digest().short_hex(), "snapshot built");
    Ok(tree)
}

fn walk(
    dir: &Path,
    name: String,
    depth: usize,
    ignore: &dyn IgnorePredicate,
) -> WorktreeResult<Tree> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut tree = Tree::new(name);
    for entry in entries {
        let path = entry.path();
        if ignore.is_ignored(&path, depth + 1) {
            continue;
        }
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            let child_name = entry.file_name().to_string_lossy().into_owned();
            tree.add_child(Node::Dir(walk(&path, child_name, depth + 1, ignore)?));
        } else if file_type.is_file() {
            let content = std::fs::read(&path)?;
            let child_name = entry.file_name().to_string_lossy().into_owned();
            tree.add_child(Node::File(FileEntry::new(child_name, Blob::new(content))));
        }
        // Anything else (symlink, socket, ...) is not versioned.
    }
    Ok(tree)
}
