//! Restore engine: reconstruct a committed tree on disk.

use std::path::Path;

use strata_diff::{diff_trees, Change};
use strata_store::{Commit, Node, Tree};
use tracing::{info, warn};

use crate::error::{WorktreeError, WorktreeResult};
use crate::ignore::IgnorePredicate;
use crate::snapshot::snapshot;

/// Reconstruct `target`'s tree inside `dest`.
///
/// First diffs the current state of `dest` against the target tree and
/// deletes every `Removed` and `Modified` path plus the source path of
/// every `Renamed`, clearing divergent or obsolete content. Cleanup is
/// best effort: a path that fails to delete or is neither file nor
/// directory is reported and skipped, and the rest of the restore
/// continues. Then the target tree is walked depth-first, creating
/// directories and writing blob contents; an already existing directory
/// or an overwritten file is success, not an error.
///
/// Returns the change list that drove the cleanup. Moving the head pointer
/// is the caller's job.
pub fn restore(
    target: &Commit,
    dest: &Path,
    ignore: &dyn IgnorePredicate,
) -> WorktreeResult<Vec<Change>> {
    std::fs::create_dir_all(dest)?;
    let current = snapshot(dest, ignore)?;
    let changes = diff_trees(&current, &target.tree);

    for change in &changes {
        let stale = match change {
            Change::Removed(path) | Change::Modified(path) => path,
            // The rename source is the name currently on disk; the target
            // name is written back below.
            Change::Renamed { from, .. } => from,
            Change::Added(_) => continue,
        };
        let path = dest.join(stale);
        // A root-level rename names the trees themselves, not an entry.
        if !path.exists() {
            continue;
        }
        if let Err(e) = remove_path(&path) {
            warn!(path = stale.as_str(), error = %e, "cleanup skipped");
        }
    }

    write_tree(&target.tree, dest)?;
    info!(dest = %dest.display(), changes = changes.len(), "restore complete");
    Ok(changes)
}

fn remove_path(path: &Path) -> WorktreeResult<()> {
    if path.is_file() {
        std::fs::remove_file(path)?;
    } else if path.is_dir() {
        std::fs::remove_dir_all(path)?;
    } else {
        return Err(WorktreeError::FilesystemConflict {
            path: path.to_path_buf(),
            reason: "neither file nor directory".into(),
        });
    }
    Ok(())
}

fn write_tree(tree: &Tree, dir: &Path) -> WorktreeResult<()> {
    for child in &tree.children {
        let path = dir.join(child.name());
        match child {
            Node::File(file) => {
                std::fs::write(&path, &file.blob.content)?;
            }
            Node::Dir(sub) => {
                // Exists already = success.
                std::fs::create_dir_all(&path)?;
                write_tree(sub, &path)?;
            }
        }
    }
    Ok(())
}
