//! Two-pass structural tree comparison.
//!
//! The forward pass walks the new tree's children against the old tree's
//! children, emitting `Added`, `Modified`, and `Renamed`; every old child
//! it matches is marked consumed. The removal sweep then reports `Removed`
//! for exactly the old children the forward pass never consumed. Sharing
//! one consumed set between the passes prevents an old child from matching
//! two new children, and keeps a matched old child from also surfacing as
//! removed.
//!
//! Matching precedence per new child, first match in old-tree order wins:
//! 1. exact (same name, same digest) — unchanged, no emission;
//! 2. same name, different digest — `Modified` for files, recursive
//!    descent for directories;
//! 3. different name, same content digest — `Renamed`;
//! 4. no match — `Added`.
//!
//! Known limitation, preserved deliberately: an entry that is renamed and
//! modified in the same snapshot reports as a Removed+Added pair, because
//! rename detection requires exact content-digest equality.

use strata_store::{Node, Tree};

use crate::change::Change;

/// Compare two trees and produce the ordered change list.
pub fn diff_trees(old: &Tree, new: &Tree) -> Vec<Change> {
    let mut changes = Vec::new();

    // Identical child-digest concatenations mean provably identical
    // contents: at most an identity-preserving rename of the root itself.
    if old.content_digest() == new.content_digest() {
        if old.name != new.name {
            changes.push(Change::Renamed {
                from: old.name.clone(),
                to: new.name.clone(),
            });
        }
        return changes;
    }

    let mut path = Vec::new();
    walk(old, new, &mut path, &mut changes);
    changes
}

/// First unconsumed old child satisfying `pred`, in old-tree order.
fn find(old: &Tree, consumed: &[bool], pred: impl Fn(&Node) -> bool) -> Option<usize> {
    old.children
        .iter()
        .enumerate()
        .find(|&(pos, child)| !consumed[pos] && pred(child))
        .map(|(pos, _)| pos)
}

fn walk(old: &Tree, new: &Tree, path: &mut Vec<String>, changes: &mut Vec<Change>) {
    let mut consumed = vec![false; old.children.len()];

    for child in &new.children {
        // 1. Exact match: same name, same digest. Unchanged.
        if let Some(pos) = find(old, &consumed, |c| {
            c.name() == child.name() && c.digest() == child.digest()
        }) {
            consumed[pos] = true;
            continue;
        }

        // 2. Same name, different digest: modified file or changed directory.
        if let Some(pos) = find(old, &consumed, |c| c.name() == child.name()) {
            consumed[pos] = true;
            match (&old.children[pos], child) {
                (Node::Dir(old_sub), Node::Dir(new_sub)) => {
                    path.push(child.name().to_string());
                    walk(old_sub, new_sub, path, changes);
                    path.pop();
                }
                // File content change, or a file/directory kind flip.
                _ => changes.push(Change::Modified(join(path, child.name()))),
            }
            continue;
        }

        // 3. Same content under a different name: a rename.
        if let Some(pos) = find(old, &consumed, |c| {
            c.content_digest() == child.content_digest()
        }) {
            consumed[pos] = true;
            changes.push(Change::Renamed {
                from: join(path, old.children[pos].name()),
                to: join(path, child.name()),
            });
            continue;
        }

        changes.push(Change::Added(join(path, child.name())));
    }

    // Removal sweep: only old children never matched above.
    for (pos, child) in old.children.iter().enumerate() {
        if !consumed[pos] {
            changes.push(Change::Removed(join(path, child.name())));
        }
    }
}

fn join(path: &[String], name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", path.join("/"), name)
    }
}
