//! Recursive persistence: digest substitution on save, resolution on load.
//!
//! Saving walks depth-first: each nested object is persisted first, then
//! the parent is written with its children replaced by their digests. If an
//! object's digest is already present anywhere in the store the whole
//! subtree is skipped, since identical digests imply identical contents all
//! the way down.
//!
//! Loading reverses the substitution, resolving digests back into live
//! nodes. A dangling digest aborts the whole load with
//! [`StoreError::MissingObject`]; there is no partial reconstruction.

use strata_types::Digest;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::node::{Blob, Commit, FileEntry, Node, Tree};
use crate::record::ObjectRecord;
use crate::traits::ObjectStore;

/// Persist a node and everything below it. Returns the node's digest.
pub fn persist_node(store: &dyn ObjectStore, node: &Node) -> StoreResult<Digest> {
    match node {
        Node::File(file) => persist_file(store, file),
        Node::Dir(tree) => persist_tree(store, tree),
    }
}

/// Persist a commit, its tree, and all nested objects. Returns the commit
/// digest.
pub fn persist_commit(store: &dyn ObjectStore, commit: &Commit) -> StoreResult<Digest> {
    let digest = commit.digest();
    if store.exists(&digest)? {
        return Ok(digest);
    }
    let tree = persist_tree(store, &commit.tree)?;
    store.write(
        &digest,
        &ObjectRecord::Commit {
            tree,
            parent: commit.parent,
        },
    )?;
    debug!(commit = %digest.short_hex(), "commit persisted");
    Ok(digest)
}

fn persist_file(store: &dyn ObjectStore, file: &FileEntry) -> StoreResult<Digest> {
    let digest = file.digest();
    if store.exists(&digest)? {
        return Ok(digest);
    }
    let blob = file.blob.digest();
    store.write(
        &blob,
        &ObjectRecord::Blob {
            content: file.blob.content.clone(),
        },
    )?;
    store.write(
        &digest,
        &ObjectRecord::File {
            name: file.name.clone(),
            blob,
        },
    )?;
    Ok(digest)
}

fn persist_tree(store: &dyn ObjectStore, tree: &Tree) -> StoreResult<Digest> {
    let digest = tree.digest();
    if store.exists(&digest)? {
        // Identical digest means the entire subtree is already stored.
        return Ok(digest);
    }
    let mut children = Vec::with_capacity(tree.children.len());
    for child in &tree.children {
        children.push(persist_node(store, child)?);
    }
    store.write(
        &digest,
        &ObjectRecord::Tree {
            name: tree.name.clone(),
            children,
        },
    )?;
    Ok(digest)
}

/// Load a file or tree node, recursively resolving nested digests.
pub fn load_node(store: &dyn ObjectStore, digest: &Digest) -> StoreResult<Node> {
    let record = store
        .read(digest)?
        .ok_or(StoreError::MissingObject(*digest))?;
    match record {
        ObjectRecord::File { name, blob } => {
            let content = load_blob(store, &blob)?;
            Ok(Node::File(FileEntry::new(name, Blob::new(content))))
        }
        ObjectRecord::Tree { name, children } => {
            let mut tree = Tree::new(name);
            for child in &children {
                tree.add_child(load_node(store, child)?);
            }
            Ok(Node::Dir(tree))
        }
        other => Err(StoreError::CorruptObject {
            digest: *digest,
            reason: format!("expected file or tree, got {}", other.kind()),
        }),
    }
}

/// Load a commit and fully reconstitute its tree.
pub fn load_commit(store: &dyn ObjectStore, digest: &Digest) -> StoreResult<Commit> {
    let record = store
        .read(digest)?
        .ok_or(StoreError::MissingObject(*digest))?;
    let (tree, parent) = match record {
        ObjectRecord::Commit { tree, parent } => (tree, parent),
        other => {
            return Err(StoreError::CorruptObject {
                digest: *digest,
                reason: format!("expected commit, got {}", other.kind()),
            })
        }
    };
    match load_node(store, &tree)? {
        Node::Dir(tree) => Ok(Commit::new(tree, parent)),
        Node::File(_) => Err(StoreError::CorruptObject {
            digest: tree,
            reason: "commit tree resolves to a file".into(),
        }),
    }
}

fn load_blob(store: &dyn ObjectStore, digest: &Digest) -> StoreResult<Vec<u8>> {
    let record = store
        .read(digest)?
        .ok_or(StoreError::MissingObject(*digest))?;
    match record {
        ObjectRecord::Blob { content } => Ok(content),
        other => Err(StoreError::CorruptObject {
            digest: *digest,
            reason: format!("expected blob, got {}", other.kind()),
        }),
    }
}
