//! The live, owned object model.
//!
//! These types form a Merkle-style DAG keyed by content digest. Identity is
//! always derived from current contents — `digest()` walks the structure on
//! every call and is never cached, so mutating a tree (adding a child)
//! transparently changes its identity.

use serde::{Deserialize, Serialize};
use strata_types::Digest;

/// Raw byte content of one file.
///
/// Distinct files with identical bytes share a single stored blob: the
/// digest of the content is the identity, so deduplication falls out of
/// content addressing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub content: Vec<u8>,
}

impl Blob {
    /// Create a blob from raw bytes.
    pub fn new(content: Vec<u8>) -> Self {
        Self { content }
    }

    /// Identity: digest of the raw content.
    pub fn digest(&self) -> Digest {
        Digest::of_bytes(&self.content)
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the blob is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// A named reference to a blob: one file in a directory.
///
/// Identity covers both the name and the blob digest. The same content
/// under a different name, or the same name over different content, yields
/// a different identity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub blob: Blob,
}

impl FileEntry {
    /// Create a file entry wrapping a blob.
    pub fn new(name: impl Into<String>, blob: Blob) -> Self {
        Self {
            name: name.into(),
            blob,
        }
    }

    /// Identity: digest of `name ++ blob-digest-hex`.
    pub fn digest(&self) -> Digest {
        let mut input = self.name.clone();
        input.push_str(&self.blob.digest().to_hex());
        Digest::of_bytes(input.as_bytes())
    }
}

/// An ordered collection of child entries: one directory.
///
/// Identity is structural: digest of the name plus the concatenation of
/// the children's digests in child order. Any change to a child's identity,
/// an addition, a removal, or a reorder changes the tree's own digest.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Tree {
    pub name: String,
    pub children: Vec<Node>,
}

impl Tree {
    /// Create an empty tree with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child entry.
    pub fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Look up a direct child by name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Number of direct children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the tree has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Identity: digest of `name ++ concat(child-digest-hex...)`.
    pub fn digest(&self) -> Digest {
        let mut input = self.name.clone();
        for child in &self.children {
            input.push_str(&child.digest().to_hex());
        }
        Digest::of_bytes(input.as_bytes())
    }

    /// Name-independent digest over the children only.
    ///
    /// Two trees with equal `content_digest` hold provably identical
    /// contents regardless of their own names. Used for rename detection.
    pub fn content_digest(&self) -> Digest {
        let mut input = String::new();
        for child in &self.children {
            input.push_str(&child.digest().to_hex());
        }
        Digest::of_bytes(input.as_bytes())
    }
}

/// A directory entry: either a file or a nested tree.
///
/// Walkers and the differ dispatch on this tag by pattern matching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    File(FileEntry),
    Dir(Tree),
}

impl Node {
    /// The entry's name within its parent directory.
    pub fn name(&self) -> &str {
        match self {
            Node::File(f) => &f.name,
            Node::Dir(t) => &t.name,
        }
    }

    /// Full identity (includes the name).
    pub fn digest(&self) -> Digest {
        match self {
            Node::File(f) => f.digest(),
            Node::Dir(t) => t.digest(),
        }
    }

    /// Name-independent content identity, used for rename matching:
    /// the blob digest for files, the children-only digest for trees.
    pub fn content_digest(&self) -> Digest {
        match self {
            Node::File(f) => f.blob.digest(),
            Node::Dir(t) => t.content_digest(),
        }
    }

    /// Returns `true` for directory nodes.
    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Dir(_))
    }
}

/// A tree digest plus an optional parent, forming a linear history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    pub tree: Tree,
    pub parent: Option<Digest>,
}

impl Commit {
    /// Create a commit wrapping a tree.
    pub fn new(tree: Tree, parent: Option<Digest>) -> Self {
        Self { tree, parent }
    }

    /// Identity: digest of `tree-digest-hex` for a root commit, else
    /// digest of `tree-digest-hex ++ parent-digest-hex`.
    pub fn digest(&self) -> Digest {
        let mut input = self.tree.digest().to_hex();
        if let Some(parent) = &self.parent {
            input.push_str(&parent.to_hex());
        }
        Digest::of_bytes(input.as_bytes())
    }

    /// Returns `true` if this is a root commit (no parent).
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
