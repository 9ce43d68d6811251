use std::fmt;

use serde::{Deserialize, Serialize};

/// A single structural change between two trees.
///
/// Paths are relative to the compared roots, `/`-separated; the root tree's
/// own name is never a path component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Change {
    /// A path present in the new tree but not the old one.
    Added(String),
    /// A path present in the old tree but not the new one.
    Removed(String),
    /// Same path, different content digest.
    Modified(String),
    /// Same content digest under a different name.
    Renamed { from: String, to: String },
}

impl Change {
    /// The literal one-character tag exposed to callers:
    /// `+` added, `-` removed, `?` modified or renamed.
    pub fn tag(&self) -> char {
        match self {
            Change::Added(_) => '+',
            Change::Removed(_) => '-',
            Change::Modified(_) | Change::Renamed { .. } => '?',
        }
    }

    /// The primary path of the change (the old path for renames).
    pub fn path(&self) -> &str {
        match self {
            Change::Added(p) | Change::Removed(p) | Change::Modified(p) => p,
            Change::Renamed { from, .. } => from,
        }
    }

    /// Returns `true` for rename changes.
    pub fn is_rename(&self) -> bool {
        matches!(self, Change::Renamed { .. })
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Renamed { from, to } => write!(f, "{} {from} > {to}", self.tag()),
            other => write!(f, "{} {}", self.tag(), other.path()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_match_the_wire_shape() {
        assert_eq!(Change::Added("a".into()).tag(), '+');
        assert_eq!(Change::Removed("a".into()).tag(), '-');
        assert_eq!(Change::Modified("a".into()).tag(), '?');
        assert_eq!(
            Change::Renamed {
                from: "a".into(),
                to: "b".into()
            }
            .tag(),
            '?'
        );
    }

    #[test]
    fn display_renders_tuples() {
        assert_eq!(Change::Modified("a.txt".into()).to_string(), "? a.txt");
        assert_eq!(
            Change::Renamed {
                from: "a.txt".into(),
                to: "c.txt".into()
            }
            .to_string(),
            "? a.txt > c.txt"
        );
        assert_eq!(Change::Added("dir/new.txt".into()).to_string(), "+ dir/new.txt");
    }

    #[test]
    fn serde_roundtrip() {
        let change = Change::Renamed {
            from: "x".into(),
            to: "y".into(),
        };
        let json = serde_json::to_string(&change).unwrap();
        let parsed: Change = serde_json::from_str(&json).unwrap();
        assert_eq!(change, parsed);
    }
}
