use std::path::Path;

/// Decides whether a visited path is excluded from snapshots.
///
/// Implementations are supplied from outside the core (typically backed by
/// parsed per-directory ignore files); the walker only asks this question
/// per visited path. `depth` is the nesting level below the snapshot root,
/// starting at 1 for the root's direct children. An ignored path is
/// excluded entirely and never descended into.
pub trait IgnorePredicate {
    fn is_ignored(&self, path: &Path, depth: usize) -> bool;
}

/// Predicate that ignores nothing; useful for tests and internal snapshots.
pub struct IgnoreNothing;

impl IgnorePredicate for IgnoreNothing {
    fn is_ignored(&self, _path: &Path, _depth: usize) -> bool {
        false
    }
}

impl<F> IgnorePredicate for F
where
    F: Fn(&Path, usize) -> bool,
{
    fn is_ignored(&self, path: &Path, depth: usize) -> bool {
        self(path, depth)
    }
}
