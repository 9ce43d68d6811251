use strata_diff::Change;
use strata_types::Digest;

/// Result of attempting to record a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// A new commit was stored and the head advanced to it.
    Created(Digest),
    /// The snapshot matches the head commit; nothing was written.
    NoChange,
}

impl CommitOutcome {
    pub fn is_no_change(&self) -> bool {
        matches!(self, CommitOutcome::NoChange)
    }

    /// Digest of the new commit, if one was created.
    pub fn digest(&self) -> Option<Digest> {
        match self {
            CommitOutcome::Created(d) => Some(*d),
            CommitOutcome::NoChange => None,
        }
    }
}

/// Working tree state relative to the head commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// The repository has no commits yet.
    NoCommits,
    /// The working tree matches the head commit exactly.
    Clean,
    /// The working tree differs from the head commit.
    Changed(Vec<Change>),
}

impl Status {
    pub fn is_clean(&self) -> bool {
        matches!(self, Status::Clean)
    }

    /// Changes relative to the head, empty when clean or unborn.
    pub fn changes(&self) -> &[Change] {
        match self {
            Status::Changed(changes) => changes,
            _ => &[],
        }
    }
}
