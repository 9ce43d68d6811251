//! `.strataignore` support, built on the `ignore` crate's gitignore engine.
//!
//! Each directory may carry a `.strataignore` file whose patterns apply to
//! that directory and everything below it, with gitignore syntax. The files
//! are discovered once up front; an unreadable or malformed file is reported
//! and skipped rather than aborting the command.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use strata_repo::CONTROL_DIR;
use strata_worktree::IgnorePredicate;
use tracing::warn;

pub const IGNORE_FILE: &str = ".strataignore";

pub struct IgnoreRules {
    matchers: Vec<Gitignore>,
}

impl IgnoreRules {
    /// Collect every `.strataignore` under `root`.
    pub fn discover(root: &Path) -> Self {
        let mut matchers = Vec::new();
        collect(root, &mut matchers);
        Self { matchers }
    }
}

impl IgnorePredicate for IgnoreRules {
    fn is_ignored(&self, path: &Path, _depth: usize) -> bool {
        let is_dir = path.is_dir();
        self.matchers.iter().any(|gi| {
            path.starts_with(gi.path()) && gi.matched(path, is_dir).is_ignore()
        })
    }
}

fn collect(dir: &Path, matchers: &mut Vec<Gitignore>) {
    let file = dir.join(IGNORE_FILE);
    if file.is_file() {
        let mut builder = GitignoreBuilder::new(dir);
        if let Some(err) = builder.add(&file) {
            warn!(file = %file.display(), error = %err, "skipping ignore file");
        } else {
            match builder.build() {
                Ok(gi) => matchers.push(gi),
                Err(err) => {
                    warn!(file = %file.display(), error = %err, "skipping ignore file")
                }
            }
        }
    }

    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let is_control = path.file_name().is_some_and(|n| n == CONTROL_DIR);
        if path.is_dir() && !is_control {
            collect(&path, matchers);
        }
    }
}
