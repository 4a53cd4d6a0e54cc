//! Result types produced by a policy check.

use std::fmt;

/// A regular file tracked at the revision under scrutiny.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedFile {
    /// Forward-slash relative path within the repository.
    pub path: String,
    /// Blob size in bytes (the pointer size for LFS-tracked files).
    pub size: u64,
    /// Whether the blob is an LFS pointer.
    pub lfs: bool,
}

impl TrackedFile {
    pub fn new(path: impl Into<String>, size: u64, lfs: bool) -> Self {
        Self {
            path: path.into(),
            size,
            lfs,
        }
    }
}

/// A file that violates the tracking policy.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Violation {
    pub path: String,
    /// Size of the offending blob as committed.
    pub size: u64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes) is not tracked by git LFS", self.path, self.size)
    }
}

/// Outcome of evaluating a policy against one revision.
///
/// [`violations`](Self::violations) is sorted by path so that output is
/// stable across runs of the same commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckReport {
    pub violations: Vec<Violation>,
    /// Total tracked regular files seen.
    pub scanned: usize,
    /// Files whose extension is watched by the policy.
    pub candidates: usize,
    /// Candidates skipped because of an exempt prefix.
    pub exempted: usize,
    /// Non-exempt candidates that are valid LFS pointers.
    pub lfs_tracked: usize,
}

impl CheckReport {
    /// `true` when no violations were found.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    pub(crate) fn push(&mut self, path: String, size: u64) {
        self.violations.push(Violation { path, size });
    }

    pub(crate) fn finish(mut self) -> Self {
        self.violations.sort_by(|a, b| a.path.cmp(&b.path));
        self
    }
}
