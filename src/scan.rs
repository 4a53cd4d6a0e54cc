//! Repository scanning.
//!
//! [`Scanner`] opens a repository and enumerates the regular files tracked
//! at a revision, classifying each as LFS-tracked or not. Blob content is
//! only loaded for files whose extension the policy watches (and only when
//! the blob is small enough to possibly be a pointer); everything else is
//! sized via an object-header read.

use std::path::Path;

use crate::error::{Error, Result};
use crate::pointer::{LfsPointer, MAX_POINTER_SIZE};
use crate::policy::Policy;
use crate::report::{CheckReport, TrackedFile};

/// Revision scanned when none is configured.
pub const DEFAULT_REV: &str = "HEAD";

const MODE_LINK: i32 = 0o120000;

/// A handle on the repository under scrutiny.
pub struct Scanner {
    repo: git2::Repository,
}

impl Scanner {
    /// Open the repository containing `path`.
    ///
    /// `path` may be the repository root, a bare repository, or any
    /// directory inside a working tree (discovery walks upward the way the
    /// git CLI does).
    ///
    /// # Errors
    ///
    /// Returns [`Error::RepositoryNotFound`] when no repository contains
    /// `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let repo = git2::Repository::discover(path)
            .map_err(|_| Error::repository_not_found(path.display().to_string()))?;
        Ok(Self { repo })
    }

    /// Enumerate the regular files tracked at `rev`.
    ///
    /// Symlinks and submodules are skipped; they are never policy
    /// candidates. An unborn `HEAD` (repository with no commits) yields an
    /// empty listing rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RevisionNotFound`] if `rev` does not resolve to a
    /// tree, or [`Error::Git`] for underlying object-store failures.
    pub fn tracked_files(&self, rev: &str, policy: &Policy) -> Result<Vec<TrackedFile>> {
        let tree = match self.resolve_tree(rev)? {
            Some(tree) => tree,
            None => return Ok(Vec::new()),
        };

        let odb = self.repo.odb()?;
        let mut files = Vec::new();
        let mut walk_err: Option<Error> = None;

        let walked = tree.walk(git2::TreeWalkMode::PreOrder, |root, entry| {
            if entry.kind() != Some(git2::ObjectType::Blob) || entry.filemode() == MODE_LINK {
                return git2::TreeWalkResult::Ok;
            }

            let name = String::from_utf8_lossy(entry.name_bytes());
            let path = format!("{}{}", root, name);

            match self.classify(&odb, entry.id(), &path, policy) {
                Ok(file) => {
                    files.push(file);
                    git2::TreeWalkResult::Ok
                }
                Err(e) => {
                    walk_err = Some(e);
                    git2::TreeWalkResult::Abort
                }
            }
        });

        // An abort from the callback surfaces as a walk error; the captured
        // error is the real cause.
        if let Some(e) = walk_err {
            return Err(e);
        }
        walked?;
        Ok(files)
    }

    /// Run a full policy check against `rev`.
    pub fn check(&self, rev: &str, policy: &Policy) -> Result<CheckReport> {
        Ok(policy.evaluate(self.tracked_files(rev, policy)?))
    }

    /// Path to the repository (the `.git` directory for non-bare repos).
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Resolve `rev` to its tree, or `None` for an unborn `HEAD`.
    fn resolve_tree(&self, rev: &str) -> Result<Option<git2::Tree<'_>>> {
        if rev == DEFAULT_REV && self.repo.is_empty()? {
            return Ok(None);
        }

        let obj = self
            .repo
            .revparse_single(rev)
            .map_err(|_| Error::revision_not_found(rev))?;
        let tree = obj
            .peel(git2::ObjectType::Tree)
            .map_err(|_| Error::revision_not_found(rev))?
            .into_tree()
            .map_err(|_| Error::revision_not_found(rev))?;
        Ok(Some(tree))
    }

    /// Build the `TrackedFile` record for one blob.
    fn classify(
        &self,
        odb: &git2::Odb<'_>,
        oid: git2::Oid,
        path: &str,
        policy: &Policy,
    ) -> Result<TrackedFile> {
        let (size, _kind) = odb.read_header(oid)?;
        let size = size as u64;

        // Pointer classification only matters for watched extensions, and a
        // pointer blob is always under MAX_POINTER_SIZE.
        let lfs = if policy.watches(path) && size < MAX_POINTER_SIZE {
            let blob = self.repo.find_blob(oid)?;
            LfsPointer::is_pointer(blob.content())
        } else {
            false
        };

        Ok(TrackedFile::new(path, size, lfs))
    }
}

/// One-shot convenience: open the repository at `path` and check `rev`.
pub fn check(path: impl AsRef<Path>, rev: &str, policy: &Policy) -> Result<CheckReport> {
    Scanner::open(path)?.check(rev, policy)
}
