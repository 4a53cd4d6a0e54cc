//! A git-LFS tracking policy checker.
//!
//! `lfs-warden` enforces a repository policy: files with a watched extension
//! (`.png` by default) must be tracked by git LFS unless they live under an
//! exempted path prefix. It is meant to run in CI on every push and pull
//! request, failing the job when a binary slips into regular history.
//!
//! The check reads the repository directly (via `git2`) rather than shelling
//! out: the tracked set is the tree of the resolved revision, and a file
//! counts as LFS-tracked when its committed blob is a valid LFS pointer.
//!
//! # Key types
//!
//! - [`Policy`] — watched extensions plus an [`ExemptList`] of path prefixes.
//! - [`Scanner`] — opens a repository and enumerates tracked files.
//! - [`CheckReport`] — the verdict: sorted violations and summary counters.
//!
//! # Quick example
//!
//! ```rust,no_run
//! use lfs_warden::{ExemptList, Policy, Scanner};
//!
//! let exempt = ExemptList::with_options(Some(&["media"]), None).unwrap();
//! let policy = Policy::new(&["png"], exempt).unwrap();
//!
//! let scanner = Scanner::open(".").unwrap();
//! let report = scanner.check("HEAD", &policy).unwrap();
//!
//! for v in &report.violations {
//!     eprintln!("{}", v);
//! }
//! assert!(report.passed());
//! ```

pub mod error;
pub mod exempt;
pub mod pointer;
pub mod policy;
pub mod report;
pub mod scan;

// Re-export primary public types at crate root.
pub use error::{Error, Result};
pub use exempt::ExemptList;
pub use pointer::LfsPointer;
pub use policy::{Policy, DEFAULT_EXTENSION};
pub use report::{CheckReport, TrackedFile, Violation};
pub use scan::{check, Scanner, DEFAULT_REV};
