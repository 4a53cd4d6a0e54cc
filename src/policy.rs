//! The tracking policy and its evaluation.
//!
//! A [`Policy`] is the authored configuration: which file extensions must be
//! LFS-tracked, and which subtrees are exempt. Evaluation is pure set
//! algebra over [`TrackedFile`] records; git access lives in [`crate::scan`].

use crate::error::{Error, Result};
use crate::exempt::ExemptList;
use crate::report::{CheckReport, TrackedFile};

/// Extension watched when none is configured.
pub const DEFAULT_EXTENSION: &str = "png";

/// A binary-tracking policy.
///
/// A tracked file violates the policy when all three hold:
///
/// 1. its extension is watched,
/// 2. it is not under an exempt prefix,
/// 3. it is not an LFS pointer.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Watched extensions, lowercase, without the leading dot.
    extensions: Vec<String>,
    exempt: ExemptList,
}

impl Default for Policy {
    /// Watch `.png` files everywhere.
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            exempt: ExemptList::new(),
        }
    }
}

impl Policy {
    /// Build a policy from extension names and an exemption list.
    ///
    /// Extensions may be given with or without a leading dot (`".png"` and
    /// `"png"` are the same) and are matched case-insensitively. An empty
    /// slice falls back to [`DEFAULT_EXTENSION`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExtension`] for an empty extension or one
    /// containing a slash or an interior dot.
    pub fn new(extensions: &[&str], exempt: ExemptList) -> Result<Self> {
        let mut parsed = Vec::with_capacity(extensions.len().max(1));
        for raw in extensions {
            parsed.push(normalize_extension(raw)?);
        }
        if parsed.is_empty() {
            parsed.push(DEFAULT_EXTENSION.to_string());
        }
        Ok(Self {
            extensions: parsed,
            exempt,
        })
    }

    /// The watched extensions, lowercase, without leading dots.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// The exemption list.
    pub fn exempt(&self) -> &ExemptList {
        &self.exempt
    }

    /// Whether `rel_path` has a watched extension.
    ///
    /// Matching is against the final extension of the basename, so a policy
    /// watching `gz` flags `dump.tar.gz` and one watching `tar` does not.
    /// A basename that *is* the extension (e.g. a file literally named
    /// `png`) does not match, mirroring how git attributes treat `*.png`.
    pub fn watches(&self, rel_path: &str) -> bool {
        let basename = rel_path.rsplit('/').next().unwrap_or(rel_path);
        let Some((stem, ext)) = basename.rsplit_once('.') else {
            return false;
        };
        if stem.is_empty() {
            // Dotfiles like `.png` have no extension.
            return false;
        }
        self.extensions.iter().any(|e| ext.eq_ignore_ascii_case(e))
    }

    /// Evaluate the policy over an already-enumerated file listing.
    ///
    /// The returned report's violations are sorted by path.
    pub fn evaluate<I>(&self, files: I) -> CheckReport
    where
        I: IntoIterator<Item = TrackedFile>,
    {
        let mut report = CheckReport::default();

        for file in files {
            report.scanned += 1;
            if !self.watches(&file.path) {
                continue;
            }
            report.candidates += 1;
            if self.exempt.is_exempt(&file.path) {
                report.exempted += 1;
                continue;
            }
            if file.lfs {
                report.lfs_tracked += 1;
                continue;
            }
            report.push(file.path, file.size);
        }

        report.finish()
    }
}

/// Strip an optional leading dot and lowercase; reject anything that could
/// not be a file extension.
fn normalize_extension(raw: &str) -> Result<String> {
    let ext = raw.strip_prefix('.').unwrap_or(raw);
    if ext.is_empty() {
        return Err(Error::invalid_extension("extension must not be empty"));
    }
    if ext.contains('/') || ext.contains('.') {
        return Err(Error::invalid_extension(raw));
    }
    Ok(ext.to_ascii_lowercase())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
