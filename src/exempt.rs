//! Path-prefix exemption list.
//!
//! [`ExemptList`] holds the ordered set of repository subtrees that the
//! tracking policy does not apply to. Matching is component-aware: the
//! prefix `media` exempts `media/logo.png` but not `media2/logo.png`.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Ordered list of exempt path prefixes.
///
/// Prefixes are forward-slash relative paths naming a subtree (or a single
/// file) that the policy skips. Trailing slashes are stripped on add, so
/// `media/` and `media` are the same rule.
///
/// # Example
///
/// ```rust
/// use lfs_warden::ExemptList;
///
/// let mut e = ExemptList::new();
/// e.add_prefix("docs/assets").unwrap();
///
/// assert!(e.is_exempt("docs/assets/logo.png"));
/// assert!(e.is_exempt("docs/assets"));
/// assert!(!e.is_exempt("docs/assets.png"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExemptList {
    prefixes: Vec<String>,
}

impl ExemptList {
    /// Create an empty list that exempts nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list pre-loaded with inline `prefixes` and/or prefixes read
    /// from the file at `exempt_from`. Either argument may be `None`; a
    /// missing file is not an error (same behaviour as
    /// [`load_from_file`](Self::load_from_file)).
    pub fn with_options(prefixes: Option<&[&str]>, exempt_from: Option<&Path>) -> Result<Self> {
        let mut list = Self::new();
        if let Some(prefixes) = prefixes {
            for p in prefixes {
                list.add_prefix(p)?;
            }
        }
        if let Some(path) = exempt_from {
            list.load_from_file(path)?;
        }
        Ok(list)
    }

    /// Add a single prefix.
    ///
    /// Leading and trailing slashes are stripped and repeated slashes are
    /// collapsed before the prefix is stored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`] for an empty prefix or one containing
    /// `.` or `..` segments.
    pub fn add_prefix(&mut self, prefix: &str) -> Result<()> {
        let mut segments: Vec<&str> = Vec::new();
        for seg in prefix.split('/') {
            match seg {
                "" => continue,
                "." | ".." => {
                    return Err(Error::invalid_prefix(format!(
                        "segment '{}' is not allowed in '{}'",
                        seg, prefix,
                    )));
                }
                _ => segments.push(seg),
            }
        }
        if segments.is_empty() {
            return Err(Error::invalid_prefix("prefix must not be empty"));
        }
        self.prefixes.push(segments.join("/"));
        Ok(())
    }

    /// Load prefixes from a file, one per line.
    ///
    /// Blank lines and lines whose first non-whitespace character is `#` are
    /// skipped. If the file does not exist this method returns `Ok(())`
    /// silently, making it safe to pass a path that may not yet exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if it
    /// contains an invalid prefix.
    pub fn load_from_file(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }

        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        for line in contents.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            self.add_prefix(trimmed)?;
        }
        Ok(())
    }

    /// Return `true` if `rel_path` falls under any exempt prefix.
    ///
    /// `rel_path` must be a forward-slash-separated relative path, as stored
    /// in a git tree. A prefix matches the path itself and anything below it.
    pub fn is_exempt(&self, rel_path: &str) -> bool {
        self.prefixes.iter().any(|p| {
            rel_path == p
                || (rel_path.len() > p.len()
                    && rel_path.starts_with(p.as_str())
                    && rel_path.as_bytes()[p.len()] == b'/')
        })
    }

    /// Return `true` if at least one prefix has been loaded.
    pub fn active(&self) -> bool {
        !self.prefixes.is_empty()
    }

    /// The stored prefixes, in insertion order.
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
