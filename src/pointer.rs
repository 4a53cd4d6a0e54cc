//! Git LFS pointer file parsing.
//!
//! An LFS-tracked file is stored in history as a small text "pointer" blob
//! that names the real content by sha256 and size. Classifying a blob as
//! LFS-tracked therefore reduces to parsing it as a pointer.

/// Pointer blobs are always smaller than this (per the git-lfs spec).
pub const MAX_POINTER_SIZE: u64 = 1024;

/// First-line prefix of a current-format pointer.
const VERSION_PREFIX: &str = "version https://git-lfs.github.com/spec/";

/// First-line prefix written by pre-1.0 clients; still accepted on read.
const LEGACY_VERSION_PREFIX: &str = "version https://hawser.github.com/spec/";

/// A parsed LFS pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LfsPointer {
    /// Content sha256, lowercase hex, without the `sha256:` prefix.
    pub oid: String,
    /// Size in bytes of the real content.
    pub size: u64,
}

impl LfsPointer {
    /// Parse a blob as an LFS pointer, returning `None` if it is not one.
    ///
    /// The parse is deliberately strict so that a real binary (or an
    /// unrelated small text file) is never misclassified:
    ///
    /// - total size under [`MAX_POINTER_SIZE`] bytes, valid UTF-8
    /// - first line is a recognized `version` URL
    /// - an `oid sha256:<64 lowercase hex>` line
    /// - a `size <decimal>` line
    /// - every line is `key value` with a single space separator
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.is_empty() || data.len() as u64 >= MAX_POINTER_SIZE {
            return None;
        }
        let text = std::str::from_utf8(data).ok()?;

        let mut lines = text.lines();
        let version = lines.next()?;
        if !version.starts_with(VERSION_PREFIX) && !version.starts_with(LEGACY_VERSION_PREFIX) {
            return None;
        }

        let mut oid: Option<&str> = None;
        let mut size: Option<u64> = None;

        for line in lines {
            if line.is_empty() {
                // Only a final trailing newline is tolerated; `lines()`
                // already swallows that, so an embedded blank line is malformed.
                return None;
            }
            let (key, value) = line.split_once(' ')?;
            match key {
                "oid" => {
                    let hex = value.strip_prefix("sha256:")?;
                    if !is_sha256_hex(hex) {
                        return None;
                    }
                    oid = Some(hex);
                }
                "size" => {
                    size = Some(value.parse().ok()?);
                }
                // Other keys (e.g. extensions) are allowed as long as the
                // key name is plausible.
                _ if is_pointer_key(key) => {}
                _ => return None,
            }
        }

        Some(LfsPointer {
            oid: oid?.to_string(),
            size: size?,
        })
    }

    /// Cheap test without building the parsed value.
    pub fn is_pointer(data: &[u8]) -> bool {
        Self::parse(data).is_some()
    }
}

fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Pointer keys are ASCII alphanumeric plus `-`, `.` and `_`.
fn is_pointer_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const OID: &str = "4d7a214614ab2935c943f9e0ff69d22eadbb8f32b1258daaa5e2ca24d17e2393";

    fn pointer_text() -> String {
        format!(
            "version https://git-lfs.github.com/spec/v1\noid sha256:{}\nsize 12345\n",
            OID
        )
    }

    #[test]
    fn parse_valid_pointer() {
        let p = LfsPointer::parse(pointer_text().as_bytes()).unwrap();
        assert_eq!(p.oid, OID);
        assert_eq!(p.size, 12345);
    }

    #[test]
    fn parse_without_trailing_newline() {
        let text = pointer_text();
        let p = LfsPointer::parse(text.trim_end().as_bytes()).unwrap();
        assert_eq!(p.size, 12345);
    }

    #[test]
    fn parse_legacy_version_url() {
        let text = format!(
            "version https://hawser.github.com/spec/v1\noid sha256:{}\nsize 9\n",
            OID
        );
        assert!(LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn parse_extra_keys_allowed() {
        let text = format!(
            "version https://git-lfs.github.com/spec/v1\next-0-foo sha256:{oid}\noid sha256:{oid}\nsize 1\n",
            oid = OID
        );
        assert!(LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn reject_empty() {
        assert!(!LfsPointer::is_pointer(b""));
    }

    #[test]
    fn reject_binary_data() {
        // A plausible PNG header.
        assert!(!LfsPointer::is_pointer(b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR"));
    }

    #[test]
    fn reject_wrong_version_line() {
        let text = format!("version 1\noid sha256:{}\nsize 1\n", OID);
        assert!(!LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn reject_missing_oid() {
        let text = "version https://git-lfs.github.com/spec/v1\nsize 1\n";
        assert!(!LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn reject_missing_size() {
        let text = format!("version https://git-lfs.github.com/spec/v1\noid sha256:{}\n", OID);
        assert!(!LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn reject_short_oid() {
        let text = "version https://git-lfs.github.com/spec/v1\noid sha256:abcd\nsize 1\n";
        assert!(!LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn reject_uppercase_oid() {
        let text = format!(
            "version https://git-lfs.github.com/spec/v1\noid sha256:{}\nsize 1\n",
            OID.to_uppercase()
        );
        assert!(!LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn reject_non_numeric_size() {
        let text = format!(
            "version https://git-lfs.github.com/spec/v1\noid sha256:{}\nsize lots\n",
            OID
        );
        assert!(!LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn reject_embedded_blank_line() {
        let text = format!(
            "version https://git-lfs.github.com/spec/v1\n\noid sha256:{}\nsize 1\n",
            OID
        );
        assert!(!LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn reject_oversized_blob() {
        let mut text = pointer_text();
        text.push_str(&"x".repeat(2000));
        assert!(!LfsPointer::is_pointer(text.as_bytes()));
    }

    #[test]
    fn reject_invalid_utf8() {
        let mut data = pointer_text().into_bytes();
        data.push(0xff);
        data.push(0xfe);
        assert!(!LfsPointer::is_pointer(&data));
    }
}
