use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid path segment {segment:?}")]
pub struct InvalidSegment {
    pub segment: String,
}

pub fn canonical_to_string(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Joins one entry name onto a base directory. Entry names come straight
/// from directory listings, so anything that could escape the base
/// (separators, `.`/`..`, empty names) is malformed rather than an error to
/// resolve.
pub fn join_path(base: &Path, segment: &str) -> Result<PathBuf, InvalidSegment> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains(['/', '\\']) {
        return Err(InvalidSegment {
            segment: segment.to_string(),
        });
    }
    Ok(base.join(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_plain_segments() {
        let joined = join_path(Path::new("/vault/notes"), "a.md").unwrap();
        assert_eq!(joined, PathBuf::from("/vault/notes/a.md"));
    }

    #[test]
    fn rejects_malformed_segments() {
        for bad in ["", ".", "..", "a/b", "a\\b"] {
            assert!(join_path(Path::new("/vault"), bad).is_err(), "{bad:?}");
        }
    }
}
