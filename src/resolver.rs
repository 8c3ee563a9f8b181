//! Identifier resolution over a task directory.
//!
//! A task can be addressed by its full identifier or by any non-empty prefix
//! of it. Operations that act on a single task must go through
//! [`Resolver::resolve_unique`], which refuses ambiguous prefixes before the
//! caller touches any record.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::task::validate_identifier;

/// Outcome of matching a prefix against stored identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Absent,
    Unique(String),
    /// All matching identifiers, sorted.
    Ambiguous(Vec<String>),
}

#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    dir: &'a Path,
}

impl<'a> Resolver<'a> {
    pub fn new(dir: &'a Path) -> Self {
        Self { dir }
    }

    /// Number of stored records whose identifier starts with `prefix`.
    pub fn count_with_prefix(&self, prefix: &str) -> Result<usize> {
        Ok(self.matching(prefix)?.len())
    }

    pub fn exists_and_is_unique(&self, prefix: &str) -> Result<bool> {
        Ok(self.count_with_prefix(prefix)? == 1)
    }

    pub fn resolve(&self, prefix: &str) -> Result<Resolution> {
        let mut matches = self.matching(prefix)?;
        let resolution = match matches.len() {
            0 => Resolution::Absent,
            1 => Resolution::Unique(matches.remove(0)),
            _ => {
                matches.sort();
                Resolution::Ambiguous(matches)
            }
        };
        tracing::debug!(prefix, ?resolution, "resolved task id");
        Ok(resolution)
    }

    /// Resolve `prefix` to exactly one identifier.
    pub fn resolve_unique(&self, prefix: &str) -> Result<String> {
        match self.resolve(prefix)? {
            Resolution::Unique(id) => Ok(id),
            Resolution::Absent => Err(Error::TaskNotFound(prefix.to_string())),
            Resolution::Ambiguous(matches) => Err(Error::AmbiguousPrefix {
                prefix: prefix.to_string(),
                matches,
            }),
        }
    }

    fn matching(&self, prefix: &str) -> Result<Vec<String>> {
        validate_identifier(prefix)?;

        let mut matches = Vec::new();
        for entry in fs::read_dir(self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if let Some(name) = name.to_str() {
                if name.starts_with(prefix) {
                    matches.push(name.to_string());
                }
            }
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SHARED_A: &str = "abcdef01-0000-4000-8000-000000000001";
    const SHARED_B: &str = "abcdef01-0000-4000-8000-000000000002";
    const DISTINCT: &str = "12345678-0000-4000-8000-000000000003";

    fn populated() -> tempfile::TempDir {
        let dir = tempdir().expect("tempdir");
        for name in [SHARED_A, SHARED_B, DISTINCT] {
            fs::write(dir.path().join(name), b"").expect("write");
        }
        dir
    }

    #[test]
    fn counts_prefix_matches() {
        let dir = populated();
        let resolver = Resolver::new(dir.path());
        assert_eq!(resolver.count_with_prefix("abcdef01").unwrap(), 2);
        assert_eq!(resolver.count_with_prefix("1234").unwrap(), 1);
        assert_eq!(resolver.count_with_prefix("ffff").unwrap(), 0);
        assert_eq!(resolver.count_with_prefix(SHARED_A).unwrap(), 1);
    }

    #[test]
    fn uniqueness_check() {
        let dir = populated();
        let resolver = Resolver::new(dir.path());
        assert!(!resolver.exists_and_is_unique("abcdef01").unwrap());
        assert!(resolver.exists_and_is_unique("12345678").unwrap());
        assert!(!resolver.exists_and_is_unique("9").unwrap());
    }

    #[test]
    fn resolve_is_tri_state() {
        let dir = populated();
        let resolver = Resolver::new(dir.path());

        assert_eq!(resolver.resolve("zz").unwrap(), Resolution::Absent);
        assert_eq!(
            resolver.resolve("1").unwrap(),
            Resolution::Unique(DISTINCT.to_string())
        );
        assert_eq!(
            resolver.resolve("abc").unwrap(),
            Resolution::Ambiguous(vec![SHARED_A.to_string(), SHARED_B.to_string()])
        );
    }

    #[test]
    fn resolve_unique_errors() {
        let dir = populated();
        let resolver = Resolver::new(dir.path());

        let err = resolver.resolve_unique("abcdef01").unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Ambiguous task id 'abcdef01': matches {SHARED_A}, {SHARED_B}")
        );
        assert!(matches!(
            resolver.resolve_unique("zz"),
            Err(Error::TaskNotFound(_))
        ));
        assert_eq!(resolver.resolve_unique(SHARED_B).unwrap(), SHARED_B);
    }

    #[test]
    fn rejects_bad_prefix_lengths() {
        let dir = populated();
        let resolver = Resolver::new(dir.path());
        assert!(matches!(
            resolver.count_with_prefix(""),
            Err(Error::InvalidIdentifier(_))
        ));
        let long = format!("{SHARED_A}0");
        assert!(matches!(
            resolver.resolve(&long),
            Err(Error::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = tempdir().expect("tempdir");
        let missing = dir.path().join("missing");
        let resolver = Resolver::new(&missing);
        assert!(matches!(resolver.count_with_prefix("a"), Err(Error::Io(_))));
    }
}
