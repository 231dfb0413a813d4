//! Session guard
//!
//! The booking views are only opened when a session token is present.

use std::path::{Path, PathBuf};

pub trait SessionStore: Send + Sync {
    /// Current token, if any
    fn token(&self) -> Option<String>;

    fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

/// Token stored in a plain file; a missing or blank file means no session
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        (!token.is_empty()).then(|| token.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session"));
        assert!(!store.has_token());
    }

    #[test]
    fn test_blank_file_has_no_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        std::fs::write(&path, "  \n").unwrap();
        assert!(!FileSessionStore::new(&path).has_token());
    }

    #[test]
    fn test_token_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session");
        std::fs::write(&path, "abc123\n").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.has_token());
        assert_eq!(store.token().as_deref(), Some("abc123"));
    }
}
