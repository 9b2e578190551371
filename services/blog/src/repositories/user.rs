//! User directory for login credential lookup

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use crate::models::UserCredential;

/// Read-only credential lookup
pub trait UserDirectory: Send + Sync {
    /// Find the entry whose username and password both match exactly
    fn find(&self, username: &str, password: &str) -> Option<UserCredential>;
}

/// User directory holding a fixed list loaded at start-up
#[derive(Debug, Clone, Default)]
pub struct StaticUserDirectory {
    users: Vec<UserCredential>,
}

impl StaticUserDirectory {
    pub fn new(users: Vec<UserCredential>) -> Self {
        Self { users }
    }

    /// Load the directory from a JSON array of `{"username", "password"}`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read users file {}", path.display()))?;
        let users: Vec<UserCredential> = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid users file {}", path.display()))?;

        info!("Loaded {} users from {}", users.len(), path.display());
        Ok(Self::new(users))
    }
}

impl UserDirectory for StaticUserDirectory {
    fn find(&self, username: &str, password: &str) -> Option<UserCredential> {
        self.users
            .iter()
            .find(|user| user.username == username && user.password == password)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn directory() -> StaticUserDirectory {
        StaticUserDirectory::new(vec![
            UserCredential {
                username: "tienkim9920".to_string(),
                password: "123".to_string(),
            },
            UserCredential {
                username: "editor".to_string(),
                password: "s3cret".to_string(),
            },
        ])
    }

    #[test]
    fn test_find_requires_both_fields_to_match() {
        let users = directory();

        assert_eq!(
            users.find("editor", "s3cret").map(|u| u.username),
            Some("editor".to_string())
        );
        assert!(users.find("editor", "123").is_none());
        assert!(users.find("Editor", "s3cret").is_none());
        assert!(users.find("", "").is_none());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"username":"tienkim9920","password":"123"}},{{"username":"editor","password":"s3cret"}}]"#
        )
        .unwrap();

        let users = StaticUserDirectory::from_file(file.path()).unwrap();
        assert!(users.find("tienkim9920", "123").is_some());
        assert!(users.find("editor", "s3cret").is_some());
        assert!(users.find("editor", "123").is_none());
    }

    #[test]
    fn test_from_file_rejects_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "tienkim9920:123").unwrap();

        assert!(StaticUserDirectory::from_file(file.path()).is_err());
    }
}
