//! Token storage - JSON file persistence for the auth token

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed file name under the work directory
const TOKEN_FILE: &str = "reef-token.json";

/// Persisted auth token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
    pub saved_at: String,
}

impl StoredToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Token storage under a fixed file name
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Create a token store rooted at the work directory
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        let path = work_dir.into().join(TOKEN_FILE);
        Self { path }
    }

    /// Ensure the parent directory exists
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Save a token
    pub fn save(&self, token: &str) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(&StoredToken::new(token))?;
        fs::write(&self.path, json)
    }

    /// Load the stored token, if any
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        let stored: StoredToken = serde_json::from_str(&json).ok()?;
        Some(stored.token)
    }

    /// Check whether a token is stored
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Delete the stored token (logout or 401)
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Storage path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
