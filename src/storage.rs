use crate::error::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

/// Abstract credential persistence
pub trait TokenStorage {
    /// Return the stored token, or Ok(None) when none is stored.
    fn load(&self) -> Result<Option<String>>;
    /// Persist the token.
    fn save(&self, token: &str) -> Result<()>;
    /// Delete the token.
    fn delete(&self) -> Result<()>;
}

/// File-based token persistence under `$HOME/.github-stars-manager/token`.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new() -> Self {
        let mut dir = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        dir.push(".github-stars-manager");
        dir.push("token");
        FileTokenStorage { path: dir }
    }

    pub fn with_path(path: PathBuf) -> Self {
        FileTokenStorage { path }
    }
}

impl Default for FileTokenStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(content.trim().to_string()))
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(&self.path)?;
        file.write_all(token.as_bytes())?;
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
