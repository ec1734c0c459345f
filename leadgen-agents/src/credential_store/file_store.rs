use super::{CredentialStore, StoreError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CREDENTIAL_FILE_NAME: &str = "credentials.toml";

#[derive(Debug, Default, Deserialize, Serialize)]
struct CredentialFile {
    gemini_api_key: Option<String>,
}

/// Keeps the credential in a TOML file next to the config.
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `credentials.toml` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(CREDENTIAL_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            StoreError::OperationFailed(format!("Failed to read {:?}: {}", self.path, e))
        })?;
        let file: CredentialFile = toml::from_str(&raw).map_err(|e| {
            StoreError::OperationFailed(format!("Failed to parse {:?}: {}", self.path, e))
        })?;

        Ok(file.gemini_api_key)
    }

    fn save(&self, credential: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("Failed to create {:?}: {}", parent, e))
            })?;
        }

        let file = CredentialFile {
            gemini_api_key: Some(credential.to_string()),
        };
        let toml_string = toml::to_string(&file).map_err(|e| {
            StoreError::OperationFailed(format!("Failed to serialize credential: {}", e))
        })?;

        std::fs::write(&self.path, toml_string).map_err(|e| {
            StoreError::OperationFailed(format!("Failed to write {:?}: {}", self.path, e))
        })?;
        restrict_permissions(&self.path)?;

        tracing::debug!(path = %self.path.display(), "Stored credential in file");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).map_err(|e| {
        StoreError::OperationFailed(format!("Failed to restrict {:?}: {}", path, e))
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}
