use super::{CredentialStore, StoreError};
use std::sync::RwLock;

/// Process-local store; nothing survives the process.
#[derive(Default)]
pub struct MemoryCredentialStore {
    credential: RwLock<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: &str) -> Self {
        Self {
            credential: RwLock::new(Some(credential.to_string())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let credential = self.credential.read().map_err(|e| {
            StoreError::OperationFailed(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(credential.clone())
    }

    fn save(&self, credential: &str) -> Result<(), StoreError> {
        let mut slot = self.credential.write().map_err(|e| {
            StoreError::OperationFailed(format!("Failed to acquire write lock: {}", e))
        })?;
        *slot = Some(credential.to_string());
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
