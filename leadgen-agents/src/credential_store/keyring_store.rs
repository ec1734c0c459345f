use super::{CredentialStore, StoreError, CREDENTIAL_KEY};
use keyring::Entry;

pub const KEYRING_SERVICE: &str = "leadgen";

/// Keeps the credential in the operating system keychain.
pub struct KeyringCredentialStore {
    service: String,
    username: String,
}

impl KeyringCredentialStore {
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
            username: CREDENTIAL_KEY.to_string(),
        }
    }

    fn entry(&self) -> Result<Entry, StoreError> {
        Entry::new(&self.service, &self.username).map_err(|e| {
            StoreError::Unavailable(format!("Failed to create keychain entry: {}", e))
        })
    }
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match self.entry()?.get_password() {
            Ok(credential) => Ok(Some(credential)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StoreError::OperationFailed(format!(
                "Failed to retrieve credential: {}",
                e
            ))),
        }
    }

    fn save(&self, credential: &str) -> Result<(), StoreError> {
        self.entry()?.set_password(credential).map_err(|e| {
            StoreError::OperationFailed(format!("Failed to store credential: {}", e))
        })?;
        tracing::debug!(service = %self.service, "Stored credential in keychain");
        Ok(())
    }

    fn location(&self) -> String {
        format!("OS keychain (service '{}', account '{}')", self.service, self.username)
    }
}
