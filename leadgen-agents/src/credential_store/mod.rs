pub mod file_store;
pub mod keyring_store;
pub mod memory_store;

pub use file_store::FileCredentialStore;
pub use keyring_store::KeyringCredentialStore;
pub use memory_store::MemoryCredentialStore;

/// Fixed key under which the Gemini credential is stored.
pub const CREDENTIAL_KEY: &str = "gemini_api_key";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    #[error("Credential store operation failed: {0}")]
    OperationFailed(String),
}

/// Holds the single API credential across runs.
///
/// Read once when a session opens and written on every edit. Nothing clears it implicitly.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, StoreError>;

    fn save(&self, credential: &str) -> Result<(), StoreError>;

    /// Human-readable description of where the credential lives.
    fn location(&self) -> String;
}

/// Shows the first six characters and masks the rest.
pub fn mask_credential(credential: &str) -> String {
    let visible: String = credential.chars().take(6).collect();
    let hidden = credential.chars().count().saturating_sub(6);
    if hidden == 0 {
        return visible;
    }

    let masked = format!("{}{}", visible, "*".repeat(hidden));
    if masked.len() > 40 {
        format!("{}...", &masked[..37])
    } else {
        masked
    }
}
