pub mod config;
pub mod credential_store;
pub mod generator;
pub mod lead_prompt;
pub mod llm;
pub mod report;
pub mod session;

pub use config::LeadgenConfig;
pub use credential_store::{CredentialStore, StoreError};
pub use generator::LeadGenerator;
pub use llm::gemini::GeminiClient;
pub use llm::{LlmClient, LlmError};
pub use session::LeadSearchSession;
