use crate::credential_store::{CredentialStore, FileCredentialStore, KeyringCredentialStore};
use crate::llm::gemini::{GEMINI_2_5_FLASH_ID, GEMINI_API_BASE_URL};
use config::{Config, ConfigError, File, FileFormat};
use extractors::DEFAULT_EXPORT_FILE_NAME;
use serde::{Deserialize, Serialize};
use shared_types::SearchParams;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_CONFIG: &str = r#"
[gemini]
# base_url = "https://generativelanguage.googleapis.com/v1beta"
model = "gemini-2.5-flash"
timeout_secs = 120

[credential]
# Where the Gemini API key is kept: "keyring" (OS keychain) or "file" (credentials.toml)
store = "keyring"

[search]
niche = "coffee shops"
city = "San Francisco"
country = "USA"
number_of_leads = 10

[export]
file_name = "generated_leads.csv"
"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct LeadgenConfig {
    pub gemini: GeminiConfig,
    pub credential: CredentialConfig,
    pub search: SearchDefaults,
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: GEMINI_API_BASE_URL.to_string(),
            model: GEMINI_2_5_FLASH_ID.to_string(),
            timeout_secs: 120,
        }
    }
}

impl GeminiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CredentialBackend {
    #[default]
    Keyring,
    File,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct CredentialConfig {
    pub store: CredentialBackend,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct SearchDefaults {
    pub niche: String,
    pub city: String,
    pub country: String,
    pub number_of_leads: u32,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        let params = SearchParams::default();
        Self {
            niche: params.niche,
            city: params.city,
            country: params.country,
            number_of_leads: params.number_of_leads,
        }
    }
}

impl SearchDefaults {
    pub fn to_params(&self) -> SearchParams {
        SearchParams::new(
            self.niche.clone(),
            self.city.clone(),
            self.country.clone(),
            self.number_of_leads,
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl LeadgenConfig {
    /// Loads the config, writing a commented default file first if none exists.
    pub fn load(path_override: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path_override
            .map(Path::to_path_buf)
            .unwrap_or_else(get_config_path);

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
            tracing::info!(path = %config_path.display(), "Created default config");
        }

        let config: LeadgenConfig = Config::builder()
            .add_source(File::from(config_path.clone()).format(FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// The credential store selected by `[credential] store`, rooted next to `config_path`.
    pub fn open_credential_store(&self, config_path: &Path) -> Arc<dyn CredentialStore> {
        match self.credential.store {
            CredentialBackend::Keyring => Arc::new(KeyringCredentialStore::new()),
            CredentialBackend::File => {
                let dir = config_path.parent().unwrap_or(Path::new("."));
                Arc::new(FileCredentialStore::in_dir(dir))
            }
        }
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("leadgen").join("config.toml")
    } else {
        PathBuf::from("leadgen.toml")
    }
}
