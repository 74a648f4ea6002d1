//! Client configuration

use std::path::PathBuf;

use crate::error::{ClientError, ClientResult};
use crate::work_order::CountExtractionTable;

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "FIELDOPS_API_BASE_URL";
/// Environment variable overriding the request timeout (seconds)
pub const ENV_TIMEOUT_SECS: &str = "FIELDOPS_API_TIMEOUT_SECS";
/// Environment variable overriding the credential store location
pub const ENV_STORAGE_PATH: &str = "FIELDOPS_STORAGE_PATH";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client configuration for the field-service API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "https://dcpqa.semdcp.com/api")
    pub base_url: String,

    /// Request timeout in seconds, applied to every call
    pub timeout: u64,

    /// Credential store file
    pub storage_path: PathBuf,

    /// How each dashboard bucket turns a response into a count
    pub count_extraction: CountExtractionTable,
}

impl ClientConfig {
    /// Create a configuration with defaults for everything but the base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT_SECS,
            storage_path: default_storage_path(),
            count_extraction: CountExtractionTable::default(),
        }
    }

    /// Load configuration from the environment (and `.env` if present)
    ///
    /// `FIELDOPS_API_BASE_URL` is required; there is no built-in host.
    pub fn from_env() -> ClientResult<Self> {
        dotenvy::dotenv().ok();

        let base_url = std::env::var(ENV_BASE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ClientError::Config(format!("{ENV_BASE_URL} must be set")))?;

        let mut config = Self::new(base_url);

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs = raw
                .parse()
                .map_err(|_| ClientError::Config(format!("{ENV_TIMEOUT_SECS} is not a number: {raw}")))?;
            config = config.with_timeout(secs);
        }

        if let Ok(path) = std::env::var(ENV_STORAGE_PATH) {
            config = config.with_storage_path(path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the credential store file
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    /// Override the per-bucket count extraction
    pub fn with_count_extraction(mut self, table: CountExtractionTable) -> Self {
        self.count_extraction = table;
        self
    }

    /// Check the configuration before building clients
    pub fn validate(&self) -> ClientResult<()> {
        let url = self.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base_url must be an http(s) URL: {}",
                self.base_url
            )));
        }
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be positive".into()));
        }
        Ok(())
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("fieldops_storage").join("credentials.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work_order::CountExtraction;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("https://api.example.com/api/");
        assert_eq!(config.timeout, 10);
        assert_eq!(config.storage_path, PathBuf::from("fieldops_storage/credentials.json"));
        assert_eq!(config.count_extraction.pending_assignment, CountExtraction::Amount);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::new("ftp://nope").validate().is_err());
        assert!(ClientConfig::new("http://localhost:8080").with_timeout(0).validate().is_err());
    }
}
