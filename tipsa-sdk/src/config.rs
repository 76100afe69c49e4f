use crate::encoding::TextEncoding;
use crate::sdk_error::SdkError;
use serde::Deserialize;
use std::time::Duration;

pub const PRODUCTION_URL: &str = "http://webservices.tipsa-dinapaq.com:8099/SOAP?service=";
pub const TEST_URL: &str = "https://wsval.tipsa-dinapaq.com/SOAP?service=";

/// Which TIPSA deployment to talk to.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Test,
    Production,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Test => TEST_URL,
            Environment::Production => PRODUCTION_URL,
        }
    }
}

/// Connection parameters for a client. The service name is appended to
/// [base_url][ClientConfig::base_url] to build every request URL.
#[derive(Deserialize, Debug, Clone, PartialEq, uniffi::Record)]
pub struct ClientConfig {
    pub agency: String,
    pub client: String,
    pub password: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub retries: u32,
    #[serde(default)]
    pub encoding: TextEncoding,
}

fn default_language() -> String {
    "ES".to_string()
}

fn default_base_url() -> String {
    TEST_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Credentials against the test deployment, in Spanish.
    pub fn new(agency: &str, client: &str, password: &str) -> Self {
        Self {
            agency: agency.to_string(),
            client: client.to_string(),
            password: password.to_string(),
            language: default_language(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            retries: 0,
            encoding: TextEncoding::default(),
        }
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.base_url = environment.base_url().to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Number of extra attempts for requests that failed at the transport level.
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn url_for(&self, service: &str) -> String {
        format!("{}{service}", self.base_url)
    }

    pub fn validate(&self) -> Result<(), SdkError> {
        let required = [
            ("agency", &self.agency),
            ("client", &self.client),
            ("password", &self.password),
            ("base_url", &self.base_url),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(SdkError::InvalidConfig {
                    reason: format!("{name} must not be empty"),
                });
            }
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SdkError::InvalidConfig {
                reason: format!("{} is not an HTTP URL", self.base_url),
            });
        }

        if self.timeout_secs == 0 {
            return Err(SdkError::InvalidConfig {
                reason: "timeout_secs must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
