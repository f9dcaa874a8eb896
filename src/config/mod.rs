use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub uploader: UploaderConfig,
    pub identity: IdentityConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

/// Which implementation of an upstream collaborator to construct.
/// `Memory` keeps everything in-process and is the default for local
/// development and the seed binary.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    Http,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    pub backend: Backend,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploaderConfig {
    pub backend: Backend,
    pub upload_url: Option<String>,
    pub upload_preset: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    pub backend: Backend,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub session_duration_hours: i64,
    pub secure_cookies: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.base_url", "http://localhost:8080")?
            .set_default("store.backend", "memory")?
            .set_default("uploader.backend", "memory")?
            .set_default("identity.backend", "memory")?
            .set_default("auth.session_duration_hours", 24)?
            .set_default("auth.secure_cookies", false)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with CHAPTERDESK__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("CHAPTERDESK").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                base_url: "http://localhost:8080".to_string(),
            },
            store: StoreConfig {
                backend: Backend::Memory,
                base_url: None,
                api_key: None,
            },
            uploader: UploaderConfig {
                backend: Backend::Memory,
                upload_url: None,
                upload_preset: None,
            },
            identity: IdentityConfig {
                backend: Backend::Memory,
                base_url: None,
                api_key: None,
            },
            auth: AuthConfig {
                session_duration_hours: 24,
                secure_cookies: false,
            },
        }
    }
}
