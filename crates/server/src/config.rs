use std::path::Path;

use anyhow::{Context, anyhow};
use serde::Deserialize;
type Result<T> = anyhow::Result<T>;

pub const DEFAULT_CONFIG_PATH: &str = "leettrack.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Reads `path` when it exists, falls back to defaults otherwise, then
    /// applies `DATABASE_URL` and `LEETTRACK_BIND_ADDR` from the environment.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::from_str("")?
        };

        config.apply_overrides(
            std::env::var("DATABASE_URL").ok(),
            std::env::var("LEETTRACK_BIND_ADDR").ok(),
        );
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("failed to deserialize server config")
    }

    fn apply_overrides(&mut self, database_url: Option<String>, bind_addr: Option<String>) {
        if let Some(url) = database_url.filter(|url| !url.is_empty()) {
            self.database.url = Some(url);
        }
        if let Some(addr) = bind_addr.filter(|addr| !addr.is_empty()) {
            self.bind_addr = addr;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.is_none() {
            return Err(anyhow!(
                "database url is not configured; set DATABASE_URL or [database].url"
            ));
        }
        if self.database.max_connections == 0 {
            return Err(anyhow!("[database].max_connections must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Header carrying the signed-in user's email, set by the
    /// authenticating proxy in front of this server.
    #[serde(default = "default_identity_header")]
    pub identity_header: String,
    /// Create a user row the first time an unknown email signs in.
    #[serde(default)]
    pub provision_users: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            identity_header: default_identity_header(),
            provision_users: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout_secs() -> u64 {
    8
}

fn default_identity_header() -> String {
    "x-auth-request-email".to_string()
}

#[cfg(test)]
mod tests {
    use super::ServerConfig;

    #[test]
    fn test_parse_config() {
        let raw = r#"
bind_addr = "127.0.0.1:8080"

[database]
url = "postgres://tracker@localhost/tracker"
max_connections = 4

[auth]
identity_header = "x-forwarded-email"
provision_users = true

[cors]
allowed_origins = ["http://localhost:5173"]
"#;

        let config = ServerConfig::from_str(raw).expect("config should parse");
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://tracker@localhost/tracker")
        );
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.connect_timeout_secs, 8);
        assert_eq!(config.auth.identity_header, "x-forwarded-email");
        assert!(config.auth.provision_users);
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn empty_config_uses_defaults_and_needs_a_database_url() {
        let mut config = ServerConfig::from_str("").expect("empty config should parse");
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.identity_header, "x-auth-request-email");
        assert!(!config.auth.provision_users);
        assert!(config.cors.allowed_origins.is_empty());

        let err = config.validate().expect_err("database url is required");
        assert!(err.to_string().contains("DATABASE_URL"));

        config.apply_overrides(Some("sqlite::memory:".to_string()), Some(String::new()));
        assert_eq!(config.database.url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        config.validate().expect("config should now be valid");
    }
}
