use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::generator::GeneratorOptions;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub security: SecurityConfig,

    pub generator: GeneratorConfig,

    pub bootstrap: BootstrapConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/mikrogen.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,

    /// Whether to set the Secure flag on session cookies.
    /// Set to false for local development without HTTPS.
    pub secure_cookies: bool,

    /// Sessions expire after this many minutes without a request.
    pub session_inactivity_minutes: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            cors_allowed_origins: vec![
                "http://localhost:5000".to_string(),
                "http://127.0.0.1:5000".to_string(),
            ],
            secure_cookies: true,
            session_inactivity_minutes: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Argon2 memory cost in KiB (default: 8192 = 8MB)
    pub argon2_memory_cost_kib: u32,

    /// Argon2 time cost (iterations)
    pub argon2_time_cost: u32,

    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,

    /// Minimum length for account passwords set through the API
    pub min_password_length: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            argon2_memory_cost_kib: 8192,
            argon2_time_cost: 3,
            argon2_parallelism: 1,
            min_password_length: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Upper bound for the password length of generated hotspot users
    pub max_password_length: usize,

    /// Reject base IPs that are neither 3 nor 4 octets instead of reusing them verbatim
    pub reject_malformed_base_ip: bool,

    /// Generated batches are kept for export this long after their last access
    pub batch_ttl_minutes: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_password_length: 128,
            reject_malformed_base_ip: false,
            batch_ttl_minutes: 60,
        }
    }
}

impl GeneratorConfig {
    #[must_use]
    pub const fn options(&self) -> GeneratorOptions {
        GeneratorOptions {
            max_password_length: self.max_password_length,
            reject_malformed_base_ip: self.reject_malformed_base_ip,
        }
    }

    #[must_use]
    pub const fn batch_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.batch_ttl_minutes.saturating_mul(60))
    }
}

/// Administrator account created on first start when missing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    pub enabled: bool,

    pub admin_username: String,

    pub admin_email: String,

    pub admin_password: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            admin_username: "admin".to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,

    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
            json_logs: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        let mut config = match paths.iter().find(|p| p.exists()) {
            Some(path) => {
                info!("Loading config from: {}", path.display());
                Self::load_from_path(path)?
            }
            None => {
                info!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// `DATABASE_URL` and `MIKROGEN_LOG_LEVEL` take precedence over the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL")
            && !url.is_empty()
        {
            self.general.database_path = url;
        }

        if let Ok(level) = std::env::var("MIKROGEN_LOG_LEVEL")
            && !level.is_empty()
        {
            self.general.log_level = level;
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("mikrogen").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".mikrogen").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            Self::default().save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.database_path.is_empty() {
            anyhow::bail!("Database path cannot be empty");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!("min_db_connections cannot exceed max_db_connections");
        }

        if self.generator.max_password_length == 0 {
            anyhow::bail!("generator.max_password_length must be > 0");
        }

        if self.generator.batch_ttl_minutes == 0 {
            anyhow::bail!("generator.batch_ttl_minutes must be > 0");
        }

        if self.server.session_inactivity_minutes <= 0 {
            anyhow::bail!("server.session_inactivity_minutes must be > 0");
        }

        if self.bootstrap.enabled
            && (self.bootstrap.admin_username.is_empty() || self.bootstrap.admin_password.is_empty())
        {
            anyhow::bail!("Bootstrap admin username and password cannot be empty when enabled");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.generator.max_password_length, 128);
        assert!(!config.generator.reject_malformed_base_ip);
        assert_eq!(config.bootstrap.admin_username, "admin");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[server]"));
        assert!(toml_str.contains("[generator]"));
        assert!(toml_str.contains("[bootstrap]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [generator]
            reject_malformed_base_ip = true
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert!(config.generator.reject_malformed_base_ip);

        assert_eq!(config.generator.max_password_length, 128);
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_generator_options_from_config() {
        let mut config = GeneratorConfig::default();
        config.max_password_length = 32;
        config.reject_malformed_base_ip = true;

        let options = config.options();
        assert_eq!(options.max_password_length, 32);
        assert!(options.reject_malformed_base_ip);
        assert_eq!(
            GeneratorConfig::default().batch_ttl(),
            std::time::Duration::from_secs(3600)
        );

        config.batch_ttl_minutes = u64::MAX;
        assert_eq!(config.batch_ttl(), std::time::Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.generator.max_password_length = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.general.min_db_connections = 10;
        assert!(config.validate().is_err());
    }
}
