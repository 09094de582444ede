use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_BACKEND_URL: &str = "SURVEY_BACKEND_URL";
pub const ENV_LOGIN_EMAIL: &str = "SURVEY_LOGIN_EMAIL";
pub const ENV_LOGIN_PASSWORD: &str = "SURVEY_LOGIN_PASSWORD";

const TOKEN_FILE_NAME: &str = "auth_token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Development login used to obtain bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSettings {
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_password")]
    pub password: String,
}

fn default_email() -> String {
    "dev@test.com".to_string()
}

fn default_password() -> String {
    "devpass".to_string()
}

impl Default for LoginSettings {
    fn default() -> Self {
        Self {
            email: default_email(),
            password: default_password(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub login: LoginSettings,
    /// Directory the config was loaded from; token storage lives next to it
    #[serde(skip)]
    pub config_dir: Option<PathBuf>,
}

impl Config {
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("survey-cli")
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".survey-cli")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir)
    }

    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let mut config = Self::load_from_dir(&Self::get_config_dir()?)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join("config.toml");
        debug!("Loading config from: {:?}", config_path);

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str::<Config>(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", config_path))?
        } else {
            info!("Config file doesn't exist, using defaults");
            Config::default()
        };

        config.config_dir = Some(dir.to_path_buf());
        debug!("Using backend {}", config.backend.base_url);
        Ok(config)
    }

    /// Environment variables win over the file
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|v| !v.is_empty()) {
            debug!("Backend URL overridden from environment");
            self.backend.base_url = url;
        }
        if let Some(email) = lookup(ENV_LOGIN_EMAIL).filter(|v| !v.is_empty()) {
            self.login.email = email;
        }
        if let Some(password) = lookup(ENV_LOGIN_PASSWORD).filter(|v| !v.is_empty()) {
            self.login.password = password;
        }
    }

    pub fn save(&self) -> Result<()> {
        let dir = match &self.config_dir {
            Some(dir) => dir.clone(),
            None => Self::get_config_dir()?,
        };
        let config_path = dir.join("config.toml");
        debug!("Saving config to: {:?}", config_path);

        let content = toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;
        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    /// File holding the persisted bearer token
    pub fn token_path(&self) -> Result<PathBuf> {
        let dir = match &self.config_dir {
            Some(dir) => dir.clone(),
            None => Self::get_config_dir()?,
        };
        Ok(dir.join(TOKEN_FILE_NAME))
    }
}
