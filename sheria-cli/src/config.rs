use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sheria_client::{Credentials, DEFAULT_NAMESPACE};
use sheria_forms::DEFAULT_CURRENCY;
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::{io::Write, os::unix::fs::OpenOptionsExt};

const APP_DIR: &str = "sheria";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Base URL of the site, e.g. "https://erp.example.co.ke"
    pub url: String,
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                url: "http://localhost:8000".to_string(),
                namespace: DEFAULT_NAMESPACE.to_string(),
                api_key: None,
                api_secret: None,
            },
            display: DisplaySettings {
                currency: DEFAULT_CURRENCY.to_string(),
            },
        }
    }
}

impl Settings {
    /// API keys win over a saved session; with neither we call as a guest.
    pub fn credentials(&self, saved_session: Option<String>) -> Credentials {
        match (&self.server.api_key, &self.server.api_secret, saved_session) {
            (Some(key), Some(secret), _) => Credentials::token(key, secret),
            (_, _, Some(sid)) => Credentials::Session { sid },
            _ => Credentials::Guest,
        }
    }
}

fn root_path() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join(APP_DIR))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(root_path()?.join("config.toml"))
}

pub fn session_path() -> Result<PathBuf> {
    Ok(root_path()?.join("session"))
}

/// Defaults, then the config file if there is one, then `SHERIA_*`
/// environment variables (`SHERIA_SERVER__URL` and so on).
pub fn read_config() -> Result<Settings> {
    read_config_from(&config_path()?)
}

fn read_config_from(path: &Path) -> Result<Settings> {
    let defaults = Settings::default();

    let settings = config::Config::builder()
        .set_default("server.url", defaults.server.url)?
        .set_default("server.namespace", defaults.server.namespace)?
        .set_default("display.currency", defaults.display.currency)?
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("SHERIA")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| format!("Failed to load config from {}", path.display()))?;

    settings
        .try_deserialize::<Settings>()
        .context("Invalid configuration")
}

/// Writes the default config unless one already exists.
pub fn ensure_config_file() -> Result<PathBuf> {
    let path = config_path()?;
    if !path.exists() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(&Settings::default())?;
        std::fs::write(&path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
    }
    Ok(path)
}

fn secure_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    #[cfg(unix)]
    {
        std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)?
            .write_all(content.as_bytes())?;
    }

    #[cfg(not(unix))]
    {
        std::fs::write(path, content)?;
    }

    Ok(())
}

pub fn load_session() -> Result<Option<String>> {
    let path = session_path()?;
    if !path.exists() {
        return Ok(None);
    }

    let session = std::fs::read_to_string(&path).context("Failed to read session file")?;
    let session = session.trim().to_string();
    if session.is_empty() {
        return Ok(None);
    }
    Ok(Some(session))
}

pub fn save_session(sid: &str) -> Result<()> {
    let path = session_path()?;
    secure_write(path.as_path(), sid)
}

pub fn clear_session() -> Result<()> {
    let path = session_path()?;
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}
