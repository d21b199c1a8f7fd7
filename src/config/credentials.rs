//! Provider credential resolution.
//!
//! The key is resolved once and handed to every client explicitly, so nothing
//! writes it back into the process environment.

use super::Settings;
use crate::error::{MarqueeError, Result};
use std::path::Path;
use tracing::debug;

const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Where a resolved key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    DotEnv,
    ConfigFile,
    /// Supplied directly by the caller.
    Explicit,
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::DotEnv => write!(f, ".env file"),
            CredentialSource::ConfigFile => write!(f, "config file"),
            CredentialSource::Explicit => write!(f, "caller"),
        }
    }
}

/// API credentials for the embedding and chat provider.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    source: CredentialSource,
}

impl Credentials {
    /// Build credentials from an explicit key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            source: CredentialSource::Explicit,
        }
    }

    /// Resolve the API key from the environment, `./.env`, then the config file.
    pub fn resolve(settings: &Settings) -> Result<Self> {
        Self::resolve_with(settings, Path::new(".env"))
    }

    /// Same as [`Credentials::resolve`] with an explicit dotenv path.
    pub fn resolve_with(settings: &Settings, dotenv_path: &Path) -> Result<Self> {
        if let Some(key) = non_empty(std::env::var(API_KEY_VAR).ok()) {
            return Ok(Self::from_source(key, CredentialSource::Environment));
        }

        if let Some(key) = non_empty(read_dotenv_key(dotenv_path)?) {
            return Ok(Self::from_source(key, CredentialSource::DotEnv));
        }

        if let Some(key) = non_empty(settings.openai.api_key.clone()) {
            return Ok(Self::from_source(key, CredentialSource::ConfigFile));
        }

        Err(MarqueeError::Config(format!(
            "{} not set. Export it, add it to .env, or set [openai] api_key in {}",
            API_KEY_VAR,
            Settings::default_config_path().display()
        )))
    }

    fn from_source(api_key: String, source: CredentialSource) -> Self {
        debug!("Using API key from {}", source);
        Self { api_key, source }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn source(&self) -> CredentialSource {
        self.source
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("source", &self.source)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Read the key from a dotenv file without touching the process environment.
fn read_dotenv_key(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }

    let entries = dotenvy::from_path_iter(path)
        .map_err(|e| MarqueeError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

    for entry in entries {
        let (key, value) = entry
            .map_err(|e| MarqueeError::Config(format!("Invalid line in {}: {}", path.display(), e)))?;
        if key == API_KEY_VAR {
            return Ok(Some(value));
        }
    }

    Ok(None)
}
