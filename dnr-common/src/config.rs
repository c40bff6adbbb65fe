//! Layered configuration resolution
//!
//! Each setting is resolved in this priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (applied by the caller when nothing else matched)
//!
//! The environment is read through an injected lookup function, so callers
//! (and tests) can resolve configuration without touching the process
//! environment.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment lookup function
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Configuration sources below the command line: environment and config file
pub struct ConfigLayers {
    env: EnvLookup,
    file: Option<toml::Table>,
    file_path: Option<PathBuf>,
}

impl ConfigLayers {
    /// Create layers with a custom environment lookup and no config file
    pub fn new<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            env: Box::new(env),
            file: None,
            file_path: None,
        }
    }

    /// Create layers backed by the real process environment
    pub fn from_process_env() -> Self {
        Self::new(|key| std::env::var(key).ok())
    }

    /// Attach TOML config contents
    pub fn with_toml_str(mut self, contents: &str) -> Result<Self> {
        let table = contents
            .parse::<toml::Table>()
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        self.file = Some(table);
        Ok(self)
    }

    /// Attach a TOML config file
    ///
    /// An explicitly requested file must exist and parse.
    pub fn with_file(mut self, path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let table = contents
            .parse::<toml::Table>()
            .map_err(|e| Error::Config(format!("Invalid TOML in {}: {}", path.display(), e)))?;
        self.file = Some(table);
        self.file_path = Some(path.to_path_buf());
        debug!("Loaded config file {}", path.display());
        Ok(self)
    }

    /// Attach the platform default config file if one exists
    ///
    /// A missing or unreadable default file is not an error: the service
    /// starts on environment and compiled defaults.
    pub fn with_default_file(self, app_dir: &str) -> Self {
        match default_config_file(app_dir) {
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(contents) => match contents.parse::<toml::Table>() {
                    Ok(table) => Self {
                        file: Some(table),
                        file_path: Some(path),
                        ..self
                    },
                    Err(e) => {
                        warn!("Ignoring invalid config file {}: {}", path.display(), e);
                        self
                    }
                },
                Err(e) => {
                    warn!("Could not read config file {}: {}", path.display(), e);
                    self
                }
            },
            None => self,
        }
    }

    /// Path of the config file in use, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Resolve one setting through CLI > env > file
    ///
    /// Empty strings in the environment count as unset. TOML integers and
    /// booleans are returned in their string form.
    pub fn resolve(&self, cli: Option<&str>, env_var: &str, file_key: &str) -> Option<String> {
        if let Some(value) = cli {
            return Some(value.to_string());
        }

        if let Some(value) = (self.env)(env_var).filter(|v| !v.is_empty()) {
            return Some(value);
        }

        self.file
            .as_ref()
            .and_then(|table| table.get(file_key))
            .and_then(|value| match value {
                toml::Value::String(s) => Some(s.clone()),
                toml::Value::Integer(i) => Some(i.to_string()),
                toml::Value::Boolean(b) => Some(b.to_string()),
                _ => None,
            })
    }

    /// Resolve one setting, falling back to a compiled default
    pub fn resolve_or(&self, cli: Option<&str>, env_var: &str, file_key: &str, default: &str) -> String {
        self.resolve(cli, env_var, file_key)
            .unwrap_or_else(|| default.to_string())
    }
}

/// Get the platform default config file path, if it exists
///
/// Linux: `~/.config/<app>/config.toml`, then `/etc/<app>/config.toml`.
/// Elsewhere: the user config directory only.
pub fn default_config_file(app_dir: &str) -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join(app_dir).join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc").join(app_dir).join("config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}
