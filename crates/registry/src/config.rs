use std::{env, io::Error, path::PathBuf};

use dirs_next::config_dir;
use hauler_util::expand_tilde;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the registry config file location.
pub const REGISTRY_PATH_ENV: &str = "HAULER_REGISTRY_PATH";

/// One connector metadata manifest registered with the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRef {
    /// Human-readable catalog title shown in listings.
    #[serde(default)]
    pub title: String,
    /// Path of the JSON manifest on disk.
    pub manifest_path: String,
    /// Disabled catalogs stay registered but are never loaded.
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub catalogs: Option<Vec<CatalogRef>>,
}

impl RegistryConfig {
    /// Reads the config file; a missing or malformed file yields the default.
    pub fn load() -> Self {
        let path = default_config_path();
        if let Ok(content) = std::fs::read_to_string(&path)
            && let Ok(config) = serde_json::from_str(&content)
        {
            return config;
        }
        RegistryConfig::default()
    }

    pub fn save(&self) -> Result<(), Error> {
        let path = default_config_path();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

/// Get the default path for the registry configuration file.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(REGISTRY_PATH_ENV)
        && !path.trim().is_empty()
    {
        return expand_tilde(&path);
    }

    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hauler")
        .join("registry.json")
}
