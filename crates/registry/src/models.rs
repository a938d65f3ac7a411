use anyhow::{Result, anyhow};
use hauler_types::ConnectorMetadata;
use hauler_util::BundleCatalog;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::RegistryConfig;

/// Wire form of one connector catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorManifest {
    /// Form metadata of the connector.
    pub connector: ConnectorMetadata,
    /// Localized strings keyed by locale, then by label/help key.
    #[serde(default)]
    pub bundles: IndexMap<String, IndexMap<String, String>>,
}

impl TryFrom<Vec<u8>> for ConnectorManifest {
    type Error = serde_json::Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        serde_json::from_slice(&bytes)
    }
}

/// A loaded connector: its form metadata plus localization bundles.
#[derive(Debug, Clone)]
pub struct ConnectorEntry {
    pub metadata: ConnectorMetadata,
    pub bundles: BundleCatalog,
}

impl From<ConnectorManifest> for ConnectorEntry {
    fn from(manifest: ConnectorManifest) -> Self {
        Self {
            metadata: manifest.connector,
            bundles: BundleCatalog::from_tables(manifest.bundles),
        }
    }
}

/// The main registry of connectors known to the Hauler client.
#[derive(Debug, Clone, Default)]
pub struct ConnectorRegistry {
    /// Connectors loaded from enabled catalogs, in config order.
    pub connectors: Vec<ConnectorEntry>,
    /// Config identifying the location of each catalog manifest.
    pub config: RegistryConfig,
}

impl ConnectorRegistry {
    /// Loads every enabled catalog named by the registry config.
    ///
    /// Catalogs that cannot be read or parsed are skipped with a warning; one
    /// broken manifest must not take down the client.
    pub fn from_config() -> Self {
        let config = RegistryConfig::load();
        Self::from_parts(config)
    }

    fn from_parts(config: RegistryConfig) -> Self {
        let Some(catalogs) = config.catalogs.as_ref() else {
            return ConnectorRegistry {
                config,
                ..Default::default()
            };
        };

        let mut connectors = Vec::new();
        for catalog in catalogs.iter().filter(|catalog| catalog.is_enabled) {
            let path = &catalog.manifest_path;
            let Ok(manifest_bytes) = std::fs::read(path) else {
                warn!(%path, "skipping unreadable connector catalog");
                continue;
            };
            match ConnectorManifest::try_from(manifest_bytes) {
                Ok(manifest) => connectors.push(ConnectorEntry::from(manifest)),
                Err(error) => warn!(%path, %error, "skipping invalid connector catalog"),
            }
        }

        ConnectorRegistry { connectors, config }
    }

    /// Finds a loaded connector by name.
    pub fn find_connector(&self, name: &str) -> Result<&ConnectorEntry> {
        self.connectors
            .iter()
            .find(|entry| entry.metadata.name == name)
            .ok_or_else(|| anyhow!("unknown connector '{name}'; run 'hauler connectors' to list what is registered"))
    }
}
