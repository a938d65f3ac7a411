//! Registry crate for managing Hauler connector catalogs.
//!
//! This crate provides the data structures and functionality for locating,
//! loading, and querying the connector metadata manifests registered with
//! the client.

pub mod config;
pub mod models;

pub use config::{CatalogRef, REGISTRY_PATH_ENV, RegistryConfig, default_config_path};
pub use models::{ConnectorEntry, ConnectorManifest, ConnectorRegistry};
