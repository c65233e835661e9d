//! Crate configuration.
//!
//! Settings come from `config/config.toml` (optional) with
//! `MAGAZZINO__`-prefixed environment variable overrides, e.g.
//! `MAGAZZINO__INVENTORY__ID_PREFIX`. Every field has a default, so an
//! empty deployment works out of the box.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::label::{BoxLabelLayout, LocationLabelLayout};

/// Top-level configuration: inventory policy plus label geometry.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MagazzinoConfig {
    pub inventory: InventoryConfig,
    pub labels: LabelConfig,
}

/// Inventory policy: identifier prefix and the known owners.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Prefix for allocator-derived box identifiers.
    pub id_prefix: String,
    /// The household members boxes can belong to. An empty list disables
    /// owner validation.
    pub owners: Vec<String>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            id_prefix: "SCAT_".to_string(),
            owners: ["Victor", "Evelyn", "Daniel", "Carly", "Rebby"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Layout constants for both label classes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub boxes: BoxLabelLayout,
    pub locations: LocationLabelLayout,
}

impl MagazzinoConfig {
    /// Load the configuration from `config/config.toml`, falling back to
    /// environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Build configuration by reading the TOML file (optional) and environment variables
        let builder = Config::builder()
            .add_source(File::with_name("config/config.toml").required(false))
            .add_source(Environment::with_prefix("MAGAZZINO").separator("__"));

        // Try to build the configuration, handling missing or unreadable file
        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                // If the file existed but was unreadable (parse error, permission issue, etc.), log a warning and retry with env only
                if std::path::Path::new("config/config.toml").exists() {
                    eprintln!(
                        "Warning: failed to load config file, falling back to env. Error: {}",
                        err
                    );
                }
                // Retry using only environment variables as source
                Config::builder()
                    .add_source(Environment::with_prefix("MAGAZZINO").separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        settings.try_deserialize::<MagazzinoConfig>().map_err(|e| {
            ConfigError::Message(format!(
                "Inventory configuration could not be loaded from file or environment: {}",
                e
            ))
        })
    }
}
