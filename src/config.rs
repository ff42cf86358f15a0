use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slotvault_inventory::DEFAULT_SLOT_COUNT;
use slotvault_pickup::DEFAULT_PICKUP_DISTANCE;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/inventory.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Number of inventory slots; fixed for the session.
    pub slot_count: usize,
    /// JSON item catalog; the builtin catalog is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Reach for collecting world pickups.
    pub pickup_distance: f32,
    /// Snapshot loaded at startup and saved on exit, when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            catalog_path: None,
            pickup_distance: DEFAULT_PICKUP_DISTANCE,
            snapshot_path: None,
        }
    }
}

impl InventoryConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        let cfg = match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<InventoryConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    InventoryConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                InventoryConfig::default()
            }
        };
        cfg.sanitized()
    }

    fn sanitized(mut self) -> Self {
        if self.slot_count == 0 {
            warn!("slot_count must be at least 1; using {DEFAULT_SLOT_COUNT}");
            self.slot_count = DEFAULT_SLOT_COUNT;
        }
        if !self.pickup_distance.is_finite() || self.pickup_distance < 0.0 {
            warn!("pickup_distance must be a non-negative number; using {DEFAULT_PICKUP_DISTANCE}");
            self.pickup_distance = DEFAULT_PICKUP_DISTANCE;
        }
        self
    }

    /// Write this configuration as TOML, creating parent directories.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).context("failed to serialize inventory config")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
    }
}
