//! Configuration for modifiers and change animators.
//!
//! Every section is optional in TOML; missing keys take their defaults.
//!
//! ```toml
//! [modifier]
//! can_move_items = true
//! can_delete_items = false
//!
//! [animator]
//! update_strategy = "reconfigure"
//! verify_coordinates = true
//! ```

use std::path::Path;

use horizon_sourcing_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcingConfig {
    /// Default capability policy for data modifiers.
    pub modifier: ModifierPolicy,
    /// Behaviour of change animators.
    pub animator: AnimatorConfig,
}

impl SourcingConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_sourcing::settings::{SourcingConfig, UpdateStrategy};
    ///
    /// let config = SourcingConfig::from_toml_str(
    ///     "[animator]\nupdate_strategy = \"reconfigure\"",
    /// ).unwrap();
    /// assert_eq!(config.animator.update_strategy, UpdateStrategy::Reconfigure);
    /// assert!(config.animator.verify_coordinates);
    /// assert!(!config.modifier.can_move_items);
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::SETTINGS, path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

/// Static capability policy applied by a data modifier.
///
/// Both capabilities are off unless enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierPolicy {
    pub can_move_items: bool,
    pub can_delete_items: bool,
}

impl ModifierPolicy {
    /// A policy allowing both moves and deletions.
    pub const fn permissive() -> Self {
        Self {
            can_move_items: true,
            can_delete_items: true,
        }
    }
}

/// How an animator refreshes an element that changed in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStrategy {
    /// Ask the view to reload the item.
    #[default]
    Reload,
    /// Reconfigure the existing visual in place through a reconfiguration function.
    Reconfigure,
}

/// Behaviour of a change animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatorConfig {
    pub update_strategy: UpdateStrategy,
    /// Check every coordinate against the view and model before opening a
    /// batch transaction.
    pub verify_coordinates: bool,
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            update_strategy: UpdateStrategy::Reload,
            verify_coordinates: true,
        }
    }
}
