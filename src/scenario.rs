//! Scenario files used to seed an index.
//!
//! A scenario bundles the index configuration, the initial obstacles and any
//! extra obstacle kinds:
//!
//! ```json
//! {
//!   "config": { "lane_count": 6 },
//!   "obstacles": [
//!     { "x": 10, "y": 1, "kind": "roca" },
//!     { "x": 5, "y": 2, "kind": "cono", "id": 7 }
//!   ],
//!   "kinds": { "barril": { "color": [200, 0, 0], "damage": 25 } }
//! }
//! ```
//!
//! Every section is optional. Fields on an obstacle beyond `x`, `y` and
//! `kind` are carried through untouched.

use crate::catalog::KindCatalog;
use crate::config::Config;
use crate::error::{IndexError, Result};
use obstacle_types::Obstacle;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub config: Config,

    #[serde(default)]
    pub obstacles: Vec<Obstacle>,

    /// Kinds added to, or overriding, the built-in catalog
    #[serde(default = "KindCatalog::empty")]
    pub kinds: KindCatalog,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new(Config::default(), Vec::new())
    }
}

impl Scenario {
    pub fn new(config: Config, obstacles: Vec<Obstacle>) -> Self {
        Self {
            config,
            obstacles,
            kinds: KindCatalog::empty(),
        }
    }

    /// Built-in kinds merged with the scenario's own.
    pub fn catalog(&self) -> KindCatalog {
        let mut catalog = KindCatalog::default();
        catalog.merge(&self.kinds);
        catalog
    }

    /// Rejects an invalid configuration. Unknown kinds are only logged since
    /// the index treats kind tags as opaque.
    pub fn validate(&self) -> Result<()> {
        self.config.validate().map_err(IndexError::InvalidConfig)?;

        let catalog = self.catalog();
        for obstacle in &self.obstacles {
            if !catalog.contains(&obstacle.kind) {
                log::warn!(
                    "Scenario obstacle at ({}, {}) has unregistered kind '{}'",
                    obstacle.x,
                    obstacle.y,
                    obstacle.kind
                );
            }
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(toml_str)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load a scenario file. `.toml` files need the `toml` feature; anything
    /// else is parsed as JSON.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::info!("Loading scenario from {}", path.display());

        match path.extension().and_then(|ext| ext.to_str()) {
            #[cfg(feature = "toml")]
            Some("toml") => Self::from_toml(&text),
            #[cfg(not(feature = "toml"))]
            Some("toml") => Err(IndexError::InvalidInput(format!(
                "{} is a TOML scenario but the `toml` feature is disabled",
                path.display()
            ))),
            _ => Self::from_json(&text),
        }
    }
}
