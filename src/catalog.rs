//! Per-kind obstacle metadata.
//!
//! The index stores kind tags as opaque strings. The calling layer owns this
//! side table and uses it to resolve a tag into a draw color and the energy
//! lost on collision.

use crate::error::{IndexError, Result};
use obstacle_types::Obstacle;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Metadata attached to an obstacle kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KindSpec {
    /// RGB draw color
    pub color: [u8; 3],
    /// Energy lost when the player hits an obstacle of this kind
    pub damage: u32,
}

impl KindSpec {
    pub const fn new(color: [u8; 3], damage: u32) -> Self {
        Self { color, damage }
    }
}

static DEFAULT_CATALOG: Lazy<KindCatalog> = Lazy::new(|| {
    let mut catalog = KindCatalog::empty();
    catalog.register("roca", KindSpec::new([139, 69, 19], 20));
    catalog.register("cono", KindSpec::new([255, 165, 0], 10));
    catalog.register("hueco", KindSpec::new([0, 0, 0], 30));
    catalog.register("aceite", KindSpec::new([128, 0, 128], 15));
    catalog
});

/// Lookup table from kind tag to [`KindSpec`].
///
/// # Examples
///
/// ```
/// use obstacle_index::catalog::KindCatalog;
/// use obstacle_index::Obstacle;
///
/// let catalog = KindCatalog::default();
/// let hole = Obstacle::new(200, 3, "hueco");
/// assert_eq!(catalog.damage_for(&hole).unwrap(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindCatalog {
    kinds: FxHashMap<String, KindSpec>,
}

impl KindCatalog {
    /// A catalog with no registered kinds.
    pub fn empty() -> Self {
        Self {
            kinds: FxHashMap::default(),
        }
    }

    /// Add or replace a kind. Returns the previous entry, if any.
    pub fn register(&mut self, kind: impl Into<String>, spec: KindSpec) -> Option<KindSpec> {
        self.kinds.insert(kind.into(), spec)
    }

    pub fn get(&self, kind: &str) -> Option<&KindSpec> {
        self.kinds.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    pub fn spec(&self, kind: &str) -> Result<&KindSpec> {
        self.get(kind)
            .ok_or_else(|| IndexError::UnknownKind(kind.to_string()))
    }

    pub fn damage_for(&self, obstacle: &Obstacle) -> Result<u32> {
        self.spec(&obstacle.kind).map(|spec| spec.damage)
    }

    pub fn color_for(&self, obstacle: &Obstacle) -> Result<[u8; 3]> {
        self.spec(&obstacle.kind).map(|spec| spec.color)
    }

    /// Registered kind tags in sorted order.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Entries from `other` override entries with the same tag.
    pub fn merge(&mut self, other: &KindCatalog) {
        for (kind, spec) in &other.kinds {
            self.kinds.insert(kind.clone(), *spec);
        }
    }
}

impl Default for KindCatalog {
    /// The four built-in road obstacle kinds.
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}
