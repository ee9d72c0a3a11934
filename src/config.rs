//! Configuration for the obstacle index.
//!
//! The index itself has no tunables; these settings describe the viewport
//! window used by `visible_records`, the lane layout checked by placement
//! validation, and the distance used by eviction sweeps.
use obstacle_types::Bounds;
use serde::de::Error;

/// Index configuration
///
/// # Example
///
/// ```rust
/// use obstacle_index::Config;
///
/// let json = r#"{
///     "lane_count": 4,
///     "viewport": { "y_max": 400 }
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.lane_count, 4);
/// assert_eq!(config.viewport.y_max, 400);
/// assert_eq!(config.eviction_margin, 100);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Query window used for visibility lookups
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// Number of lanes; valid `y` values are `0..lane_count`
    #[serde(default = "Config::default_lane_count")]
    pub lane_count: i64,

    /// Records further than this behind the anchor are evicted
    #[serde(default = "Config::default_eviction_margin")]
    pub eviction_margin: i64,
}

/// Shape of the visibility window around a moving anchor
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportConfig {
    #[serde(default)]
    pub y_min: i64,

    #[serde(default = "ViewportConfig::default_y_max")]
    pub y_max: i64,

    /// The window starts `width / lookbehind_divisor` behind the anchor
    #[serde(default = "ViewportConfig::default_lookbehind_divisor")]
    pub lookbehind_divisor: i64,
}

impl ViewportConfig {
    const fn default_y_max() -> i64 {
        600
    }

    const fn default_lookbehind_divisor() -> i64 {
        4
    }

    /// Query box for an anchor and viewport width.
    ///
    /// `x_min` is clamped at zero; the vertical extent is fixed.
    pub fn bounds(&self, anchor_x: i64, width: i64) -> Bounds {
        let lookbehind = width.div_euclid(self.lookbehind_divisor.max(1));
        Bounds::new(
            anchor_x.saturating_sub(lookbehind).max(0),
            anchor_x.saturating_add(width),
            self.y_min,
            self.y_max,
        )
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            y_min: 0,
            y_max: Self::default_y_max(),
            lookbehind_divisor: Self::default_lookbehind_divisor(),
        }
    }
}

impl Config {
    const fn default_lane_count() -> i64 {
        6
    }

    const fn default_eviction_margin() -> i64 {
        100
    }

    pub fn with_viewport(mut self, viewport: ViewportConfig) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_lane_count(mut self, lanes: i64) -> Self {
        assert!(lanes > 0, "Lane count must be greater than zero");
        self.lane_count = lanes;
        self
    }

    pub fn with_eviction_margin(mut self, margin: i64) -> Self {
        assert!(margin >= 0, "Eviction margin must not be negative");
        self.eviction_margin = margin;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.lane_count <= 0 {
            return Err("Lane count must be greater than zero".to_string());
        }

        if self.eviction_margin < 0 {
            return Err("Eviction margin must not be negative".to_string());
        }

        if self.viewport.lookbehind_divisor <= 0 {
            return Err("Viewport lookbehind divisor must be greater than zero".to_string());
        }

        if self.viewport.y_min > self.viewport.y_max {
            return Err(format!(
                "Viewport y_min ({}) is greater than y_max ({})",
                self.viewport.y_min, self.viewport.y_max
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            lane_count: Self::default_lane_count(),
            eviction_margin: Self::default_eviction_margin(),
        }
    }
}
