use crate::coord::{Coord, Keyed};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// An obstacle placed on the road.
///
/// `kind` is an opaque category tag. The index never interprets it; lookups of
/// per-kind metadata happen in the calling layer. Any additional fields found
/// while deserializing are kept in `extra` and written back on serialization.
///
/// # Examples
///
/// ```
/// use obstacle_types::obstacle::Obstacle;
///
/// let json = r#"{"x": 300, "y": 4, "kind": "cono", "id": 17}"#;
/// let cone: Obstacle = serde_json::from_str(json).unwrap();
/// assert_eq!(cone.kind, "cono");
/// assert_eq!(cone.field("id"), Some(&serde_json::json!(17)));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: i64,
    pub y: i64,
    pub kind: String,
    /// Caller-defined fields carried along with the record.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Obstacle {
    pub fn new(x: i64, y: i64, kind: impl Into<String>) -> Self {
        Self {
            x,
            y,
            kind: kind.into(),
            extra: Map::new(),
        }
    }

    /// Attach a caller-defined field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

impl Keyed for Obstacle {
    fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

impl fmt::Display for Obstacle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Obstacle(x={}, y={}, kind={})", self.x, self.y, self.kind)
    }
}
