use crate::{
    core::{bounds::Bounds, geo::Point},
    layers::base::Layer,
    Result,
};
use serde::{Deserialize, Serialize};

/// Extent of the map in map space.
///
/// Documents either give a plain size anchored at the origin or all four
/// edges of the mapped area. Anything partial is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapDimensions {
    Size {
        width: f64,
        height: f64,
    },
    Edges {
        top: f64,
        left: f64,
        bottom: f64,
        right: f64,
    },
}

impl MapDimensions {
    pub fn bounds(&self) -> Bounds {
        match *self {
            MapDimensions::Size { width, height } => Bounds::from_coords(0.0, 0.0, width, height),
            MapDimensions::Edges {
                top,
                left,
                bottom,
                right,
            } => Bounds::from_coords(left, top, right, bottom),
        }
    }
}

/// One object entry as it appears in the document.
///
/// `image` and `shade` hold base64 PNG data, optionally as a `data:` URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    #[serde(default)]
    pub layer: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub pos: Option<Point>,
    #[serde(default)]
    pub shade: Option<String>,
    #[serde(default)]
    pub shade_pos: Option<Point>,
}

impl ObjectRecord {
    /// Where the shadow goes: its own position, else the object's
    pub fn shade_position(&self) -> Option<Point> {
        self.shade_pos.or(self.pos)
    }
}

/// The map document as loaded from JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    #[serde(default)]
    pub dimensions: Option<MapDimensions>,
    #[serde(default)]
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
}

impl MapDocument {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
