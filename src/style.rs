//! Per-run styling of the two profiles in the rendered map.

use serde_json::{Map, Value, json};

/// Stroke and marker appearance of one profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStyle {
    pub color: String,
    pub stroke_width: u32,
    pub stroke_opacity: f64,
    pub marker_size: String,
}

impl ProfileStyle {
    pub fn new(color: impl Into<String>, stroke_width: u32, marker_size: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            stroke_width,
            stroke_opacity: 1.0,
            marker_size: marker_size.into(),
        }
    }

    /// simplestyle properties of the path feature.
    pub fn path_properties(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        properties.insert("stroke".to_string(), json!(self.color));
        properties.insert("stroke-width".to_string(), json!(self.stroke_width));
        properties.insert("stroke-opacity".to_string(), json!(self.stroke_opacity));
        properties
    }

    /// simplestyle properties of a waypoint marker labelled `symbol`.
    pub fn marker_properties(&self, symbol: usize) -> Map<String, Value> {
        let mut properties = Map::new();
        properties.insert("marker-color".to_string(), json!(self.color));
        properties.insert("marker-size".to_string(), json!(self.marker_size));
        properties.insert("marker-symbol".to_string(), json!(symbol));
        properties
    }
}

/// Styles for the primary and alternative profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonStyle {
    pub primary: ProfileStyle,
    pub alternative: ProfileStyle,
}

impl Default for ComparisonStyle {
    fn default() -> Self {
        Self {
            primary: ProfileStyle::new("#ebae10", 6, "large"),
            alternative: ProfileStyle::new("#0d17eb", 2, "small"),
        }
    }
}
