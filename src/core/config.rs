//! Configuration for the viewer
//!
//! Every field has a default, so a configuration file only needs to name what
//! it changes. Two presets are provided: [`ViewerConfig::default`] and
//! [`ViewerConfig::debugging`].

use crate::{
    core::constants::DEFAULT_MAP_PATH, rendering::canvas::Color, MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When front-ends should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedrawPolicy {
    /// Draw every display refresh, whether or not anything changed
    #[default]
    Continuous,
    /// Draw only after input, visibility changes or load progress
    OnChange,
}

/// Debug drawing switches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Fixed-position text with object counts and transform values
    pub overlay: bool,
    /// One-pixel outline around every drawn sprite image
    pub outlines: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            overlay: true,
            outlines: false,
        }
    }
}

/// Which input gestures move the view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub scroll_wheel_zoom: bool,
    pub dragging: bool,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            scroll_wheel_zoom: true,
            dragging: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// File path or http(s) URL of the map document
    pub map_source: String,
    pub background: Color,
    /// Zoom and center the map to the viewport once it has loaded
    pub fit_on_load: bool,
    pub redraw: RedrawPolicy,
    pub debug: DebugConfig,
    pub interaction: InteractionConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            map_source: DEFAULT_MAP_PATH.to_string(),
            background: Color::CORNFLOWER_BLUE,
            fit_on_load: true,
            redraw: RedrawPolicy::Continuous,
            debug: DebugConfig::default(),
            interaction: InteractionConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Overlay and sprite outlines on, no fitting: sprites show at 1:1
    pub fn debugging() -> Self {
        Self {
            fit_on_load: false,
            debug: DebugConfig {
                overlay: true,
                outlines: true,
            },
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::debug!("read viewer config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn with_map_source(mut self, source: impl Into<String>) -> Self {
        self.map_source = source.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.map_source.trim().is_empty() {
            return Err(MapError::Config("map_source must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.map_source, "maps/main.json");
        assert_eq!(config.background, Color::CORNFLOWER_BLUE);
        assert!(config.fit_on_load);
        assert_eq!(config.redraw, RedrawPolicy::Continuous);
        assert!(config.debug.overlay);
        assert!(!config.debug.outlines);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json_str(
            r#"{ "redraw": "on_change", "debug": { "outlines": true } }"#,
        )
        .unwrap();

        assert_eq!(config.redraw, RedrawPolicy::OnChange);
        assert!(config.debug.outlines);
        assert!(config.debug.overlay);
        assert!(config.interaction.dragging);
        assert_eq!(config.map_source, "maps/main.json");
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{ "map_source": "  " }"#),
            Err(MapError::Config(_))
        ));
        assert!(matches!(
            ViewerConfig::from_json_str(r#"{ "redraw": "sometimes" }"#),
            Err(MapError::Serialization(_))
        ));
    }

    #[test]
    fn test_debugging_preset() {
        let config = ViewerConfig::debugging();
        assert!(config.debug.outlines);
        assert!(!config.fit_on_load);
    }
}
