//! Editor configuration.
//!
//! Every field has a default, so partial JSON documents are accepted:
//!
//! ```json
//! { "snap": { "tolerance": 6 }, "historyLimit": 200 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EditorError, EditorResult};
use crate::snapping::SnapSettings;

/// Transform handle geometry, in screen pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandleConfig {
    /// Visual handle size.
    pub size: f64,
    /// Extra hit area added to `size`.
    pub hit_margin: f64,
    /// Distance of the rotation knob above the top edge, in world units.
    pub rotation_offset: f64,
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            hit_margin: 4.0,
            rotation_offset: 30.0,
        }
    }
}

/// Wheel zoom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomConfig {
    /// Per-unit wheel sensitivity; one wheel unit scales by `1 + sensitivity`.
    pub sensitivity: f64,
    /// Smallest allowed scale.
    pub min_scale: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.0008,
            min_scale: 0.1,
        }
    }
}

/// Configuration for the interaction engine and editor session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Snapping behaviour.
    pub snap: SnapSettings,
    /// Handle geometry.
    pub handles: HandleConfig,
    /// Rotation snap step in degrees while shift is held.
    pub rotation_step_degrees: f64,
    /// Wheel zoom.
    pub zoom: ZoomConfig,
    /// Fraction of an element's area that must overlap an artboard to join it.
    pub association_threshold: f64,
    /// Offset applied to pasted clones, in world units.
    pub paste_offset: f64,
    /// Smallest width or height an artboard can be resized to.
    pub artboard_min_size: f64,
    /// Maximum number of history entries, unbounded when `None`.
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap: SnapSettings::default(),
            handles: HandleConfig::default(),
            rotation_step_degrees: 15.0,
            zoom: ZoomConfig::default(),
            association_threshold: 0.5,
            paste_offset: 20.0,
            artboard_min_size: 1.0,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rotation snap step in radians.
    #[must_use]
    pub fn rotation_step(&self) -> f64 {
        self.rotation_step_degrees.to_radians()
    }

    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Config`] naming the first bad field.
    pub fn validate(&self) -> EditorResult<()> {
        let checks = [
            (self.snap.tolerance >= 0.0, "snap.tolerance must be >= 0"),
            (self.snap.strong_multiplier >= 1.0, "snap.strongMultiplier must be >= 1"),
            (self.handles.size > 0.0, "handles.size must be > 0"),
            (self.handles.hit_margin >= 0.0, "handles.hitMargin must be >= 0"),
            (self.rotation_step_degrees > 0.0, "rotationStepDegrees must be > 0"),
            (self.zoom.sensitivity > 0.0, "zoom.sensitivity must be > 0"),
            (self.zoom.min_scale > 0.0, "zoom.minScale must be > 0"),
            (
                (0.0..1.0).contains(&self.association_threshold),
                "associationThreshold must be in [0, 1)",
            ),
            (self.artboard_min_size > 0.0, "artboardMinSize must be > 0"),
            (self.history_limit != Some(0), "historyLimit must be > 0"),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, message)) => Err(EditorError::Config((*message).to_string())),
            None => Ok(()),
        }
    }
}
