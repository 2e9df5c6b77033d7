//! Controller configuration: typed struct, explicit defaults, validation.

use serde::{Deserialize, Serialize};

/// Configuration for a [`ZoomPanController`](crate::ZoomPanController).
///
/// Deserializes from a partial settings object (camelCase keys, matching the
/// host page's JSON), with defaults filled in for anything omitted — never a
/// loosely-typed property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoomConfig {
    /// Lower zoom bound; also the "no zoom" level at which panning is a no-op.
    pub min_zoom: f64,

    /// Upper zoom bound, inclusive.
    pub max_zoom: f64,

    /// Zoom change per 125 units of wheel delta.
    pub zoom_speed: f64,

    /// Chord spec that must be held for zoom/pan to engage,
    /// `"+"`-joined, aliases allowed (e.g. `"ctrl+shift"`, `"cmd+e"`).
    pub shortcut: String,

    /// Smoothing factor: the number of pointer/zoom samples averaged per
    /// frame. `1` disables smoothing (raw passthrough).
    pub smoothing: usize,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min_zoom: 1.0,
            max_zoom: 6.0,
            zoom_speed: 0.1,
            shortcut: "shift".to_string(),
            smoothing: 1,
        }
    }
}

impl ZoomConfig {
    /// Check numeric sanity. Chord validity is checked separately when the
    /// spec is parsed at controller construction.
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_zoom.is_finite() || !self.max_zoom.is_finite() {
            return Err("zoom bounds must be finite".to_string());
        }
        if self.min_zoom > self.max_zoom {
            return Err(format!(
                "minZoom ({}) must not exceed maxZoom ({})",
                self.min_zoom, self.max_zoom
            ));
        }
        if !self.zoom_speed.is_finite() {
            return Err("zoomSpeed must be finite".to_string());
        }
        if self.smoothing == 0 {
            return Err("smoothing must be a positive integer".to_string());
        }
        Ok(())
    }
}
