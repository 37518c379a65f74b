//! Viewport: the mapping between screen pixels and world units.
//!
//! `screen = world * scale + offset`

use serde::{Deserialize, Serialize};

use crate::config::ZoomConfig;
use crate::geometry::Point;

/// Current pan and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Zoom factor, screen pixels per world unit.
    pub scale: f64,
    /// Screen position of the world origin.
    pub offset: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Point::zero(),
        }
    }
}

impl Viewport {
    /// Create a viewport.
    #[must_use]
    pub const fn new(scale: f64, offset: Point) -> Self {
        Self { scale, offset }
    }

    /// Map a screen position into world space.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.offset.x) / self.scale,
            (screen.y - self.offset.y) / self.scale,
        )
    }

    /// Map a world position onto the screen.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point::new(
            world.x * self.scale + self.offset.x,
            world.y * self.scale + self.offset.y,
        )
    }

    /// Shift the view by a screen-space delta.
    #[must_use]
    pub fn pan_by(&self, delta: Point) -> Self {
        Self {
            offset: self.offset + delta,
            ..*self
        }
    }

    /// Set a new scale while keeping the world point under `screen` fixed.
    #[must_use]
    pub fn zoom_at(&self, screen: Point, new_scale: f64) -> Self {
        let anchor = self.screen_to_world(screen);
        Self {
            scale: new_scale,
            offset: Point::new(screen.x - anchor.x * new_scale, screen.y - anchor.y * new_scale),
        }
    }

    /// Apply one wheel event about the cursor.
    ///
    /// Negative `delta_y` zooms in. The factor is `(1 + sensitivity)^|delta_y|`
    /// and the result never drops below `min_scale`.
    #[must_use]
    pub fn wheel_zoom(&self, screen: Point, delta_y: f64, zoom: &ZoomConfig) -> Self {
        let factor = (1.0 + zoom.sensitivity).powf(delta_y.abs());
        let target = if delta_y < 0.0 {
            self.scale * factor
        } else {
            self.scale / factor
        };
        self.zoom_at(screen, target.max(zoom.min_scale))
    }
}
