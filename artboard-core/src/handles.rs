//! Transform handles around a selection frame.
//!
//! ```text
//!              (rot)
//!                │  rotation_offset
//!   tl ──────── tc ──────── tr
//!   │                        │
//!   ml          ·c           mr
//!   │                        │
//!   bl ──────── bc ──────── br
//! ```
//!
//! Each resize handle carries the opposite corner or edge midpoint as its
//! pivot. The rotation handle pivots about the frame center.

use serde::{Deserialize, Serialize};

use crate::config::HandleConfig;
use crate::geometry::{point_in_rect, rotate_point, BoundingBox, Point};

/// Which handle of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandleKind {
    /// Top-left corner.
    TopLeft,
    /// Top edge midpoint.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Left edge midpoint.
    MiddleLeft,
    /// Right edge midpoint.
    MiddleRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom edge midpoint.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
    /// Rotation knob above the top edge.
    Rotation,
}

/// Which dimensions a handle drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleAxis {
    /// Corner: width and height.
    Both,
    /// Left/right edge: width only.
    Horizontal,
    /// Top/bottom edge: height only.
    Vertical,
    /// Rotation knob.
    Rotate,
}

impl HandleKind {
    /// The eight resize handles in hit-test order.
    pub const RESIZE: [Self; 8] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::MiddleLeft,
        Self::MiddleRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Dimensions driven by this handle.
    #[must_use]
    pub const fn axis(self) -> HandleAxis {
        match self {
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight => HandleAxis::Both,
            Self::MiddleLeft | Self::MiddleRight => HandleAxis::Horizontal,
            Self::TopCenter | Self::BottomCenter => HandleAxis::Vertical,
            Self::Rotation => HandleAxis::Rotate,
        }
    }

    /// Whether this is the rotation knob.
    #[must_use]
    pub const fn is_rotation(self) -> bool {
        matches!(self, Self::Rotation)
    }

    /// CSS cursor hint for hosts.
    #[must_use]
    pub const fn cursor(self) -> &'static str {
        match self {
            Self::TopLeft | Self::BottomRight => "nwse-resize",
            Self::TopRight | Self::BottomLeft => "nesw-resize",
            Self::TopCenter | Self::BottomCenter => "ns-resize",
            Self::MiddleLeft | Self::MiddleRight => "ew-resize",
            Self::Rotation => "grab",
        }
    }

    /// Unit position within the frame, `(0,0)` top-left to `(1,1)` bottom-right.
    const fn anchor(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter | Self::Rotation => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::MiddleLeft => (0.0, 0.5),
            Self::MiddleRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }
}

/// A handle placed in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Handle {
    /// Which handle.
    pub kind: HandleKind,
    /// World position of the handle.
    pub position: Point,
    /// World position the resize is anchored to.
    pub pivot: Point,
}

impl Handle {
    /// CSS cursor hint.
    #[must_use]
    pub const fn cursor(&self) -> &'static str {
        self.kind.cursor()
    }
}

/// All handles for `frame`, rotated with it.
///
/// The rotation knob sits `rotation_offset` above the top edge and is
/// included only when `with_rotation` is set.
#[must_use]
pub fn handles(frame: &BoundingBox, rotation_offset: f64, with_rotation: bool) -> Vec<Handle> {
    let center = frame.center();
    let at = |(u, v): (f64, f64)| Point::new(frame.x + frame.width * u, frame.y + frame.height * v);

    let mut out: Vec<Handle> = HandleKind::RESIZE
        .iter()
        .map(|&kind| {
            let (u, v) = kind.anchor();
            Handle {
                kind,
                position: rotate_point(at((u, v)), center, frame.rotation),
                pivot: rotate_point(at((1.0 - u, 1.0 - v)), center, frame.rotation),
            }
        })
        .collect();

    if with_rotation {
        let top = at(HandleKind::Rotation.anchor());
        out.push(Handle {
            kind: HandleKind::Rotation,
            position: rotate_point(Point::new(top.x, top.y - rotation_offset), center, frame.rotation),
            pivot: center,
        });
    }
    out
}

/// The first handle whose hit box contains `point`.
///
/// Hit boxes are `(size + hit_margin) / scale` wide so they keep the same
/// on-screen size at every zoom level.
#[must_use]
pub fn handle_at_point(
    point: Point,
    frame: &BoundingBox,
    scale: f64,
    config: &HandleConfig,
    with_rotation: bool,
) -> Option<Handle> {
    if scale <= 0.0 {
        return None;
    }
    let hit = (config.size + config.hit_margin) / scale;
    handles(frame, config.rotation_offset, with_rotation)
        .into_iter()
        .find(|h| {
            let rect = BoundingBox::new(h.position.x - hit / 2.0, h.position.y - hit / 2.0, hit, hit);
            point_in_rect(point, &rect)
        })
}
