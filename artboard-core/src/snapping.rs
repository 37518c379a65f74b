//! Object snapping.
//!
//! Each element offers three vertical lines (left, center, right) and three
//! horizontal lines (top, center, bottom) taken from its axis-aligned bounds.
//! A moving element snaps on each axis to the single closest static line
//! strictly within `tolerance / scale`.
//!
//! ```text
//!        guide x=100
//!            ┆
//!   ┌──────┐ ┆ ┌──────┐
//!   │moving│→┆ │static│
//!   └──────┘ ┆ └──────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::event::KeyModifiers;
use crate::geometry::{element_bounds, BoundingBox, Point};

/// User-facing snapping switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapSettings {
    /// Master switch.
    pub enabled: bool,
    /// Snap against other elements' edges and centers.
    pub snap_to_objects: bool,
    /// Snap distance in screen pixels.
    pub tolerance: f64,
    /// Tolerance multiplier while shift is held.
    pub strong_multiplier: f64,
}

impl Default for SnapSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            snap_to_objects: true,
            tolerance: 10.0,
            strong_multiplier: 2.0,
        }
    }
}

/// Tolerance for the current modifiers. Zero disables snapping.
///
/// Shift widens the tolerance; ctrl/meta moves freely.
#[must_use]
pub fn effective_tolerance(settings: &SnapSettings, modifiers: &KeyModifiers) -> f64 {
    if !settings.enabled || !settings.snap_to_objects || modifiers.alternate() {
        0.0
    } else if modifiers.constrain() {
        settings.tolerance * settings.strong_multiplier
    } else {
        settings.tolerance
    }
}

/// Which feature of an element a snap line passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SnapLineKind {
    /// Left edge.
    Left,
    /// Horizontal center.
    CenterX,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Vertical center.
    CenterY,
    /// Bottom edge.
    Bottom,
}

/// A candidate snap line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapLine {
    /// Feature the line passes through.
    pub kind: SnapLineKind,
    /// X for vertical lines, Y for horizontal lines.
    pub value: f64,
}

/// All snap candidates of one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapLines {
    /// Left, center-x and right.
    pub vertical: [SnapLine; 3],
    /// Top, center-y and bottom.
    pub horizontal: [SnapLine; 3],
}

impl SnapLines {
    fn from_bounds(b: &BoundingBox) -> Self {
        let line = |kind, value| SnapLine { kind, value };
        Self {
            vertical: [
                line(SnapLineKind::Left, b.x),
                line(SnapLineKind::CenterX, b.x + b.width / 2.0),
                line(SnapLineKind::Right, b.right()),
            ],
            horizontal: [
                line(SnapLineKind::Top, b.y),
                line(SnapLineKind::CenterY, b.y + b.height / 2.0),
                line(SnapLineKind::Bottom, b.bottom()),
            ],
        }
    }
}

/// Snap lines of an element, `None` for kinds without geometry.
#[must_use]
pub fn snap_lines(element: &Element) -> Option<SnapLines> {
    element_bounds(element).map(|b| SnapLines::from_bounds(&b))
}

/// Orientation of a snap guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideAxis {
    /// A line of constant x.
    Vertical,
    /// A line of constant y.
    Horizontal,
}

/// A guide line to render while snapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SnapGuide {
    /// Orientation.
    pub axis: GuideAxis,
    /// X of a vertical guide, Y of a horizontal guide.
    pub position: f64,
    /// Start of the guide along the other axis.
    pub start: f64,
    /// End of the guide along the other axis.
    pub end: f64,
}

/// Outcome of a snap search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapResult {
    /// Correction to add to the moving position.
    pub offset: Point,
    /// At most one guide per snapped axis.
    pub guides: Vec<SnapGuide>,
}

impl SnapResult {
    /// Whether either axis snapped.
    #[must_use]
    pub fn snapped(&self) -> bool {
        !self.guides.is_empty()
    }
}

struct Best {
    delta: f64,
    line: f64,
    target: BoundingBox,
}

fn consider(best: &mut Option<Best>, delta: f64, line: f64, target: BoundingBox, threshold: f64) {
    if delta.abs() < threshold && best.as_ref().map_or(true, |b| delta.abs() < b.delta.abs()) {
        *best = Some(Best { delta, line, target });
    }
}

fn snap_bounds<'a>(
    moving: &BoundingBox,
    exclude: Option<ElementId>,
    statics: impl IntoIterator<Item = &'a Element>,
    scale: f64,
    tolerance: f64,
) -> SnapResult {
    if tolerance <= 0.0 || scale <= 0.0 {
        return SnapResult::default();
    }
    let threshold = tolerance / scale;
    let mine = SnapLines::from_bounds(moving);

    let mut best_v: Option<Best> = None;
    let mut best_h: Option<Best> = None;

    for other in statics {
        if Some(other.id) == exclude {
            continue;
        }
        let Some(target) = element_bounds(other) else {
            continue;
        };
        let theirs = SnapLines::from_bounds(&target);

        for m in &mine.vertical {
            for s in &theirs.vertical {
                consider(&mut best_v, s.value - m.value, s.value, target, threshold);
            }
        }
        for m in &mine.horizontal {
            for s in &theirs.horizontal {
                consider(&mut best_h, s.value - m.value, s.value, target, threshold);
            }
        }
    }

    let offset = Point::new(
        best_v.as_ref().map_or(0.0, |b| b.delta),
        best_h.as_ref().map_or(0.0, |b| b.delta),
    );
    let snapped = moving.translated(offset.x, offset.y);

    let mut guides = Vec::with_capacity(2);
    if let Some(b) = best_v {
        guides.push(SnapGuide {
            axis: GuideAxis::Vertical,
            position: b.line,
            start: snapped.y.min(b.target.y),
            end: snapped.bottom().max(b.target.bottom()),
        });
    }
    if let Some(b) = best_h {
        guides.push(SnapGuide {
            axis: GuideAxis::Horizontal,
            position: b.line,
            start: snapped.x.min(b.target.x),
            end: snapped.right().max(b.target.right()),
        });
    }

    SnapResult { offset, guides }
}

/// Snap a moving element against static elements.
///
/// The moving element's own id is skipped if it appears in `statics`.
pub fn find_snap_adjustments<'a>(
    moving: &Element,
    statics: impl IntoIterator<Item = &'a Element>,
    scale: f64,
    tolerance: f64,
) -> SnapResult {
    match element_bounds(moving) {
        Some(bounds) => snap_bounds(&bounds, Some(moving.id), statics, scale, tolerance),
        None => SnapResult::default(),
    }
}

/// Snap a bare point, such as a resize pointer, against static elements.
pub fn snap_point<'a>(
    point: Point,
    statics: impl IntoIterator<Item = &'a Element>,
    scale: f64,
    tolerance: f64,
) -> SnapResult {
    let bounds = BoundingBox::new(point.x, point.y, 0.0, 0.0);
    snap_bounds(&bounds, None, statics, scale, tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_nearby_edge() {
        let moving = Element::rect(97.0, 200.0, 50.0, 50.0);
        let target = Element::rect(100.0, 0.0, 50.0, 50.0);

        let result = find_snap_adjustments(&moving, [&target], 1.0, 10.0);
        assert!((result.offset.x - 3.0).abs() < 1e-9);
        assert_eq!(result.offset.y, 0.0);
        assert_eq!(result.guides.len(), 1);

        let guide = result.guides[0];
        assert_eq!(guide.axis, GuideAxis::Vertical);
        assert!((guide.position - 100.0).abs() < 1e-9);
        assert!((guide.start - 0.0).abs() < 1e-9);
        assert!((guide.end - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_tolerance_is_strict_and_zoom_aware() {
        let moving = Element::rect(90.0, 300.0, 10.0, 10.0);
        let target = Element::rect(110.0, 0.0, 10.0, 10.0);
        assert!(!find_snap_adjustments(&moving, [&target], 1.0, 10.0).snapped());
        // At 2x zoom the world threshold halves.
        let near = Element::rect(94.0, 300.0, 10.0, 10.0);
        assert!(find_snap_adjustments(&near, [&target], 1.0, 10.0).snapped());
        assert!(!find_snap_adjustments(&near, [&target], 2.0, 10.0).snapped());
    }

    #[test]
    fn test_closest_candidate_wins_per_axis() {
        let moving = Element::rect(0.0, 0.0, 10.0, 10.0);
        let far = Element::rect(16.0, 100.0, 10.0, 10.0);
        let close = Element::rect(11.0, 13.0, 10.0, 10.0);

        let result = find_snap_adjustments(&moving, [&far, &close], 1.0, 10.0);
        assert!((result.offset.x - 1.0).abs() < 1e-9);
        assert!((result.offset.y - 3.0).abs() < 1e-9);
        assert_eq!(result.guides.len(), 2);
    }

    #[test]
    fn test_skips_own_id_and_zero_tolerance() {
        let moving = Element::rect(0.0, 0.0, 10.0, 10.0);
        let mut ghost = moving.clone();
        ghost.x = 2.0;
        assert!(!find_snap_adjustments(&moving, [&ghost], 1.0, 10.0).snapped());

        let other = Element::rect(2.0, 50.0, 10.0, 10.0);
        assert!(!find_snap_adjustments(&moving, [&other], 1.0, 0.0).snapped());
    }

    #[test]
    fn test_snap_point() {
        let target = Element::rect(100.0, 100.0, 40.0, 40.0);
        let result = snap_point(Point::new(118.0, 143.0), [&target], 1.0, 5.0);
        assert!((result.offset.x - 2.0).abs() < 1e-9);
        assert!((result.offset.y + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_snap_lines_for_circle() {
        let circle = Element::circle(50.0, 50.0, 10.0);
        let lines = snap_lines(&circle).expect("circle has lines");
        assert!((lines.vertical[0].value - 40.0).abs() < 1e-9);
        assert!((lines.vertical[1].value - 50.0).abs() < 1e-9);
        assert!((lines.horizontal[2].value - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_effective_tolerance() {
        let settings = SnapSettings::default();
        assert!((effective_tolerance(&settings, &KeyModifiers::none()) - 10.0).abs() < f64::EPSILON);
        assert!((effective_tolerance(&settings, &KeyModifiers::shift()) - 20.0).abs() < f64::EPSILON);
        assert_eq!(effective_tolerance(&settings, &KeyModifiers::ctrl()), 0.0);

        let disabled = SnapSettings {
            enabled: false,
            ..SnapSettings::default()
        };
        assert_eq!(effective_tolerance(&disabled, &KeyModifiers::none()), 0.0);
    }
}
