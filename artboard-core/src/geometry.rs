//! Geometry kernel: points, bounding boxes, rotation and hit testing.
//!
//! All coordinates are world units. Rotations are radians, positive values
//! turn clockwise on a y-down canvas.
//!
//! ```text
//!   tl ─────── tr        corners() returns [tl, tr, br, bl] of the
//!   │    c     │         element frame, each rotated about c by the
//!   bl ─────── br        element's rotation.
//! ```

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementKind};

/// Rotations closer than this are treated as equal.
pub const ANGLE_EPSILON: f64 = 1e-5;

/// A point or vector in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The origin.
    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Angle of the vector from `self` to `other`.
    #[must_use]
    pub fn angle_to(self, other: Self) -> f64 {
        (other.y - self.y).atan2(other.x - self.x)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Whether a box frames a single element or a multi-selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoxKind {
    /// The frame of one element.
    #[default]
    Element,
    /// The frame of a group of elements.
    Group,
}

/// A rectangle, axis-aligned in its own frame, rotated about its center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge before rotation.
    pub x: f64,
    /// Top edge before rotation.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
    /// Rotation in radians about the center.
    pub rotation: f64,
    /// Element or group frame.
    pub kind: BoxKind,
}

impl BoundingBox {
    /// Create an unrotated element box.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            rotation: 0.0,
            kind: BoxKind::Element,
        }
    }

    /// Set the rotation.
    #[must_use]
    pub const fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the box kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: BoxKind) -> Self {
        self.kind = kind;
        self
    }

    /// The element's own frame: its rect (or the ellipse's bounding rect)
    /// carrying the element's rotation. `None` for unknown kinds.
    #[must_use]
    pub fn from_element(element: &Element) -> Option<Self> {
        let (width, height) = element.size()?;
        let origin = match element.kind {
            ElementKind::Circle { .. } => Point::new(element.x - width / 2.0, element.y - height / 2.0),
            _ => Point::new(element.x, element.y),
        };
        Some(Self::new(origin.x, origin.y, width, height).with_rotation(element.rotation))
    }

    /// A box of the given size centered on `center`.
    #[must_use]
    pub fn centered(center: Point, width: f64, height: f64, rotation: f64) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
            .with_rotation(rotation)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Area of the box.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Right edge before rotation.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge before rotation.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// The box moved by `(dx, dy)`.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// World positions of `[tl, tr, br, bl]`.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let c = self.center();
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
        .map(|p| rotate_point(p, c, self.rotation))
    }
}

/// Center of an element. Circles and unknown kinds use `(x, y)`.
#[must_use]
pub fn center(element: &Element) -> Point {
    BoundingBox::from_element(element)
        .map_or_else(|| Point::new(element.x, element.y), |frame| frame.center())
}

/// Rotate `point` about `center` by `angle` radians.
#[must_use]
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

/// Rotate a vector about the origin.
#[must_use]
pub fn rotate_vector(vector: Point, angle: f64) -> Point {
    rotate_point(vector, Point::zero(), angle)
}

/// World vertices of the element's rotated frame. Empty for unknown kinds.
#[must_use]
pub fn corners(element: &Element) -> Vec<Point> {
    BoundingBox::from_element(element)
        .map(|frame| frame.corners().to_vec())
        .unwrap_or_default()
}

fn bounds_of_points(points: &[Point]) -> Option<BoundingBox> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Axis-aligned box around one element's corners.
#[must_use]
pub fn element_bounds(element: &Element) -> Option<BoundingBox> {
    bounds_of_points(&corners(element))
}

/// Axis-aligned box around every corner of every element.
///
/// Returns `None` when no element contributes corners.
pub fn axis_aligned_bounding_box<'a>(
    elements: impl IntoIterator<Item = &'a Element>,
) -> Option<BoundingBox> {
    let points: Vec<Point> = elements.into_iter().flat_map(corners).collect();
    bounds_of_points(&points).map(|b| b.with_kind(BoxKind::Group))
}

/// Smallest box enclosing a multi-selection, searched over a set of angles.
///
/// With `forced_angle` only that angle is tried. Otherwise every distinct
/// element rotation and 0 are tried, and the minimum-area fit wins.
/// Returns `None` for fewer than two elements.
#[must_use]
pub fn group_selection_box(elements: &[&Element], forced_angle: Option<f64>) -> Option<BoundingBox> {
    if elements.len() <= 1 {
        return None;
    }

    let vertices: Vec<Point> = elements.iter().flat_map(|el| corners(el)).collect();

    let candidates = match forced_angle {
        Some(angle) => vec![angle],
        None => {
            let mut angles: Vec<f64> = Vec::new();
            for angle in elements.iter().map(|el| el.rotation).chain(std::iter::once(0.0)) {
                if !angles.iter().any(|a| (a - angle).abs() < f64::EPSILON) {
                    angles.push(angle);
                }
            }
            angles
        }
    };

    let mut best: Option<(f64, BoundingBox)> = None;
    for angle in candidates {
        let rotated: Vec<Point> = vertices.iter().map(|v| rotate_vector(*v, -angle)).collect();
        let Some(fit) = bounds_of_points(&rotated) else {
            continue;
        };
        if best.map_or(true, |(_, b)| fit.area() < b.area()) {
            best = Some((angle, fit));
        }
    }

    let (angle, fit) = best?;
    let world_center = rotate_vector(fit.center(), angle);
    Some(BoundingBox::centered(world_center, fit.width, fit.height, angle).with_kind(BoxKind::Group))
}

/// Overlap area of two axis-aligned boxes. Rotation is ignored.
#[must_use]
pub fn intersection_area(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let w = a.right().min(b.right()) - a.x.max(b.x);
    let h = a.bottom().min(b.bottom()) - a.y.max(b.y);
    if w <= 0.0 || h <= 0.0 {
        0.0
    } else {
        w * h
    }
}

/// Flip a marquee rectangle dragged up or left into positive extents.
#[must_use]
pub fn normalize_rect(rect: &BoundingBox) -> BoundingBox {
    BoundingBox::new(
        if rect.width < 0.0 { rect.x + rect.width } else { rect.x },
        if rect.height < 0.0 { rect.y + rect.height } else { rect.y },
        rect.width.abs(),
        rect.height.abs(),
    )
}

/// Whether `point` lies in an unrotated rectangle, edges inclusive.
#[must_use]
pub fn point_in_rect(point: Point, rect: &BoundingBox) -> bool {
    point.x >= rect.x && point.x <= rect.right() && point.y >= rect.y && point.y <= rect.bottom()
}

/// Whether `point` lies in a rotated box, edges inclusive.
#[must_use]
pub fn point_in_box(point: Point, bbox: &BoundingBox) -> bool {
    let local = rotate_point(point, bbox.center(), -bbox.rotation);
    point_in_rect(local, bbox)
}

/// Whether `point` lies in a rect-like element's rotated frame.
#[must_use]
pub fn point_in_rotated_rect(point: Point, element: &Element) -> bool {
    BoundingBox::from_element(element).is_some_and(|frame| point_in_box(point, &frame))
}

/// Whether `point` lies in a circle or rotated ellipse.
#[must_use]
pub fn point_in_ellipse(point: Point, element: &Element) -> bool {
    let Some((rx, ry)) = element.radii() else {
        return false;
    };
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let local = rotate_vector(point - Point::new(element.x, element.y), -element.rotation);
    (local.x * local.x) / (rx * rx) + (local.y * local.y) / (ry * ry) <= 1.0
}

/// Per-kind hit test. Unknown kinds never hit.
#[must_use]
pub fn point_in_element(point: Point, element: &Element) -> bool {
    match element.kind {
        ElementKind::Circle { .. } => point_in_ellipse(point, element),
        ElementKind::Rect { .. } | ElementKind::Text { .. } | ElementKind::Artboard { .. } => {
            point_in_rotated_rect(point, element)
        }
        ElementKind::Unknown => false,
    }
}

/// Topmost visible, unlocked element under `point`.
#[must_use]
pub fn clicked_element(point: Point, elements: &[Element]) -> Option<&Element> {
    elements
        .iter()
        .rev()
        .filter(|el| el.is_interactive())
        .find(|el| point_in_element(point, el))
}

/// Whether an element's axis-aligned bounds overlap a marquee rectangle.
///
/// Touching edges do not count.
#[must_use]
pub fn element_intersects_rect(element: &Element, rect: &BoundingBox) -> bool {
    let Some(bounds) = element_bounds(element) else {
        return false;
    };
    let sel = normalize_rect(rect);
    bounds.x < sel.right() && bounds.right() > sel.x && bounds.y < sel.bottom() && bounds.bottom() > sel.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn approx_point(a: Point, b: Point) -> bool {
        approx(a.x, b.x) && approx(a.y, b.y)
    }

    #[test]
    fn test_rotate_point_quarter_turn() {
        let p = rotate_point(Point::new(10.0, 0.0), Point::zero(), FRAC_PI_2);
        assert!(approx_point(p, Point::new(0.0, 10.0)));
    }

    #[test]
    fn test_rotate_point_inverse() {
        let c = Point::new(3.0, -7.0);
        let p = Point::new(12.5, 4.25);
        let back = rotate_point(rotate_point(p, c, 1.234), c, -1.234);
        assert!(approx_point(p, back));
    }

    #[test]
    fn test_center_per_kind() {
        assert_eq!(center(&Element::rect(0.0, 0.0, 10.0, 20.0)), Point::new(5.0, 10.0));
        assert_eq!(center(&Element::circle(7.0, 8.0, 3.0)), Point::new(7.0, 8.0));
    }

    #[test]
    fn test_unrotated_rect_aabb_matches_frame() {
        let rect = Element::rect(10.0, 20.0, 30.0, 40.0);
        let bbox = axis_aligned_bounding_box([&rect]).expect("should have bounds");
        assert!(approx(bbox.x, 10.0));
        assert!(approx(bbox.y, 20.0));
        assert!(approx(bbox.width, 30.0));
        assert!(approx(bbox.height, 40.0));
        assert_eq!(bbox.rotation, 0.0);
        assert_eq!(bbox.kind, BoxKind::Group);
    }

    #[test]
    fn test_rotated_square_aabb_grows() {
        let square = Element::rect(0.0, 0.0, 10.0, 10.0).with_rotation(FRAC_PI_4);
        let bounds = element_bounds(&square).expect("should have bounds");
        let diagonal = 10.0 * std::f64::consts::SQRT_2;
        assert!(approx(bounds.width, diagonal));
        assert!(approx(bounds.center().x, 5.0));
    }

    #[test]
    fn test_unknown_kind_has_no_geometry() {
        let mut el = Element::rect(0.0, 0.0, 1.0, 1.0);
        el.kind = ElementKind::Unknown;
        assert!(corners(&el).is_empty());
        assert!(element_bounds(&el).is_none());
        assert!(axis_aligned_bounding_box([&el]).is_none());
        assert!(!point_in_element(Point::zero(), &el));
    }

    #[test]
    fn test_group_box_needs_two_elements() {
        let a = Element::rect(0.0, 0.0, 10.0, 10.0);
        assert!(group_selection_box(&[&a], None).is_none());
    }

    #[test]
    fn test_group_box_fits_shared_rotation() {
        let angle = 0.5;
        let a = Element::rect(0.0, 0.0, 10.0, 10.0).with_rotation(angle);
        let b = Element::rect(20.0, 0.0, 10.0, 10.0).with_rotation(angle);

        let forced = group_selection_box(&[&a, &b], Some(angle)).expect("group box");
        assert_eq!(forced.kind, BoxKind::Group);
        assert!(approx(forced.rotation, angle));

        for corner in corners(&a).into_iter().chain(corners(&b)) {
            let local = rotate_point(corner, forced.center(), -forced.rotation);
            assert!(local.x >= forced.x - 1e-6 && local.x <= forced.right() + 1e-6);
            assert!(local.y >= forced.y - 1e-6 && local.y <= forced.bottom() + 1e-6);
        }
    }

    #[test]
    fn test_group_box_prefers_minimum_area_candidate() {
        let a = Element::rect(0.0, 0.0, 10.0, 10.0);
        let b = Element::rect(20.0, 0.0, 10.0, 10.0).with_rotation(FRAC_PI_4);
        let bbox = group_selection_box(&[&a, &b], None).expect("group box");
        assert_eq!(bbox.rotation, 0.0);
    }

    #[test]
    fn test_intersection_area() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 10.0, 10.0);
        assert!(approx(intersection_area(&a, &b), 25.0));
        let far = BoundingBox::new(50.0, 50.0, 1.0, 1.0);
        assert_eq!(intersection_area(&a, &far), 0.0);
    }

    #[test]
    fn test_normalize_rect() {
        let r = normalize_rect(&BoundingBox::new(10.0, 10.0, -5.0, -8.0));
        assert_eq!(r, BoundingBox::new(5.0, 2.0, 5.0, 8.0));
    }

    #[test]
    fn test_point_in_rotated_rect() {
        let rect = Element::rect(0.0, 0.0, 100.0, 10.0).with_rotation(FRAC_PI_2);
        assert!(point_in_element(Point::new(50.0, 40.0), &rect));
        assert!(!point_in_element(Point::new(90.0, 5.0), &rect));
    }

    #[test]
    fn test_point_in_rotated_ellipse() {
        let ellipse = Element::ellipse(0.0, 0.0, 20.0, 5.0).with_rotation(FRAC_PI_2);
        assert!(point_in_element(Point::new(0.0, 18.0), &ellipse));
        assert!(!point_in_element(Point::new(18.0, 0.0), &ellipse));
    }

    #[test]
    fn test_clicked_element_prefers_topmost_interactive() {
        let bottom = Element::rect(0.0, 0.0, 50.0, 50.0);
        let top = Element::rect(10.0, 10.0, 20.0, 20.0);
        let locked = Element::rect(0.0, 0.0, 50.0, 50.0).with_locked(true);
        let elements = vec![bottom.clone(), top.clone(), locked];

        let hit = clicked_element(Point::new(15.0, 15.0), &elements).expect("hit");
        assert_eq!(hit.id, top.id);
        let hit = clicked_element(Point::new(45.0, 45.0), &elements).expect("hit");
        assert_eq!(hit.id, bottom.id);
        assert!(clicked_element(Point::new(80.0, 80.0), &elements).is_none());
    }

    #[test]
    fn test_marquee_intersection_is_strict() {
        let rect = Element::rect(10.0, 10.0, 10.0, 10.0);
        assert!(element_intersects_rect(&rect, &BoundingBox::new(25.0, 25.0, -10.0, -10.0)));
        assert!(!element_intersects_rect(&rect, &BoundingBox::new(20.0, 0.0, 10.0, 30.0)));
    }
}
