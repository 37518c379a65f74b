//! Transformation algorithms: translate, rotate and resize, for single
//! elements and for groups.
//!
//! Resizing happens in the frame's local (unrotated) space:
//!
//! ```text
//!   world pointer ──rotate(-θ)──▶ local pointer ──▶ new w, h, center
//!                                                        │
//!   world center  ◀──rotate(+θ)──────────────────────────┘
//! ```
//!
//! Group transforms always start from the state captured at pointer-down so
//! rounding never accumulates across moves.

use std::collections::HashMap;

use crate::element::{Element, ElementId};
use crate::geometry::{center, rotate_point, rotate_vector, BoundingBox, Point};
use crate::handles::{HandleAxis, HandleKind};

/// Modifier-driven resize behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResizeOptions {
    /// Keep the original width/height ratio.
    pub lock_aspect: bool,
    /// Resize symmetrically about the center instead of the pivot.
    pub from_center: bool,
}

/// Group state captured when a group transform starts.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialGroupState {
    /// Selected elements as they were at pointer-down.
    pub elements: Vec<Element>,
    /// Group frame at pointer-down.
    pub bounding_box: BoundingBox,
    /// Pivot of the grabbed handle.
    pub pivot: Point,
    /// Angle from the group center to the pointer at pointer-down.
    pub start_angle: f64,
    /// Group frame rotation at pointer-down.
    pub rotation: f64,
}

impl InitialGroupState {
    /// Capture the group state for a transform grabbed at `pointer`.
    #[must_use]
    pub fn capture(elements: Vec<Element>, bounding_box: BoundingBox, pivot: Point, pointer: Point) -> Self {
        Self {
            elements,
            start_angle: bounding_box.center().angle_to(pointer),
            rotation: bounding_box.rotation,
            bounding_box,
            pivot,
        }
    }

    fn by_id(&self) -> HashMap<ElementId, &Element> {
        self.elements.iter().map(|el| (el.id, el)).collect()
    }
}

/// Move every element present in `start` to its start position plus `(dx, dy)`.
///
/// Elements missing from `start` are left untouched.
pub fn translate(elements: &mut [Element], start: &[Element], dx: f64, dy: f64) {
    let origins: HashMap<ElementId, Point> = start.iter().map(|el| (el.id, Point::new(el.x, el.y))).collect();
    for el in elements.iter_mut() {
        if let Some(origin) = origins.get(&el.id) {
            el.x = origin.x + dx;
            el.y = origin.y + dy;
        }
    }
}

/// Round an angle to the nearest multiple of `step`.
#[must_use]
pub fn snap_angle(angle: f64, step: f64) -> f64 {
    if step > 0.0 {
        (angle / step).round() * step
    } else {
        angle
    }
}

/// Rotate one element about `center` following the pointer.
///
/// `start_angle` is the pointer angle captured at pointer-down. With `step`
/// set the resulting rotation is rounded to that increment.
#[must_use]
pub fn rotate_single(element: &Element, center: Point, start_angle: f64, pointer: Point, step: Option<f64>) -> Element {
    let raw = element.rotation + center.angle_to(pointer) - start_angle;
    Element {
        rotation: step.map_or(raw, |s| snap_angle(raw, s)),
        ..element.clone()
    }
}

/// Resize a rotated frame by dragging `handle` to `pointer`.
///
/// Returns `None` when the result would be degenerate (zero, negative or
/// non-finite size) or when `handle` is the rotation knob.
#[must_use]
pub fn resize_frame(
    frame: &BoundingBox,
    pivot: Point,
    pointer: Point,
    handle: HandleKind,
    options: ResizeOptions,
) -> Option<BoundingBox> {
    let axis = handle.axis();
    if axis == HandleAxis::Rotate {
        return None;
    }

    let (orig_w, orig_h) = (frame.width, frame.height);
    let ratio = if orig_w > 0.0 && orig_h > 0.0 { orig_w / orig_h } else { 1.0 };
    let frame_center = frame.center();
    let local = rotate_point(pointer, frame_center, -frame.rotation);

    let lock = |mut w: f64, mut h: f64| {
        if options.lock_aspect {
            match axis {
                HandleAxis::Both => {
                    if w / ratio > h {
                        h = w / ratio;
                    } else {
                        w = h * ratio;
                    }
                }
                HandleAxis::Horizontal => h = w / ratio,
                HandleAxis::Vertical => w = h * ratio,
                HandleAxis::Rotate => {}
            }
        }
        (w, h)
    };

    let (width, height, local_center) = if options.from_center {
        let dx = (local.x - frame_center.x).abs() * 2.0;
        let dy = (local.y - frame_center.y).abs() * 2.0;
        let (w, h) = match axis {
            HandleAxis::Horizontal => lock(dx, orig_h),
            HandleAxis::Vertical => lock(orig_w, dy),
            _ => lock(dx, dy),
        };
        (w, h, frame_center)
    } else {
        let local_pivot = rotate_point(pivot, frame_center, -frame.rotation);
        let dx = (local.x - local_pivot.x).abs();
        let dy = (local.y - local_pivot.y).abs();
        let (w, h) = match axis {
            HandleAxis::Horizontal => lock(dx, orig_h),
            HandleAxis::Vertical => lock(orig_w, dy),
            _ => lock(dx, dy),
        };
        let sign_x = if local.x < local_pivot.x { -1.0 } else { 1.0 };
        let sign_y = if local.y < local_pivot.y { -1.0 } else { 1.0 };
        let c = match axis {
            HandleAxis::Horizontal => Point::new(local_pivot.x + sign_x * w / 2.0, local_pivot.y),
            HandleAxis::Vertical => Point::new(local_pivot.x, local_pivot.y + sign_y * h / 2.0),
            _ => Point::new(local_pivot.x + sign_x * w / 2.0, local_pivot.y + sign_y * h / 2.0),
        };
        (w, h, c)
    };

    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return None;
    }

    let world_center = rotate_point(local_center, frame_center, frame.rotation);
    Some(BoundingBox::centered(world_center, width, height, frame.rotation).with_kind(frame.kind))
}

/// Fit an element to a new frame, keeping its rotation.
pub fn apply_frame(element: &mut Element, frame: &BoundingBox) {
    element.set_size(frame.width, frame.height);
    element.set_center(frame.center());
}

/// Resize a single element. Degenerate results return the element unchanged.
#[must_use]
pub fn resize_single(
    element: &Element,
    pivot: Point,
    pointer: Point,
    handle: HandleKind,
    options: ResizeOptions,
) -> Element {
    let mut out = element.clone();
    if let Some(frame) = BoundingBox::from_element(element)
        .and_then(|frame| resize_frame(&frame, pivot, pointer, handle, options))
    {
        apply_frame(&mut out, &frame);
    }
    out
}

/// Rotate captured group members about `group_center` to `new_angle`.
///
/// Each member's start center turns by `new_angle - initial.rotation` and its
/// rotation shifts by the same amount. Artboards move but stay unrotated.
/// Returns the rotated group frame.
pub fn rotate_group(
    elements: &mut [Element],
    group_center: Point,
    new_angle: f64,
    initial: &InitialGroupState,
) -> BoundingBox {
    let delta = new_angle - initial.rotation;
    let start = initial.by_id();

    for el in elements.iter_mut() {
        let Some(origin) = start.get(&el.id) else {
            continue;
        };
        let moved = rotate_point(center(origin), group_center, delta);
        el.set_center(moved);
        el.rotation = if el.is_artboard() { 0.0 } else { origin.rotation + delta };
    }

    let box_center = rotate_point(initial.bounding_box.center(), group_center, delta);
    BoundingBox::centered(
        box_center,
        initial.bounding_box.width,
        initial.bounding_box.height,
        new_angle,
    )
    .with_kind(initial.bounding_box.kind)
}

/// Remap captured group members into `new_box`.
///
/// Offsets from the group center are expressed in the old frame, scaled by
/// the frame's size change, and re-expressed in the new frame. Member sizes
/// scale likewise.
pub fn resize_group(elements: &mut [Element], new_box: &BoundingBox, initial: &InitialGroupState) {
    let old_box = &initial.bounding_box;
    let sx = if old_box.width == 0.0 { 1.0 } else { new_box.width / old_box.width };
    let sy = if old_box.height == 0.0 { 1.0 } else { new_box.height / old_box.height };
    let old_center = old_box.center();
    let new_center = new_box.center();
    let rotation_delta = new_box.rotation - old_box.rotation;
    let start = initial.by_id();

    for el in elements.iter_mut() {
        let Some(origin) = start.get(&el.id) else {
            continue;
        };
        let Some((w, h)) = origin.size() else {
            continue;
        };
        let local = rotate_vector(center(origin) - old_center, -old_box.rotation);
        let scaled = Point::new(local.x * sx, local.y * sy);
        let moved = new_center + rotate_vector(scaled, new_box.rotation);

        el.set_size(w * sx, h * sy);
        el.set_center(moved);
        el.rotation = if el.is_artboard() { 0.0 } else { origin.rotation + rotation_delta };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxKind;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_translate_only_captured() {
        let a = Element::rect(0.0, 0.0, 10.0, 10.0);
        let b = Element::rect(50.0, 50.0, 10.0, 10.0);
        let mut live = vec![a.clone(), b.clone()];
        live[0].x = 999.0;

        translate(&mut live, &[a.clone()], 5.0, -2.0);
        assert_eq!((live[0].x, live[0].y), (5.0, -2.0));
        assert_eq!((live[1].x, live[1].y), (50.0, 50.0));
    }

    #[test]
    fn test_rotate_single_follows_pointer() {
        let rect = Element::rect(0.0, 0.0, 10.0, 10.0);
        let c = Point::new(5.0, 5.0);
        let start = c.angle_to(Point::new(5.0, -20.0));
        let rotated = rotate_single(&rect, c, start, Point::new(30.0, 5.0), None);
        assert!(approx(rotated.rotation, FRAC_PI_2));
    }

    #[test]
    fn test_rotate_single_snaps_to_step() {
        let rect = Element::rect(0.0, 0.0, 10.0, 10.0);
        let c = Point::new(5.0, 5.0);
        let pointer = rotate_point(Point::new(15.0, 5.0), c, 20f64.to_radians());
        let rotated = rotate_single(&rect, c, 0.0, pointer, Some(15f64.to_radians()));
        assert!(approx(rotated.rotation, 15f64.to_radians()));
    }

    #[test]
    fn test_resize_corner_keeps_pivot() {
        let rect = Element::rect(0.0, 0.0, 100.0, 50.0);
        let resized = resize_single(
            &rect,
            Point::new(0.0, 0.0),
            Point::new(150.0, 80.0),
            HandleKind::BottomRight,
            ResizeOptions::default(),
        );
        let frame = BoundingBox::from_element(&resized).expect("frame");
        assert!(approx(frame.x, 0.0) && approx(frame.y, 0.0));
        assert!(approx(frame.width, 150.0) && approx(frame.height, 80.0));
    }

    #[test]
    fn test_resize_edge_changes_one_axis() {
        let frame = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let out = resize_frame(
            &frame,
            Point::new(0.0, 25.0),
            Point::new(140.0, 999.0),
            HandleKind::MiddleRight,
            ResizeOptions::default(),
        )
        .expect("valid resize");
        assert!(approx(out.width, 140.0));
        assert!(approx(out.height, 50.0));
        assert!(approx(out.y, 0.0));
    }

    #[test]
    fn test_resize_lock_aspect_corner() {
        let frame = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let options = ResizeOptions {
            lock_aspect: true,
            from_center: false,
        };
        let out = resize_frame(&frame, Point::zero(), Point::new(200.0, 60.0), HandleKind::BottomRight, options)
            .expect("valid resize");
        assert!(approx(out.width, 200.0));
        assert!(approx(out.height, 100.0));
    }

    #[test]
    fn test_resize_lock_aspect_edges() {
        let frame = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let options = ResizeOptions {
            lock_aspect: true,
            from_center: false,
        };
        let out = resize_frame(&frame, Point::new(50.0, 0.0), Point::new(50.0, 100.0), HandleKind::BottomCenter, options)
            .expect("valid resize");
        assert!(approx(out.height, 100.0));
        assert!(approx(out.width, 200.0));
    }

    #[test]
    fn test_resize_from_center_keeps_center() {
        let frame = BoundingBox::new(0.0, 0.0, 100.0, 50.0).with_rotation(0.7);
        let options = ResizeOptions {
            lock_aspect: false,
            from_center: true,
        };
        let pointer = rotate_point(Point::new(120.0, 60.0), frame.center(), 0.7);
        let out = resize_frame(&frame, Point::zero(), pointer, HandleKind::BottomRight, options).expect("valid");
        assert!(approx(out.center().x, frame.center().x));
        assert!(approx(out.center().y, frame.center().y));
        assert!(approx(out.width, 140.0));
        assert!(approx(out.height, 70.0));
    }

    #[test]
    fn test_resize_flips_past_pivot() {
        let frame = BoundingBox::new(0.0, 0.0, 100.0, 50.0);
        let out = resize_frame(
            &frame,
            Point::new(0.0, 0.0),
            Point::new(-40.0, -20.0),
            HandleKind::BottomRight,
            ResizeOptions::default(),
        )
        .expect("valid resize");
        assert!(approx(out.x, -40.0) && approx(out.y, -20.0));
        assert!(approx(out.width, 40.0) && approx(out.height, 20.0));
    }

    #[test]
    fn test_resize_degenerate_rejected() {
        let rect = Element::rect(0.0, 0.0, 100.0, 50.0);
        let same = resize_single(
            &rect,
            Point::new(0.0, 0.0),
            Point::new(0.0, 30.0),
            HandleKind::BottomRight,
            ResizeOptions::default(),
        );
        assert_eq!(same, rect);
        let frame = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        assert!(resize_frame(&frame, Point::zero(), Point::zero(), HandleKind::Rotation, ResizeOptions::default()).is_none());
    }

    #[test]
    fn test_resize_circle_updates_radii() {
        let circle = Element::circle(50.0, 50.0, 10.0);
        let resized = resize_single(
            &circle,
            Point::new(40.0, 50.0),
            Point::new(80.0, 50.0),
            HandleKind::MiddleRight,
            ResizeOptions::default(),
        );
        assert_eq!(resized.radii(), Some((20.0, 10.0)));
        assert!(approx(resized.x, 60.0) && approx(resized.y, 50.0));
    }

    fn group() -> (Vec<Element>, InitialGroupState) {
        let a = Element::rect(0.0, 0.0, 10.0, 10.0);
        let b = Element::circle(35.0, 5.0, 5.0);
        let elements = vec![a, b];
        let bbox = BoundingBox::new(0.0, 0.0, 40.0, 10.0).with_kind(BoxKind::Group);
        let initial = InitialGroupState::capture(elements.clone(), bbox, Point::new(0.0, 0.0), Point::new(40.0, 10.0));
        (elements, initial)
    }

    #[test]
    fn test_rotate_group_half_turn() {
        let (mut elements, initial) = group();
        let c = initial.bounding_box.center();
        let new_box = rotate_group(&mut elements, c, PI, &initial);

        assert!(approx(elements[0].x, 30.0) && approx(elements[0].y, 0.0));
        assert!(approx(elements[0].rotation, PI));
        assert!(approx(elements[1].x, 5.0) && approx(elements[1].y, 5.0));
        assert!(approx(new_box.rotation, PI));
        assert!(approx(new_box.center().x, c.x));
    }

    #[test]
    fn test_rotate_group_keeps_artboards_upright() {
        let board = Element::artboard(0.0, 0.0, 20.0, 20.0, "A");
        let rect = Element::rect(40.0, 0.0, 20.0, 20.0);
        let mut elements = vec![board, rect];
        let bbox = BoundingBox::new(0.0, 0.0, 60.0, 20.0).with_kind(BoxKind::Group);
        let initial = InitialGroupState::capture(elements.clone(), bbox, Point::zero(), Point::zero());
        rotate_group(&mut elements, bbox.center(), FRAC_PI_2, &initial);
        assert_eq!(elements[0].rotation, 0.0);
        assert!(approx(elements[1].rotation, FRAC_PI_2));
    }

    #[test]
    fn test_resize_group_scales_members() {
        let (mut elements, initial) = group();
        let new_box = BoundingBox::new(0.0, 0.0, 80.0, 20.0).with_kind(BoxKind::Group);
        resize_group(&mut elements, &new_box, &initial);

        let frame = BoundingBox::from_element(&elements[0]).expect("frame");
        assert!(approx(frame.x, 0.0) && approx(frame.y, 0.0));
        assert!(approx(frame.width, 20.0) && approx(frame.height, 20.0));
        assert_eq!(elements[1].radii(), Some((10.0, 10.0)));
        assert!(approx(elements[1].x, 70.0) && approx(elements[1].y, 10.0));
    }

    #[test]
    fn test_resize_group_zero_width_keeps_scale() {
        let a = Element::rect(0.0, 0.0, 0.0, 10.0);
        let mut elements = vec![a];
        let bbox = BoundingBox::new(0.0, 0.0, 0.0, 10.0);
        let initial = InitialGroupState::capture(elements.clone(), bbox, Point::zero(), Point::zero());
        resize_group(&mut elements, &BoundingBox::new(0.0, 0.0, 5.0, 20.0), &initial);
        assert_eq!(elements[0].size(), Some((0.0, 20.0)));
    }
}
