//! Artboard containment and artboard resizing.
//!
//! An element belongs to the artboard it overlaps the most, provided the
//! overlap covers more than `threshold` of the element's own area.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::element::{Element, ElementId, ElementKind};
use crate::geometry::{element_bounds, intersection_area, BoundingBox, Point};
use crate::handles::{HandleAxis, HandleKind};
use crate::transform::ResizeOptions;

fn artboard_frames<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Vec<(ElementId, BoundingBox)> {
    elements
        .into_iter()
        .filter(|el| el.is_artboard())
        .filter_map(|el| element_bounds(el).map(|b| (el.id, b)))
        .collect()
}

/// Largest positive overlap of `bounds` with any artboard frame.
fn largest_overlap(bounds: &BoundingBox, boards: &[(ElementId, BoundingBox)]) -> Option<(ElementId, f64)> {
    let mut best: Option<(ElementId, f64)> = None;
    for (id, frame) in boards {
        let area = intersection_area(bounds, frame);
        if area > 0.0 && best.map_or(true, |(_, a)| area > a) {
            best = Some((*id, area));
        }
    }
    best
}

fn parent_for(element: &Element, boards: &[(ElementId, BoundingBox)], threshold: f64) -> Option<ElementId> {
    if element.is_artboard() {
        return None;
    }
    let bounds = element_bounds(element)?;
    let own_area = bounds.area();
    if own_area <= 0.0 {
        return None;
    }
    largest_overlap(&bounds, boards)
        .filter(|(_, area)| area / own_area > threshold)
        .map(|(id, _)| id)
}

/// The artboard that should own `element`, if any.
///
/// Artboards and zero-area elements never get a parent.
#[must_use]
pub fn find_parent_artboard(element: &Element, artboards: &[&Element], threshold: f64) -> Option<ElementId> {
    let boards = artboard_frames(artboards.iter().copied());
    parent_for(element, &boards, threshold)
}

/// Recompute `parent_id` for each moved non-artboard element.
pub fn update_association(elements: &mut [Element], moved: &HashSet<ElementId>, threshold: f64) {
    let boards = artboard_frames(elements.iter());
    for el in elements.iter_mut() {
        if el.is_artboard() || !moved.contains(&el.id) {
            continue;
        }
        let parent = parent_for(el, &boards, threshold);
        if parent != el.parent_id {
            trace!(element = %el.id, ?parent, "reparented");
            el.parent_id = parent;
        }
    }
}

/// Positive overlaps of an element with each artboard, in paint order.
fn overlaps(element: &Element, boards: &[(ElementId, BoundingBox)]) -> Vec<(ElementId, f64)> {
    let Some(bounds) = element_bounds(element) else {
        return Vec::new();
    };
    boards
        .iter()
        .map(|(id, frame)| (*id, intersection_area(&bounds, frame)))
        .filter(|(_, area)| *area > 0.0)
        .collect()
}

/// Re-run association for the `candidates` whose membership inputs changed
/// since `start`.
///
/// A candidate is re-checked when its own bounds or its overlap with any
/// artboard differs from `start`. The others get their `start` parent back,
/// so a gesture with no net geometric change leaves every parent as it was.
pub fn settle_association(
    elements: &mut [Element],
    start: &[Element],
    candidates: &HashSet<ElementId>,
    threshold: f64,
) {
    let boards = artboard_frames(elements.iter());
    let start_boards = artboard_frames(start.iter());
    let before: HashMap<ElementId, &Element> = start.iter().map(|el| (el.id, el)).collect();

    let mut changed = HashSet::new();
    for el in elements.iter_mut() {
        if el.is_artboard() || !candidates.contains(&el.id) {
            continue;
        }
        match before.get(&el.id) {
            Some(old)
                if element_bounds(old) == element_bounds(el)
                    && overlaps(old, &start_boards) == overlaps(el, &boards) =>
            {
                el.parent_id = old.parent_id;
            }
            _ => {
                changed.insert(el.id);
            }
        }
    }
    update_association(elements, &changed, threshold);
}

/// Artboard to highlight while `primary` is being moved.
#[must_use]
pub fn artboard_highlight(primary: Option<ElementId>, elements: &[Element], threshold: f64) -> Option<ElementId> {
    let id = primary?;
    let element = elements.iter().find(|el| el.id == id)?;
    let boards = artboard_frames(elements.iter());
    parent_for(element, &boards, threshold)
}

/// Assign parents when a document is opened.
///
/// Existing parents pointing at an artboard are kept. Other elements join
/// the artboard they overlap most, with any positive overlap. Artboards
/// never have a parent.
pub fn initialize_parents(elements: &mut [Element]) {
    let boards = artboard_frames(elements.iter());
    let board_ids: HashSet<ElementId> = boards.iter().map(|(id, _)| *id).collect();

    for el in elements.iter_mut() {
        if el.is_artboard() {
            el.parent_id = None;
            continue;
        }
        if el.parent_id.is_some_and(|p| board_ids.contains(&p)) {
            continue;
        }
        el.parent_id = element_bounds(el)
            .and_then(|bounds| largest_overlap(&bounds, &boards))
            .map(|(id, _)| id);
    }
}

/// Resize an artboard by one of its handles. Artboards stay axis-aligned.
///
/// In pivot mode only the dragged edges move and neither dimension drops
/// below `min_size`. With `from_center` the artboard grows about its center.
/// Non-artboards are returned unchanged.
#[must_use]
pub fn resize_artboard(
    artboard: &Element,
    pointer: Point,
    handle: HandleKind,
    options: ResizeOptions,
    min_size: f64,
) -> Element {
    let ElementKind::Artboard { width, height, .. } = artboard.kind else {
        return artboard.clone();
    };
    let axis = handle.axis();
    if axis == HandleAxis::Rotate || width <= 0.0 || height <= 0.0 {
        return artboard.clone();
    }
    let ratio = width / height;

    let (mut x, mut y) = (artboard.x, artboard.y);
    let (mut w, mut h) = (width, height);

    if options.from_center {
        let c = Point::new(x + width / 2.0, y + height / 2.0);
        if axis != HandleAxis::Vertical {
            w = ((pointer.x - c.x).abs() * 2.0).max(min_size);
        }
        if axis != HandleAxis::Horizontal {
            h = ((pointer.y - c.y).abs() * 2.0).max(min_size);
        }
        if options.lock_aspect {
            if w / ratio > h {
                h = w / ratio;
            } else {
                w = h * ratio;
            }
        }
        x = c.x - w / 2.0;
        y = c.y - h / 2.0;
    } else {
        let (left, top, right, bottom) = edges(handle);
        let (x2, y2) = (artboard.x + width, artboard.y + height);
        if right {
            w = (pointer.x - x).max(min_size);
        }
        if left {
            w = (x2 - pointer.x).max(min_size);
            x = x2 - w;
        }
        if bottom {
            h = (pointer.y - y).max(min_size);
        }
        if top {
            h = (y2 - pointer.y).max(min_size);
            y = y2 - h;
        }

        if options.lock_aspect {
            if left || right {
                let adjusted = (w / ratio).max(min_size);
                w = adjusted * ratio;
                if left {
                    x = x2 - w;
                }
                if top {
                    y += h - adjusted;
                }
                h = adjusted;
            } else {
                let adjusted = (h * ratio).max(min_size);
                h = adjusted / ratio;
                if top {
                    y = y2 - h;
                }
                w = adjusted;
            }
        }
    }

    let mut out = artboard.clone();
    out.x = x;
    out.y = y;
    out.set_size(w, h);
    out
}

/// Which edges a handle drags: `(left, top, right, bottom)`.
const fn edges(handle: HandleKind) -> (bool, bool, bool, bool) {
    match handle {
        HandleKind::TopLeft => (true, true, false, false),
        HandleKind::TopCenter => (false, true, false, false),
        HandleKind::TopRight => (false, true, true, false),
        HandleKind::MiddleLeft => (true, false, false, false),
        HandleKind::MiddleRight => (false, false, true, false),
        HandleKind::BottomLeft => (true, false, false, true),
        HandleKind::BottomCenter => (false, false, false, true),
        HandleKind::BottomRight => (false, false, true, true),
        HandleKind::Rotation => (false, false, false, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Element {
        Element::artboard(0.0, 0.0, 100.0, 100.0, "Board")
    }

    #[test]
    fn test_majority_overlap_assigns_parent() {
        let board = board();
        // 60% of a 10x10 rect inside the board.
        let rect = Element::rect(94.0, 10.0, 10.0, 10.0);
        assert_eq!(find_parent_artboard(&rect, &[&board], 0.5), Some(board.id));
    }

    #[test]
    fn test_minority_overlap_has_no_parent() {
        let board = board();
        // 40% inside.
        let rect = Element::rect(96.0, 10.0, 10.0, 10.0);
        assert_eq!(find_parent_artboard(&rect, &[&board], 0.5), None);
    }

    #[test]
    fn test_largest_overlap_wins() {
        let left = Element::artboard(0.0, 0.0, 100.0, 100.0, "L");
        let right = Element::artboard(100.0, 0.0, 100.0, 100.0, "R");
        let rect = Element::rect(70.0, 10.0, 40.0, 10.0);
        assert_eq!(find_parent_artboard(&rect, &[&left, &right], 0.5), Some(left.id));
    }

    #[test]
    fn test_artboards_and_degenerate_elements_have_no_parent() {
        let board = board();
        let inner = Element::artboard(10.0, 10.0, 10.0, 10.0, "inner");
        assert_eq!(find_parent_artboard(&inner, &[&board], 0.5), None);
        let flat = Element::rect(10.0, 10.0, 0.0, 10.0);
        assert_eq!(find_parent_artboard(&flat, &[&board], 0.5), None);
    }

    #[test]
    fn test_update_association_only_touches_moved() {
        let board = board();
        let moved = Element::rect(10.0, 10.0, 10.0, 10.0);
        let still = Element::rect(20.0, 20.0, 10.0, 10.0);
        let mut elements = vec![board.clone(), moved.clone(), still];
        let ids: HashSet<ElementId> = [moved.id].into_iter().collect();

        update_association(&mut elements, &ids, 0.5);
        assert_eq!(elements[1].parent_id, Some(board.id));
        assert_eq!(elements[2].parent_id, None);

        elements[1].x = 500.0;
        update_association(&mut elements, &ids, 0.5);
        assert_eq!(elements[1].parent_id, None);
    }

    #[test]
    fn test_settle_association_restores_start_parent_when_unchanged() {
        let board = board();
        let loose = Element::rect(90.0, 10.0, 20.0, 20.0).with_parent(board.id);
        let start = vec![board.clone(), loose.clone()];
        let ids: HashSet<ElementId> = [loose.id].into_iter().collect();

        // Cleared by an earlier tick, now back where it started.
        let mut elements = start.clone();
        elements[1].parent_id = None;
        settle_association(&mut elements, &start, &ids, 0.5);
        assert_eq!(elements[1].parent_id, Some(board.id));

        // Moved: the threshold decides.
        elements[1].x = 92.0;
        settle_association(&mut elements, &start, &ids, 0.5);
        assert_eq!(elements[1].parent_id, None);
    }

    #[test]
    fn test_settle_association_rechecks_when_artboard_changes() {
        let board = board();
        let low = Element::rect(10.0, 80.0, 10.0, 10.0).with_parent(board.id);
        let start = vec![board.clone(), low.clone()];
        let ids: HashSet<ElementId> = [low.id].into_iter().collect();

        let mut elements = start.clone();
        elements[0].set_size(100.0, 84.0);
        settle_association(&mut elements, &start, &ids, 0.5);
        assert_eq!(elements[1].parent_id, None);
    }

    #[test]
    fn test_highlight_follows_primary() {
        let board = board();
        let rect = Element::rect(10.0, 10.0, 10.0, 10.0);
        let elements = vec![board.clone(), rect.clone()];
        assert_eq!(artboard_highlight(Some(rect.id), &elements, 0.5), Some(board.id));
        assert_eq!(artboard_highlight(None, &elements, 0.5), None);
    }

    #[test]
    fn test_initialize_parents() {
        let board = board();
        let other = Element::artboard(200.0, 0.0, 100.0, 100.0, "Other");
        let kept = Element::rect(10.0, 10.0, 10.0, 10.0).with_parent(other.id);
        let barely = Element::rect(95.0, 10.0, 20.0, 10.0);
        let stale = Element::rect(500.0, 500.0, 10.0, 10.0).with_parent(ElementId::new());
        let mut elements = vec![board.clone(), other.clone(), kept, barely, stale];

        initialize_parents(&mut elements);
        assert_eq!(elements[2].parent_id, Some(other.id));
        assert_eq!(elements[3].parent_id, Some(board.id));
        assert_eq!(elements[4].parent_id, None);
    }

    #[test]
    fn test_resize_artboard_right_edge() {
        let out = resize_artboard(&board(), Point::new(150.0, 999.0), HandleKind::MiddleRight, ResizeOptions::default(), 1.0);
        assert_eq!((out.x, out.y), (0.0, 0.0));
        assert_eq!(out.size(), Some((150.0, 100.0)));
    }

    #[test]
    fn test_resize_artboard_top_left_clamps() {
        let out = resize_artboard(&board(), Point::new(200.0, 200.0), HandleKind::TopLeft, ResizeOptions::default(), 1.0);
        assert_eq!(out.size(), Some((1.0, 1.0)));
        assert_eq!((out.x, out.y), (99.0, 99.0));
    }

    #[test]
    fn test_resize_artboard_lock_aspect() {
        let board = Element::artboard(0.0, 0.0, 200.0, 100.0, "Wide");
        let options = ResizeOptions {
            lock_aspect: true,
            from_center: false,
        };
        let out = resize_artboard(&board, Point::new(100.0, 10.0), HandleKind::TopRight, options, 1.0);
        assert_eq!(out.size(), Some((100.0, 50.0)));
        assert_eq!((out.x, out.y), (0.0, 50.0));
    }

    #[test]
    fn test_resize_artboard_lock_aspect_respects_min_size() {
        let board = Element::artboard(0.0, 0.0, 200.0, 100.0, "Wide");
        let options = ResizeOptions {
            lock_aspect: true,
            from_center: false,
        };
        let out = resize_artboard(&board, Point::new(300.0, 50.0), HandleKind::MiddleLeft, options, 10.0);
        assert_eq!(out.size(), Some((20.0, 10.0)));
        assert_eq!((out.x, out.y), (180.0, 0.0));

        let tall = Element::artboard(0.0, 0.0, 100.0, 200.0, "Tall");
        let out = resize_artboard(&tall, Point::new(50.0, 300.0), HandleKind::TopCenter, options, 10.0);
        assert_eq!(out.size(), Some((10.0, 20.0)));
        assert_eq!((out.x, out.y), (0.0, 180.0));
    }

    #[test]
    fn test_resize_artboard_from_center() {
        let options = ResizeOptions {
            lock_aspect: false,
            from_center: true,
        };
        let out = resize_artboard(&board(), Point::new(120.0, 60.0), HandleKind::BottomRight, options, 1.0);
        assert_eq!(out.size(), Some((140.0, 20.0)));
        assert_eq!((out.x, out.y), (-20.0, 40.0));
    }

    #[test]
    fn test_resize_non_artboard_is_noop() {
        let rect = Element::rect(0.0, 0.0, 10.0, 10.0);
        let out = resize_artboard(&rect, Point::new(50.0, 50.0), HandleKind::BottomRight, ResizeOptions::default(), 1.0);
        assert_eq!(out, rect);
    }
}
