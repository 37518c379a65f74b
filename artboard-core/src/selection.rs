//! Selection of element IDs and the frame drawn around it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::element::{Element, ElementId};
use crate::geometry::{axis_aligned_bounding_box, group_selection_box, BoundingBox, ANGLE_EPSILON};
use crate::scene::Scene;

/// A set of selected element IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: BTreeSet<ElementId>,
}

impl Selection {
    /// Empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection of exactly one element.
    #[must_use]
    pub fn single(id: ElementId) -> Self {
        Self::from_ids([id])
    }

    /// Selection of the given IDs.
    pub fn from_ids(ids: impl IntoIterator<Item = ElementId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Add an ID. Returns whether it was newly added.
    pub fn insert(&mut self, id: ElementId) -> bool {
        self.ids.insert(id)
    }

    /// Remove an ID. Returns whether it was present.
    pub fn remove(&mut self, id: ElementId) -> bool {
        self.ids.remove(&id)
    }

    /// Add `id` if absent, remove it if present.
    pub fn toggle(&mut self, id: ElementId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Number of selected IDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected IDs in a stable order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.ids.iter().copied()
    }

    /// Drop IDs no longer present in `scene`.
    pub fn retain_existing(&mut self, scene: &Scene) {
        self.ids.retain(|id| scene.contains(*id));
    }

    /// Selected elements in paint order. Stale IDs are skipped.
    #[must_use]
    pub fn elements<'a>(&self, scene: &'a Scene) -> Vec<&'a Element> {
        scene
            .elements()
            .iter()
            .filter(|el| self.contains(el.id))
            .collect()
    }
}

impl FromIterator<ElementId> for Selection {
    fn from_iter<I: IntoIterator<Item = ElementId>>(iter: I) -> Self {
        Self::from_ids(iter)
    }
}

/// The frame shown around the current selection.
///
/// One element gets its own rotated frame. Several elements sharing one
/// non-zero rotation get a group box at that angle, otherwise the group box
/// is axis-aligned.
#[must_use]
pub fn selection_box(scene: &Scene, selection: &Selection) -> Option<BoundingBox> {
    frame_around(&selection.elements(scene))
}

/// The selection frame rule applied to an explicit list of elements.
#[must_use]
pub fn frame_around(elements: &[&Element]) -> Option<BoundingBox> {
    match elements {
        [] => None,
        [only] => BoundingBox::from_element(only),
        [first, rest @ ..] => {
            let angle = first.rotation;
            let uniform = angle.abs() > ANGLE_EPSILON
                && rest.iter().all(|el| (el.rotation - angle).abs() < ANGLE_EPSILON);
            if uniform {
                group_selection_box(elements, Some(angle))
            } else {
                axis_aligned_bounding_box(elements.iter().copied())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxKind;

    #[test]
    fn test_toggle_and_membership() {
        let id = ElementId::new();
        let mut sel = Selection::new();
        sel.toggle(id);
        assert!(sel.contains(id));
        sel.toggle(id);
        assert!(sel.is_empty());
        assert!(sel.insert(id));
        assert!(!sel.insert(id));
        assert!(sel.remove(id));
    }

    #[test]
    fn test_stale_ids_are_skipped_and_pruned() {
        let rect = Element::rect(0.0, 0.0, 10.0, 10.0);
        let scene = Scene::from_elements(vec![rect.clone()]);
        let mut sel = Selection::from_ids([rect.id, ElementId::new()]);

        assert_eq!(sel.elements(&scene).len(), 1);
        sel.retain_existing(&scene);
        assert_eq!(sel, Selection::single(rect.id));
    }

    #[test]
    fn test_selection_box_single_uses_own_frame() {
        let rect = Element::rect(10.0, 10.0, 20.0, 30.0).with_rotation(0.3);
        let scene = Scene::from_elements(vec![rect.clone()]);
        let bbox = selection_box(&scene, &Selection::single(rect.id)).expect("box");
        assert_eq!(bbox.kind, BoxKind::Element);
        assert!((bbox.rotation - 0.3).abs() < f64::EPSILON);
        assert!((bbox.width - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_selection_box_uniform_rotation() {
        let a = Element::rect(0.0, 0.0, 10.0, 10.0).with_rotation(0.4);
        let b = Element::rect(30.0, 0.0, 10.0, 10.0).with_rotation(0.4);
        let scene = Scene::from_elements(vec![a.clone(), b.clone()]);
        let bbox = selection_box(&scene, &Selection::from_ids([a.id, b.id])).expect("box");
        assert_eq!(bbox.kind, BoxKind::Group);
        assert!((bbox.rotation - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_selection_box_mixed_rotation_is_axis_aligned() {
        let a = Element::rect(0.0, 0.0, 10.0, 10.0).with_rotation(0.4);
        let b = Element::rect(30.0, 0.0, 10.0, 10.0);
        let scene = Scene::from_elements(vec![a.clone(), b.clone()]);
        let bbox = selection_box(&scene, &Selection::from_ids([a.id, b.id])).expect("box");
        assert_eq!(bbox.rotation, 0.0);
        assert_eq!(bbox.kind, BoxKind::Group);
    }

    #[test]
    fn test_selection_box_empty() {
        let scene = Scene::new();
        assert!(selection_box(&scene, &Selection::new()).is_none());
    }
}
