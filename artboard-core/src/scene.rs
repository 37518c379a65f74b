//! Ordered scene of elements.
//!
//! Element order is paint order: the last element is drawn on top and wins
//! hit tests.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::element::{Element, ElementId};
use crate::error::{EditorError, EditorResult};
use crate::geometry::{clicked_element, Point};
use crate::selection::Selection;

/// A scene containing all editor elements in paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    elements: Vec<Element>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene from elements in paint order.
    #[must_use]
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Add an element on top of everything else.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Insert an element at a paint position, clamped to the scene length.
    pub fn insert(&mut self, index: usize, element: Element) -> ElementId {
        let id = element.id;
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        id
    }

    /// Remove an element from the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the element is not found.
    pub fn remove_element(&mut self, id: ElementId) -> EditorResult<Element> {
        let index = self
            .index_of(id)
            .ok_or_else(|| EditorError::ElementNotFound(id.to_string()))?;
        Ok(self.elements.remove(index))
    }

    /// Get an element by ID.
    #[must_use]
    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn get_element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    /// Paint position of an element.
    #[must_use]
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Whether the scene holds an element with this ID.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// All elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Mutable access to all elements in paint order.
    pub fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    /// Consume the scene, returning its elements.
    #[must_use]
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the scene is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All artboards in paint order.
    pub fn artboards(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|el| el.is_artboard())
    }

    /// Elements owned by an artboard.
    pub fn children_of(&self, artboard: ElementId) -> impl Iterator<Item = &Element> {
        self.elements
            .iter()
            .filter(move |el| el.parent_id == Some(artboard))
    }

    /// The topmost visible, unlocked element under a world point.
    #[must_use]
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        clicked_element(point, &self.elements).map(|el| el.id)
    }

    /// Replace every element at once.
    pub fn replace_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Clear parents that are missing, not artboards, or set on artboards.
    ///
    /// Returns how many parents were cleared.
    pub fn sanitize_parents(&mut self) -> usize {
        let boards: HashSet<ElementId> = self.artboards().map(|el| el.id).collect();
        let mut cleared = 0;
        for el in &mut self.elements {
            let Some(parent) = el.parent_id else {
                continue;
            };
            if el.is_artboard() || !boards.contains(&parent) {
                warn!(element = %el.id, %parent, "clearing invalid parent");
                el.parent_id = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Move the selected elements above everything else, keeping their
    /// relative order. Returns whether the order changed.
    pub fn bring_to_front(&mut self, selection: &Selection) -> bool {
        let (picked, rest): (Vec<Element>, Vec<Element>) =
            self.elements.iter().cloned().partition(|el| selection.contains(el.id));
        self.reorder(rest.into_iter().chain(picked).collect(), "bring_to_front")
    }

    /// Move the selected elements below everything else, keeping their
    /// relative order. Returns whether the order changed.
    pub fn send_to_back(&mut self, selection: &Selection) -> bool {
        let (picked, rest): (Vec<Element>, Vec<Element>) =
            self.elements.iter().cloned().partition(|el| selection.contains(el.id));
        self.reorder(picked.into_iter().chain(rest).collect(), "send_to_back")
    }

    /// Move each selected element one step up, past one unselected
    /// neighbour. Returns whether the order changed.
    pub fn bring_forward(&mut self, selection: &Selection) -> bool {
        let mut order = self.elements.clone();
        for i in (0..order.len().saturating_sub(1)).rev() {
            if selection.contains(order[i].id) && !selection.contains(order[i + 1].id) {
                order.swap(i, i + 1);
            }
        }
        self.reorder(order, "bring_forward")
    }

    /// Move each selected element one step down, past one unselected
    /// neighbour. Returns whether the order changed.
    pub fn send_backward(&mut self, selection: &Selection) -> bool {
        let mut order = self.elements.clone();
        for i in 1..order.len() {
            if selection.contains(order[i].id) && !selection.contains(order[i - 1].id) {
                order.swap(i, i - 1);
            }
        }
        self.reorder(order, "send_backward")
    }

    fn reorder(&mut self, order: Vec<Element>, op: &str) -> bool {
        let changed = order
            .iter()
            .zip(&self.elements)
            .any(|(a, b)| a.id != b.id);
        if changed {
            debug!(op, count = order.len(), "layer order changed");
            self.elements = order;
        }
        changed
    }

    /// Serialize the scene to a JSON array of elements.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EditorResult<String> {
        serde_json::to_string(self).map_err(EditorError::Serialization)
    }

    /// Deserialize a scene from a JSON array of elements.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        serde_json::from_str(json).map_err(EditorError::Serialization)
    }
}

impl FromIterator<Element> for Scene {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        Self::from_elements(iter.into_iter().collect())
    }
}
