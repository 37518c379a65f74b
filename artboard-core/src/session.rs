//! Editor session: the one mutable document.
//!
//! The session owns the history ledger, the selection, the viewport, the
//! active gesture and the clipboard. Hosts feed it screen-space pointer
//! events and read a [`RenderFrame`] back for drawing.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::artboard::initialize_parents;
use crate::config::EditorConfig;
use crate::element::{Element, ElementId};
use crate::event::{KeyModifiers, PointerButton, PointerInput};
use crate::geometry::{BoundingBox, Point};
use crate::history::History;
use crate::interaction::{Gesture, InteractionEngine, PointerMove};
use crate::scene::Scene;
use crate::selection::{selection_box, Selection};
use crate::snapping::SnapGuide;
use crate::viewport::Viewport;

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderFrame {
    /// Scene to draw, the live gesture scene while one runs.
    pub scene: Scene,
    /// Selected element IDs.
    pub selection: Selection,
    /// Selection frame with handles.
    pub bounding_box: Option<BoundingBox>,
    /// Active snap guides.
    pub snap_guides: Vec<SnapGuide>,
    /// Marquee rectangle.
    pub selection_rect: Option<BoundingBox>,
    /// Artboard highlighted as a drop target.
    pub highlighted_artboard: Option<ElementId>,
    /// Current pan and zoom.
    pub viewport: Viewport,
}

/// A document being edited.
#[derive(Debug, Clone)]
pub struct EditorSession {
    engine: InteractionEngine,
    history: History,
    selection: Selection,
    viewport: Viewport,
    gesture: Option<Gesture>,
    clipboard: Vec<Element>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(Scene::new(), EditorConfig::default())
    }
}

impl EditorSession {
    /// Open a scene. Invalid parents are cleared and loose elements join the
    /// artboard they overlap most.
    #[must_use]
    pub fn new(mut scene: Scene, config: EditorConfig) -> Self {
        scene.sanitize_parents();
        initialize_parents(scene.elements_mut());
        debug!(elements = scene.len(), "session opened");

        let history = match config.history_limit {
            Some(limit) => History::with_limit(scene, limit),
            None => History::new(scene),
        };
        Self {
            engine: InteractionEngine::new(config),
            history,
            selection: Selection::new(),
            viewport: Viewport::default(),
            gesture: None,
            clipboard: Vec::new(),
        }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        self.engine.config()
    }

    /// Scene to display: the live gesture scene, or the committed one.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        match &self.gesture {
            Some(gesture) => gesture.live(),
            None => self.history.current().as_ref(),
        }
    }

    /// Last committed scene.
    #[must_use]
    pub fn committed_scene(&self) -> &Arc<Scene> {
        self.history.current()
    }

    /// Undo/redo ledger.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Current selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replace the selection. Unknown IDs are dropped.
    pub fn set_selection(&mut self, mut selection: Selection) {
        selection.retain_existing(self.history.current());
        self.selection = selection;
    }

    /// Current pan and zoom.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Replace the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Gesture in progress, if any.
    #[must_use]
    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    fn input(&self, screen: Point, button: PointerButton, modifiers: KeyModifiers) -> PointerInput {
        PointerInput {
            world: self.viewport.screen_to_world(screen),
            screen,
            button,
            modifiers,
        }
    }

    /// Press a pointer button. Returns whether a gesture started.
    pub fn pointer_down(&mut self, screen: Point, button: PointerButton, modifiers: KeyModifiers) -> bool {
        if self.gesture.is_some() {
            self.pointer_up();
        }
        let input = self.input(screen, button, modifiers);
        let down = self
            .engine
            .pointer_down(&input, self.history.current(), &self.selection, &self.viewport);
        if let Some(selection) = down.selection {
            self.selection = selection;
        }
        self.gesture = down.gesture;
        self.gesture.is_some()
    }

    /// Move the pointer. Returns `None` when no gesture is running.
    pub fn pointer_move(&mut self, screen: Point, modifiers: KeyModifiers) -> Option<PointerMove> {
        let input = self.input(screen, PointerButton::Primary, modifiers);
        let gesture = self.gesture.as_mut()?;
        let moved = self.engine.pointer_move(&input, gesture);
        if let Some(delta) = moved.pan_delta {
            self.viewport = self.viewport.pan_by(delta);
        }
        Some(moved)
    }

    /// Release the pointer. Returns whether a scene was committed.
    pub fn pointer_up(&mut self) -> bool {
        let Some(gesture) = self.gesture.take() else {
            return false;
        };
        let up = self.engine.pointer_up(gesture);
        let committed = up.committed.is_some();
        if let Some(scene) = up.committed {
            self.history.commit(scene);
        }
        if let Some(selection) = up.selection {
            self.selection = selection;
        }
        self.selection.retain_existing(self.history.current());
        committed
    }

    /// The pointer left the canvas. Ends the gesture like a release.
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }

    /// Zoom about a screen point for one wheel event.
    pub fn wheel(&mut self, screen: Point, delta_y: f64) {
        self.viewport = self.engine.wheel(&self.viewport, screen, delta_y);
    }

    fn cancel_gesture(&mut self) {
        if let Some(gesture) = self.gesture.take() {
            debug!(kind = gesture.kind().name(), "gesture discarded");
        }
    }

    /// Step back one commit. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        let moved = self.history.undo();
        if moved {
            debug!(cursor = self.history.cursor(), "undo");
            self.selection.retain_existing(self.history.current());
        }
        moved
    }

    /// Step forward one commit. Returns whether anything changed.
    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        let moved = self.history.redo();
        if moved {
            debug!(cursor = self.history.cursor(), "redo");
            self.selection.retain_existing(self.history.current());
        }
        moved
    }

    fn commit(&mut self, scene: Scene) {
        self.cancel_gesture();
        self.history.commit(scene);
    }

    /// Delete the selected elements. Children of deleted artboards are
    /// released. Returns how many elements were removed.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        let current = self.history.current();
        let removed: HashSet<ElementId> = self.selection.elements(current).iter().map(|el| el.id).collect();
        if removed.is_empty() {
            return 0;
        }

        let kept = current
            .elements()
            .iter()
            .filter(|el| !removed.contains(&el.id))
            .map(|el| {
                let mut el = el.clone();
                if el.parent_id.is_some_and(|p| removed.contains(&p)) {
                    el.parent_id = None;
                }
                el
            })
            .collect();
        self.commit(Scene::from_elements(kept));
        self.selection.clear();
        debug!(count = removed.len(), "deleted elements");
        removed.len()
    }

    /// Copy the selected elements. An empty selection keeps the clipboard.
    /// Returns how many elements were copied.
    pub fn copy_selected(&mut self) -> usize {
        let copied: Vec<Element> = self
            .selection
            .elements(self.history.current())
            .into_iter()
            .cloned()
            .collect();
        if !copied.is_empty() {
            self.clipboard = copied;
        }
        self.clipboard.len()
    }

    /// Paste the clipboard offset by the configured distance and select the
    /// clones. Returns how many elements were pasted.
    pub fn paste(&mut self) -> usize {
        if self.clipboard.is_empty() {
            return 0;
        }
        let offset = self.config().paste_offset;
        let remap: HashMap<ElementId, ElementId> =
            self.clipboard.iter().map(|el| (el.id, ElementId::new())).collect();

        let mut scene = (**self.history.current()).clone();
        let mut pasted = Selection::new();
        for original in &self.clipboard {
            let Some(&id) = remap.get(&original.id) else {
                continue;
            };
            let parent = original.parent_id.and_then(|p| match remap.get(&p) {
                Some(cloned) => Some(*cloned),
                None => scene.contains(p).then_some(p),
            });
            scene.add_element(Element {
                id,
                x: original.x + offset,
                y: original.y + offset,
                parent_id: parent,
                ..original.clone()
            });
            pasted.insert(id);
        }

        let count = pasted.len();
        self.commit(scene);
        self.selection = pasted;
        debug!(count, "pasted elements");
        count
    }

    /// Select every visible, unlocked element.
    pub fn select_all(&mut self) {
        self.selection = self
            .history
            .current()
            .elements()
            .iter()
            .filter(|el| el.is_interactive())
            .map(|el| el.id)
            .collect();
    }

    fn reorder(&mut self, op: fn(&mut Scene, &Selection) -> bool) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        let mut scene = (**self.history.current()).clone();
        let changed = op(&mut scene, &self.selection);
        if changed {
            self.commit(scene);
        }
        changed
    }

    /// Raise the selection to the top. Returns whether the order changed.
    pub fn bring_to_front(&mut self) -> bool {
        self.reorder(Scene::bring_to_front)
    }

    /// Lower the selection to the bottom. Returns whether the order changed.
    pub fn send_to_back(&mut self) -> bool {
        self.reorder(Scene::send_to_back)
    }

    /// Raise the selection one step. Returns whether the order changed.
    pub fn bring_forward(&mut self) -> bool {
        self.reorder(Scene::bring_forward)
    }

    /// Lower the selection one step. Returns whether the order changed.
    pub fn send_backward(&mut self) -> bool {
        self.reorder(Scene::send_backward)
    }

    /// Snapshot of what to draw.
    #[must_use]
    pub fn frame(&self) -> RenderFrame {
        let scene = self.scene().clone();
        let (bounding_box, snap_guides, selection_rect, highlighted_artboard) = match &self.gesture {
            Some(gesture) => (
                gesture.live_box().or_else(|| selection_box(&scene, &self.selection)),
                gesture.snap_guides().to_vec(),
                gesture.selection_rect(),
                gesture.highlighted_artboard(),
            ),
            None => (selection_box(&scene, &self.selection), Vec::new(), None, None),
        };
        RenderFrame {
            bounding_box,
            snap_guides,
            selection_rect,
            highlighted_artboard,
            selection: self.selection.clone(),
            viewport: self.viewport,
            scene,
        }
    }
}
