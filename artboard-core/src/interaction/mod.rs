//! Pointer gesture state machine.
//!
//! ```text
//!            pointer_down                pointer_move*            pointer_up
//!   idle ──────────────────▶ Gesture ───────────────────▶ Gesture ──────────▶ idle
//!          first starter                handler mutates              commit if
//!          that claims:                 gesture.live                 live != start
//!          1. artboard resize
//!          2. pan (middle button)
//!          3. transform handle
//!          4. drag
//!          5. marquee
//! ```
//!
//! The engine owns no document state. The caller passes the committed scene
//! and selection in and applies whatever comes back.

mod artboard_resize;
mod drag;
pub mod gesture;
mod pan;
mod select;
mod transform;

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::EditorConfig;
use crate::element::ElementId;
use crate::event::PointerInput;
use crate::geometry::{BoundingBox, Point};
use crate::scene::Scene;
use crate::selection::Selection;
use crate::snapping::SnapGuide;
use crate::viewport::Viewport;

pub use gesture::{Gesture, GestureKind, TransformTarget};

/// Result of a pointer-down.
#[derive(Debug, Clone, Default)]
pub struct PointerDown {
    /// The gesture that claimed the pointer, if any.
    pub gesture: Option<Gesture>,
    /// Replacement selection, when the click changed it.
    pub selection: Option<Selection>,
}

/// Result of a pointer-move.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerMove {
    /// Screen-space pan to apply to the viewport.
    pub pan_delta: Option<Point>,
    /// Selection frame to draw.
    pub live_box: Option<BoundingBox>,
    /// Snap guides to draw.
    pub snap_guides: Vec<SnapGuide>,
    /// Marquee rectangle to draw.
    pub selection_rect: Option<BoundingBox>,
    /// Artboard to highlight as the drop target.
    pub highlighted_artboard: Option<ElementId>,
}

/// Result of a pointer-up or pointer-leave.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerUp {
    /// Scene to commit to history. `None` means no net change.
    pub committed: Option<Scene>,
    /// Replacement selection.
    pub selection: Option<Selection>,
}

/// Inputs shared by every gesture starter.
pub(crate) struct DownContext<'a> {
    pub input: &'a PointerInput,
    pub scene: &'a Arc<Scene>,
    pub selection: &'a Selection,
    pub scale: f64,
    pub config: &'a EditorConfig,
}

impl DownContext<'_> {
    fn gesture(&self, kind: GestureKind) -> Gesture {
        Gesture::new(kind, self.scene, self.input.modifiers, self.scale, self.input.world)
    }

    fn claim(&self, kind: GestureKind, live_box: Option<BoundingBox>, selection: Option<Selection>) -> PointerDown {
        PointerDown {
            gesture: Some(self.gesture(kind).with_live_box(live_box)),
            selection,
        }
    }
}

/// What a handler produced for one move.
#[derive(Debug, Default)]
pub(crate) struct Tick {
    /// New selection frame, `None` keeps the previous one.
    pub live_box: Option<BoundingBox>,
    pub snap_guides: Vec<SnapGuide>,
    pub highlighted_artboard: Option<ElementId>,
}

/// Turns pointer events into gestures and gestures into scene edits.
#[derive(Debug, Clone, Default)]
pub struct InteractionEngine {
    config: EditorConfig,
}

impl InteractionEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: EditorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Start a gesture. Starters are tried in priority order.
    #[must_use]
    pub fn pointer_down(
        &self,
        input: &PointerInput,
        scene: &Arc<Scene>,
        selection: &Selection,
        viewport: &Viewport,
    ) -> PointerDown {
        let ctx = DownContext {
            input,
            scene,
            selection,
            scale: viewport.scale,
            config: &self.config,
        };

        let down = artboard_resize::try_start(&ctx)
            .or_else(|| pan::try_start(&ctx))
            .or_else(|| transform::try_start(&ctx))
            .or_else(|| drag::try_start(&ctx))
            .or_else(|| select::try_start(&ctx))
            .unwrap_or_default();

        match &down.gesture {
            Some(gesture) => debug!(
                kind = gesture.kind().name(),
                selected = selection.len(),
                x = input.world.x,
                y = input.world.y,
                "gesture started"
            ),
            None => debug!(selection_changed = down.selection.is_some(), "pointer down without gesture"),
        }
        down
    }

    /// Advance a gesture. Only the gesture's live scene changes.
    pub fn pointer_move(&self, input: &PointerInput, gesture: &mut Gesture) -> PointerMove {
        let tick = match &mut gesture.kind {
            GestureKind::Panning(state) => {
                return PointerMove {
                    pan_delta: Some(pan::update(input, state)),
                    ..PointerMove::default()
                };
            }
            GestureKind::Selecting(state) => {
                select::update(input, state);
                return PointerMove {
                    selection_rect: Some(state.rect()),
                    ..PointerMove::default()
                };
            }
            GestureKind::Dragging(state) => drag::update(
                &self.config,
                input,
                state,
                &mut gesture.live,
                &gesture.start_scene,
                gesture.scale,
                gesture.start_world,
            ),
            GestureKind::Resizing(state) => transform::update_resize(
                &self.config,
                input,
                state,
                &mut gesture.live,
                &gesture.start_scene,
                gesture.scale,
            ),
            GestureKind::Rotating(state) => {
                transform::update_rotate(&self.config, input, state, &mut gesture.live, &gesture.start_scene)
            }
            GestureKind::ResizingArtboard(state) => {
                artboard_resize::update(&self.config, input, state, &mut gesture.live, &gesture.start_scene)
            }
        };

        if tick.live_box.is_some() {
            gesture.live_box = tick.live_box;
        }
        gesture.snap_guides = tick.snap_guides;
        gesture.highlighted_artboard = tick.highlighted_artboard;
        trace!(
            kind = gesture.kind.name(),
            x = input.world.x,
            y = input.world.y,
            guides = gesture.snap_guides.len(),
            "gesture tick"
        );

        PointerMove {
            pan_delta: None,
            live_box: gesture.live_box,
            snap_guides: gesture.snap_guides.clone(),
            selection_rect: None,
            highlighted_artboard: gesture.highlighted_artboard,
        }
    }

    /// Finish a gesture. Pointer-leave ends a gesture the same way.
    #[must_use]
    pub fn pointer_up(&self, gesture: Gesture) -> PointerUp {
        let Gesture {
            kind,
            start_scene,
            live,
            ..
        } = gesture;
        let name = kind.name();

        let up = match kind {
            GestureKind::Selecting(state) => select::finish(&state, &start_scene),
            GestureKind::Dragging(state) => drag::finish(state, live, &start_scene),
            kind if kind.is_mutating() => PointerUp {
                committed: changed(live, &start_scene),
                selection: None,
            },
            _ => PointerUp::default(),
        };

        debug!(kind = name, committed = up.committed.is_some(), "gesture finished");
        up
    }

    /// Zoom about the cursor for one wheel event.
    #[must_use]
    pub fn wheel(&self, viewport: &Viewport, screen: Point, delta_y: f64) -> Viewport {
        viewport.wheel_zoom(screen, delta_y, &self.config.zoom)
    }
}

/// The live scene when it differs from where the gesture started.
pub(crate) fn changed(live: Scene, start: &Scene) -> Option<Scene> {
    (live != *start).then_some(live)
}
