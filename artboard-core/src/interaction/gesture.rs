//! Gesture state threaded through pointer down, move and up.

use std::collections::HashSet;
use std::sync::Arc;

use crate::element::{Element, ElementId};
use crate::event::KeyModifiers;
use crate::geometry::{BoundingBox, Point};
use crate::handles::HandleKind;
use crate::scene::Scene;
use crate::snapping::SnapGuide;
use crate::transform::InitialGroupState;

/// Viewport panning with the middle button.
#[derive(Debug, Clone, PartialEq)]
pub struct PanState {
    pub(crate) last_screen: Point,
}

/// Marquee selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectState {
    pub(crate) rect: BoundingBox,
}

impl SelectState {
    /// Current marquee rectangle. Width and height may be negative.
    #[must_use]
    pub fn rect(&self) -> BoundingBox {
        self.rect
    }
}

/// Moving elements.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// Elements being moved as captured at pointer-down, including the
    /// children of dragged artboards.
    pub(crate) start_elements: Vec<Element>,
    /// Elements the user picked; the rest came along as artboard children.
    pub(crate) dragged: Vec<ElementId>,
    /// Element that snaps and drives the artboard highlight.
    pub(crate) primary: ElementId,
    /// Non-artboard members whose parents are recomputed each tick.
    pub(crate) reparented: HashSet<ElementId>,
    /// Selection frame at pointer-down.
    pub(crate) start_box: Option<BoundingBox>,
    /// Duplicate modifier latched at pointer-down.
    pub(crate) duplicate: bool,
}

/// What a resize or rotation applies to.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformTarget {
    /// One element.
    Single {
        /// The element at pointer-down.
        start: Element,
        /// Pointer angle about the element center at pointer-down.
        start_angle: f64,
    },
    /// A multi-selection.
    Group(InitialGroupState),
}

impl TransformTarget {
    pub(crate) fn ids(&self) -> HashSet<ElementId> {
        match self {
            Self::Single { start, .. } => [start.id].into_iter().collect(),
            Self::Group(initial) => initial.elements.iter().map(|el| el.id).collect(),
        }
    }
}

/// Resizing through a handle of the selection frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub(crate) handle: HandleKind,
    pub(crate) pivot: Point,
    pub(crate) target: TransformTarget,
}

/// Rotating through the rotation knob.
#[derive(Debug, Clone, PartialEq)]
pub struct RotateState {
    pub(crate) target: TransformTarget,
}

/// Resizing a single selected artboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtboardResizeState {
    pub(crate) start: Element,
    pub(crate) handle: HandleKind,
}

/// Kind of gesture in progress, with its anchors.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureKind {
    /// Middle-button pan.
    Panning(PanState),
    /// Marquee selection.
    Selecting(SelectState),
    /// Moving elements.
    Dragging(DragState),
    /// Resizing an element or group.
    Resizing(ResizeState),
    /// Rotating an element or group.
    Rotating(RotateState),
    /// Resizing an artboard.
    ResizingArtboard(ArtboardResizeState),
}

impl GestureKind {
    /// Short name for logs and hosts.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Panning(_) => "panning",
            Self::Selecting(_) => "selecting",
            Self::Dragging(_) => "dragging",
            Self::Resizing(_) => "resizing",
            Self::Rotating(_) => "rotating",
            Self::ResizingArtboard(_) => "resizing-artboard",
        }
    }

    /// Whether this gesture can change the scene.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Self::Panning(_) | Self::Selecting(_))
    }
}

/// One pointer-down to pointer-up cycle.
///
/// Only the live scene changes while the gesture runs; the start scene is
/// the committed snapshot it began from.
#[derive(Debug, Clone)]
pub struct Gesture {
    pub(crate) kind: GestureKind,
    pub(crate) start_scene: Arc<Scene>,
    pub(crate) live: Scene,
    pub(crate) live_box: Option<BoundingBox>,
    pub(crate) snap_guides: Vec<SnapGuide>,
    pub(crate) highlighted_artboard: Option<ElementId>,
    pub(crate) modifiers: KeyModifiers,
    pub(crate) scale: f64,
    pub(crate) start_world: Point,
}

impl Gesture {
    pub(crate) fn new(kind: GestureKind, start_scene: &Arc<Scene>, modifiers: KeyModifiers, scale: f64, start_world: Point) -> Self {
        Self {
            kind,
            live: (**start_scene).clone(),
            start_scene: Arc::clone(start_scene),
            live_box: None,
            snap_guides: Vec::new(),
            highlighted_artboard: None,
            modifiers,
            scale,
            start_world,
        }
    }

    pub(crate) fn with_live_box(mut self, live_box: Option<BoundingBox>) -> Self {
        self.live_box = live_box;
        self
    }

    /// Gesture kind and anchors.
    #[must_use]
    pub fn kind(&self) -> &GestureKind {
        &self.kind
    }

    /// Scene the gesture started from.
    #[must_use]
    pub fn start_scene(&self) -> &Arc<Scene> {
        &self.start_scene
    }

    /// In-progress scene.
    #[must_use]
    pub fn live(&self) -> &Scene {
        &self.live
    }

    /// Selection frame to draw while the gesture runs.
    #[must_use]
    pub fn live_box(&self) -> Option<BoundingBox> {
        self.live_box
    }

    /// Active snap guides.
    #[must_use]
    pub fn snap_guides(&self) -> &[SnapGuide] {
        &self.snap_guides
    }

    /// Artboard under the dragged element.
    #[must_use]
    pub fn highlighted_artboard(&self) -> Option<ElementId> {
        self.highlighted_artboard
    }

    /// Marquee rectangle while selecting.
    #[must_use]
    pub fn selection_rect(&self) -> Option<BoundingBox> {
        match &self.kind {
            GestureKind::Selecting(state) => Some(state.rect),
            _ => None,
        }
    }

    /// Modifiers held at pointer-down.
    #[must_use]
    pub fn modifiers(&self) -> KeyModifiers {
        self.modifiers
    }

    /// Zoom scale at pointer-down.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// World position of pointer-down.
    #[must_use]
    pub fn start_world(&self) -> Point {
        self.start_world
    }
}
