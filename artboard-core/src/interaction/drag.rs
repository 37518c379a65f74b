//! Dragging elements, with snapping, artboard children and duplication.

use std::collections::{HashMap, HashSet};

use super::gesture::{DragState, GestureKind};
use super::{changed, DownContext, PointerDown, PointerUp, Tick};
use crate::artboard::{artboard_highlight, settle_association};
use crate::config::EditorConfig;
use crate::element::{Element, ElementId};
use crate::event::{PointerButton, PointerInput};
use crate::geometry::{point_in_box, BoundingBox, Point};
use crate::scene::Scene;
use crate::selection::{selection_box, Selection};
use crate::snapping::{effective_tolerance, find_snap_adjustments};
use crate::transform::translate;

pub(crate) fn try_start(ctx: &DownContext<'_>) -> Option<PointerDown> {
    if ctx.input.button != PointerButton::Primary {
        return None;
    }
    let scene = ctx.scene.as_ref();
    let world = ctx.input.world;
    let clicked = scene.element_at(world);
    let current_box = selection_box(scene, ctx.selection);
    let inside_box = current_box.is_some_and(|b| point_in_box(world, &b));

    if clicked.is_none() && !inside_box {
        return None;
    }

    if let (Some(id), true) = (clicked, ctx.input.modifiers.constrain()) {
        let mut toggled = ctx.selection.clone();
        toggled.toggle(id);
        return Some(PointerDown {
            gesture: None,
            selection: Some(toggled),
        });
    }

    let new_pick = clicked.filter(|id| !ctx.selection.contains(*id));
    let (selection, start_box) = match new_pick {
        Some(id) => {
            let single = Selection::single(id);
            let frame = scene.get_element(id).and_then(BoundingBox::from_element);
            (single, frame)
        }
        None => (ctx.selection.clone(), current_box),
    };

    let dragged: Vec<&Element> = selection
        .elements(scene)
        .into_iter()
        .filter(|el| !el.locked)
        .collect();
    if dragged.is_empty() {
        return None;
    }

    let primary = clicked
        .filter(|id| dragged.iter().any(|el| el.id == *id))
        .unwrap_or(dragged[0].id);
    let dragged_ids: Vec<ElementId> = dragged.iter().map(|el| el.id).collect();

    // Artboards carry their children along.
    let boards: HashSet<ElementId> = dragged
        .iter()
        .filter(|el| el.is_artboard())
        .map(|el| el.id)
        .collect();
    let start_elements: Vec<Element> = scene
        .elements()
        .iter()
        .filter(|el| {
            dragged_ids.contains(&el.id)
                || (!el.locked && el.parent_id.is_some_and(|p| boards.contains(&p)))
        })
        .cloned()
        .collect();

    let reparented = start_elements
        .iter()
        .filter(|el| !el.is_artboard())
        .map(|el| el.id)
        .collect();

    let state = DragState {
        start_elements,
        dragged: dragged_ids,
        primary,
        reparented,
        start_box,
        duplicate: ctx.input.modifiers.duplicate(),
    };

    Some(ctx.claim(
        GestureKind::Dragging(state),
        start_box,
        new_pick.map(|_| selection),
    ))
}

pub(crate) fn update(
    config: &EditorConfig,
    input: &PointerInput,
    state: &DragState,
    live: &mut Scene,
    start: &Scene,
    scale: f64,
    start_world: Point,
) -> Tick {
    let mut dx = input.world.x - start_world.x;
    let mut dy = input.world.y - start_world.y;

    let mut snap_guides = Vec::new();
    let tolerance = effective_tolerance(&config.snap, &input.modifiers);
    if let Some(primary) = state.start_elements.iter().find(|el| el.id == state.primary) {
        let mut ideal = primary.clone();
        ideal.x += dx;
        ideal.y += dy;

        let moving: HashSet<ElementId> = state.start_elements.iter().map(|el| el.id).collect();
        let statics = live
            .elements()
            .iter()
            .filter(|el| el.visible && !moving.contains(&el.id));
        let snap = find_snap_adjustments(&ideal, statics, scale, tolerance);
        dx += snap.offset.x;
        dy += snap.offset.y;
        snap_guides = snap.guides;
    }

    translate(live.elements_mut(), &state.start_elements, dx, dy);
    settle_association(live.elements_mut(), start.elements(), &state.reparented, config.association_threshold);

    let primary = state.reparented.contains(&state.primary).then_some(state.primary);
    Tick {
        live_box: state.start_box.map(|b| b.translated(dx, dy)),
        snap_guides,
        highlighted_artboard: artboard_highlight(primary, live.elements(), config.association_threshold),
    }
}

/// Commit the drag, appending clones at the start position when the
/// duplicate modifier was held at pointer-down.
pub(crate) fn finish(state: DragState, mut live: Scene, start: &Scene) -> PointerUp {
    if !state.duplicate || live == *start {
        return PointerUp {
            committed: changed(live, start),
            selection: None,
        };
    }

    let remap: HashMap<ElementId, ElementId> = state
        .start_elements
        .iter()
        .map(|el| (el.id, ElementId::new()))
        .collect();

    let mut clone_selection = Selection::new();
    for original in &state.start_elements {
        let Some(&new_id) = remap.get(&original.id) else {
            continue;
        };
        let mut copy = original.clone();
        copy.id = new_id;
        copy.parent_id = original.parent_id.map(|p| remap.get(&p).copied().unwrap_or(p));
        if state.dragged.contains(&original.id) {
            clone_selection.insert(new_id);
        }
        live.add_element(copy);
    }

    tracing::debug!(clones = remap.len(), "duplicated on drag");
    PointerUp {
        committed: Some(live),
        selection: Some(clone_selection),
    }
}
