//! Resize and rotation through the selection frame's handles.

use std::collections::HashSet;

use super::gesture::{GestureKind, ResizeState, RotateState, TransformTarget};
use super::{DownContext, PointerDown, Tick};
use crate::artboard::settle_association;
use crate::config::EditorConfig;
use crate::element::{Element, ElementId};
use crate::event::{PointerButton, PointerInput};
use crate::geometry::{center, BoundingBox, Point, ANGLE_EPSILON};
use crate::handles::handle_at_point;
use crate::scene::Scene;
use crate::selection::frame_around;
use crate::snapping::{effective_tolerance, snap_point, SnapGuide};
use crate::transform::{
    resize_frame, resize_group, resize_single, rotate_group, rotate_single, snap_angle, InitialGroupState,
    ResizeOptions,
};

pub(crate) fn try_start(ctx: &DownContext<'_>) -> Option<PointerDown> {
    if ctx.input.button != PointerButton::Primary || ctx.selection.is_empty() {
        return None;
    }
    let scene = ctx.scene.as_ref();
    let selected: Vec<&Element> = ctx
        .selection
        .elements(scene)
        .into_iter()
        .filter(|el| !el.locked)
        .collect();

    // A lone artboard has its own axis-aligned resize and never rotates.
    match selected.as_slice() {
        [] => return None,
        [only] if only.is_artboard() => return None,
        _ => {}
    }

    // Locked members stay put, so the handles frame only what will move.
    let frame = frame_around(&selected)?;
    let world = ctx.input.world;
    let handle = handle_at_point(world, &frame, ctx.scale, &ctx.config.handles, true)?;

    let target = match selected.as_slice() {
        [only] => TransformTarget::Single {
            start: (*only).clone(),
            start_angle: center(only).angle_to(world),
        },
        _ => {
            let elements = selected.iter().map(|el| (*el).clone()).collect();
            TransformTarget::Group(InitialGroupState::capture(elements, frame, handle.pivot, world))
        }
    };

    let kind = if handle.kind.is_rotation() {
        GestureKind::Rotating(RotateState { target })
    } else {
        GestureKind::Resizing(ResizeState {
            handle: handle.kind,
            pivot: handle.pivot,
            target,
        })
    };
    Some(ctx.claim(kind, Some(frame), None))
}

fn replace(live: &mut Scene, element: Element) {
    if let Some(slot) = live.get_element_mut(element.id) {
        *slot = element;
    }
}

/// Snap the resize pointer for an unrotated element.
fn snapped_pointer(
    config: &EditorConfig,
    input: &PointerInput,
    live: &Scene,
    exclude: &HashSet<ElementId>,
    scale: f64,
) -> (Point, Vec<SnapGuide>) {
    let tolerance = effective_tolerance(&config.snap, &input.modifiers);
    let statics = live
        .elements()
        .iter()
        .filter(|el| el.visible && !exclude.contains(&el.id));
    let snap = snap_point(input.world, statics, scale, tolerance);
    (input.world + snap.offset, snap.guides)
}

pub(crate) fn update_resize(
    config: &EditorConfig,
    input: &PointerInput,
    state: &ResizeState,
    live: &mut Scene,
    start_scene: &Scene,
    scale: f64,
) -> Tick {
    let options = ResizeOptions {
        lock_aspect: input.modifiers.constrain(),
        from_center: input.modifiers.alternate(),
    };
    let ids = state.target.ids();

    let mut tick = Tick::default();
    match &state.target {
        TransformTarget::Single { start, .. } => {
            let mut pointer = input.world;
            if start.rotation.abs() < ANGLE_EPSILON {
                let (snapped, guides) = snapped_pointer(config, input, live, &ids, scale);
                pointer = snapped;
                tick.snap_guides = guides;
            }
            let resized = resize_single(start, state.pivot, pointer, state.handle, options);
            tick.live_box = BoundingBox::from_element(&resized);
            replace(live, resized);
        }
        TransformTarget::Group(initial) => {
            if let Some(frame) = resize_frame(&initial.bounding_box, initial.pivot, input.world, state.handle, options) {
                resize_group(live.elements_mut(), &frame, initial);
                tick.live_box = Some(frame);
            }
        }
    }

    settle_association(live.elements_mut(), start_scene.elements(), &ids, config.association_threshold);
    tick
}

pub(crate) fn update_rotate(
    config: &EditorConfig,
    input: &PointerInput,
    state: &RotateState,
    live: &mut Scene,
    start_scene: &Scene,
) -> Tick {
    let step = input.modifiers.constrain().then(|| config.rotation_step());
    let ids = state.target.ids();

    let live_box = match &state.target {
        TransformTarget::Single { start, start_angle } => {
            let rotated = rotate_single(start, center(start), *start_angle, input.world, step);
            let frame = BoundingBox::from_element(&rotated);
            replace(live, rotated);
            frame
        }
        TransformTarget::Group(initial) => {
            let pivot = initial.bounding_box.center();
            let raw = initial.rotation + pivot.angle_to(input.world) - initial.start_angle;
            let angle = step.map_or(raw, |s| snap_angle(raw, s));
            Some(rotate_group(live.elements_mut(), pivot, angle, initial))
        }
    };

    settle_association(live.elements_mut(), start_scene.elements(), &ids, config.association_threshold);
    Tick {
        live_box,
        ..Tick::default()
    }
}
