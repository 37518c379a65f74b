//! Axis-aligned resize of a single selected artboard.

use std::collections::HashSet;

use super::gesture::{ArtboardResizeState, GestureKind};
use super::{DownContext, PointerDown, Tick};
use crate::artboard::{resize_artboard, settle_association};
use crate::config::EditorConfig;
use crate::event::{PointerButton, PointerInput};
use crate::geometry::BoundingBox;
use crate::handles::handle_at_point;
use crate::scene::Scene;
use crate::transform::ResizeOptions;

pub(crate) fn try_start(ctx: &DownContext<'_>) -> Option<PointerDown> {
    if ctx.input.button != PointerButton::Primary || ctx.selection.len() != 1 {
        return None;
    }
    let selected = ctx.selection.elements(ctx.scene);
    let [board] = selected.as_slice() else {
        return None;
    };
    if !board.is_artboard() || board.locked {
        return None;
    }

    let frame = BoundingBox::from_element(board)?;
    let handle = handle_at_point(ctx.input.world, &frame, ctx.scale, &ctx.config.handles, false)?;
    let state = ArtboardResizeState {
        start: (*board).clone(),
        handle: handle.kind,
    };
    Some(ctx.claim(GestureKind::ResizingArtboard(state), Some(frame), None))
}

pub(crate) fn update(
    config: &EditorConfig,
    input: &PointerInput,
    state: &ArtboardResizeState,
    live: &mut Scene,
    start: &Scene,
) -> Tick {
    let options = ResizeOptions {
        lock_aspect: input.modifiers.constrain(),
        from_center: input.modifiers.alternate(),
    };
    let resized = resize_artboard(&state.start, input.world, state.handle, options, config.artboard_min_size);
    let live_box = BoundingBox::from_element(&resized);
    if let Some(slot) = live.get_element_mut(resized.id) {
        *slot = resized;
    }

    // Elements whose overlap with the board changed may enter or leave it.
    let others: HashSet<_> = live
        .elements()
        .iter()
        .filter(|el| !el.is_artboard())
        .map(|el| el.id)
        .collect();
    settle_association(live.elements_mut(), start.elements(), &others, config.association_threshold);

    Tick {
        live_box,
        ..Tick::default()
    }
}
