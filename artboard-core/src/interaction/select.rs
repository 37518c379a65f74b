//! Marquee selection, the fallback gesture.

use super::gesture::{GestureKind, SelectState};
use super::{DownContext, PointerDown, PointerUp};
use crate::event::{PointerButton, PointerInput};
use crate::geometry::{element_intersects_rect, BoundingBox};
use crate::scene::Scene;
use crate::selection::Selection;

pub(crate) fn try_start(ctx: &DownContext<'_>) -> Option<PointerDown> {
    if ctx.input.button != PointerButton::Primary {
        return None;
    }
    let origin = ctx.input.world;
    let state = SelectState {
        rect: BoundingBox::new(origin.x, origin.y, 0.0, 0.0),
    };
    Some(ctx.claim(GestureKind::Selecting(state), None, Some(Selection::new())))
}

pub(crate) fn update(input: &PointerInput, state: &mut SelectState) {
    state.rect.width = input.world.x - state.rect.x;
    state.rect.height = input.world.y - state.rect.y;
}

/// Select every visible, unlocked element touched by the marquee.
pub(crate) fn finish(state: &SelectState, scene: &Scene) -> PointerUp {
    let picked: Selection = scene
        .elements()
        .iter()
        .filter(|el| el.is_interactive() && element_intersects_rect(el, &state.rect))
        .map(|el| el.id)
        .collect();
    PointerUp {
        committed: None,
        selection: Some(picked),
    }
}
