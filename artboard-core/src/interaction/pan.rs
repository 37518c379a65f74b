//! Middle-button panning.

use super::gesture::{GestureKind, PanState};
use super::{DownContext, PointerDown};
use crate::event::{PointerButton, PointerInput};
use crate::geometry::Point;

pub(crate) fn try_start(ctx: &DownContext<'_>) -> Option<PointerDown> {
    if ctx.input.button != PointerButton::Middle {
        return None;
    }
    let state = PanState {
        last_screen: ctx.input.screen,
    };
    Some(ctx.claim(GestureKind::Panning(state), None, None))
}

/// Screen delta since the previous pointer position.
pub(crate) fn update(input: &PointerInput, state: &mut PanState) -> Point {
    let delta = input.screen - state.last_screen;
    state.last_screen = input.screen;
    delta
}
