//! Replay script steps.
//!
//! A script is a JSON array of steps tagged by `"action"`. Coordinates are
//! screen pixels, mapped through the session viewport like real input.
//!
//! ```json
//! [
//!   { "action": "down", "x": 20, "y": 20 },
//!   { "action": "move", "x": 30, "y": 20, "modifiers": { "ctrl": true } },
//!   { "action": "up" },
//!   { "action": "undo" }
//! ]
//! ```

use artboard_core::{EditorSession, KeyModifiers, Point, PointerButton};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One scripted host event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Step {
    /// Press a pointer button.
    Down {
        /// Screen x.
        x: f64,
        /// Screen y.
        y: f64,
        /// Button pressed.
        #[serde(default)]
        button: PointerButton,
        /// Modifiers held.
        #[serde(default)]
        modifiers: KeyModifiers,
    },
    /// Move the pointer.
    Move {
        /// Screen x.
        x: f64,
        /// Screen y.
        y: f64,
        /// Modifiers held.
        #[serde(default)]
        modifiers: KeyModifiers,
    },
    /// Release the pointer.
    Up,
    /// Pointer left the canvas.
    Leave,
    /// One wheel event.
    Wheel {
        /// Screen x.
        x: f64,
        /// Screen y.
        y: f64,
        /// Wheel delta, negative zooms in.
        #[serde(rename = "deltaY")]
        delta_y: f64,
    },
    /// Undo one commit.
    Undo,
    /// Redo one commit.
    Redo,
    /// Delete the selection.
    Delete,
    /// Copy the selection.
    Copy,
    /// Paste the clipboard.
    Paste,
    /// Select everything interactive.
    SelectAll,
    /// Raise the selection to the top.
    BringToFront,
    /// Lower the selection to the bottom.
    SendToBack,
    /// Raise the selection one step.
    BringForward,
    /// Lower the selection one step.
    SendBackward,
}

impl Step {
    /// Action name as written in scripts.
    #[must_use]
    pub const fn action(&self) -> &'static str {
        match self {
            Self::Down { .. } => "down",
            Self::Move { .. } => "move",
            Self::Up => "up",
            Self::Leave => "leave",
            Self::Wheel { .. } => "wheel",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Delete => "delete",
            Self::Copy => "copy",
            Self::Paste => "paste",
            Self::SelectAll => "selectAll",
            Self::BringToFront => "bringToFront",
            Self::SendToBack => "sendToBack",
            Self::BringForward => "bringForward",
            Self::SendBackward => "sendBackward",
        }
    }

    /// Feed this step to a session.
    pub fn apply(&self, session: &mut EditorSession) {
        trace!(action = self.action(), "replay step");
        match *self {
            Self::Down { x, y, button, modifiers } => {
                session.pointer_down(Point::new(x, y), button, modifiers);
            }
            Self::Move { x, y, modifiers } => {
                session.pointer_move(Point::new(x, y), modifiers);
            }
            Self::Up => {
                session.pointer_up();
            }
            Self::Leave => {
                session.pointer_leave();
            }
            Self::Wheel { x, y, delta_y } => session.wheel(Point::new(x, y), delta_y),
            Self::Undo => {
                session.undo();
            }
            Self::Redo => {
                session.redo();
            }
            Self::Delete => {
                session.delete_selected();
            }
            Self::Copy => {
                session.copy_selected();
            }
            Self::Paste => {
                session.paste();
            }
            Self::SelectAll => session.select_all(),
            Self::BringToFront => {
                session.bring_to_front();
            }
            Self::SendToBack => {
                session.send_to_back();
            }
            Self::BringForward => {
                session.bring_forward();
            }
            Self::SendBackward => {
                session.send_backward();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_with_defaults() {
        let json = r#"[
            {"action": "down", "x": 1, "y": 2},
            {"action": "move", "x": 3, "y": 4, "modifiers": {"shift": true}},
            {"action": "up"},
            {"action": "wheel", "x": 0, "y": 0, "deltaY": -120},
            {"action": "selectAll"},
            {"action": "bringToFront"}
        ]"#;
        let steps: Vec<Step> = serde_json::from_str(json).expect("valid script");
        assert_eq!(steps.len(), 6);
        assert_eq!(
            steps[0],
            Step::Down {
                x: 1.0,
                y: 2.0,
                button: PointerButton::Primary,
                modifiers: KeyModifiers::none(),
            }
        );
        assert_eq!(
            steps[1],
            Step::Move {
                x: 3.0,
                y: 4.0,
                modifiers: KeyModifiers::shift(),
            }
        );
        assert_eq!(steps[3].action(), "wheel");
        assert_eq!(steps[4], Step::SelectAll);
    }

    #[test]
    fn test_middle_button_parses() {
        let step: Step = serde_json::from_str(r#"{"action": "down", "x": 0, "y": 0, "button": "middle"}"#)
            .expect("valid step");
        assert!(matches!(step, Step::Down { button: PointerButton::Middle, .. }));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let parsed: Result<Step, _> = serde_json::from_str(r#"{"action": "explode"}"#);
        assert!(parsed.is_err());
    }
}
