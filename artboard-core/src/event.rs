//! Pointer input for scene interaction.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Which pointer button is pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    /// Left button, pen tip or single touch.
    #[default]
    Primary,
    /// Wheel button. Pans the viewport.
    Middle,
    /// Right button.
    Secondary,
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyModifiers {
    /// Shift key.
    pub shift: bool,
    /// Control key.
    pub ctrl: bool,
    /// Alt / Option key.
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl KeyModifiers {
    /// No modifiers held.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
        }
    }

    /// Only shift held.
    #[must_use]
    pub const fn shift() -> Self {
        Self {
            shift: true,
            ..Self::none()
        }
    }

    /// Only control held.
    #[must_use]
    pub const fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::none()
        }
    }

    /// Only alt held.
    #[must_use]
    pub const fn alt() -> Self {
        Self {
            alt: true,
            ..Self::none()
        }
    }

    /// Lock aspect ratio, snap rotation to steps, widen snapping, toggle selection.
    #[must_use]
    pub const fn constrain(&self) -> bool {
        self.shift
    }

    /// Resize from center and move without snapping.
    #[must_use]
    pub const fn alternate(&self) -> bool {
        self.ctrl || self.meta
    }

    /// Duplicate on drag.
    #[must_use]
    pub const fn duplicate(&self) -> bool {
        self.alt
    }
}

/// A pointer event, already mapped into world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// Position in world coordinates.
    pub world: Point,
    /// Position in screen coordinates.
    pub screen: Point,
    /// Button involved.
    pub button: PointerButton,
    /// Modifiers held.
    pub modifiers: KeyModifiers,
}

impl PointerInput {
    /// Primary-button input where world and screen coincide (unit viewport).
    #[must_use]
    pub const fn at(x: f64, y: f64) -> Self {
        Self {
            world: Point::new(x, y),
            screen: Point::new(x, y),
            button: PointerButton::Primary,
            modifiers: KeyModifiers::none(),
        }
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    /// Set the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_semantics() {
        let none = KeyModifiers::none();
        assert!(!none.constrain() && !none.alternate() && !none.duplicate());

        assert!(KeyModifiers::shift().constrain());
        assert!(KeyModifiers::ctrl().alternate());
        let meta = KeyModifiers {
            meta: true,
            ..KeyModifiers::none()
        };
        assert!(meta.alternate());
        assert!(KeyModifiers::alt().duplicate());
    }

    #[test]
    fn test_pointer_input_builder() {
        let input = PointerInput::at(3.0, 4.0)
            .with_button(PointerButton::Middle)
            .with_modifiers(KeyModifiers::shift());
        assert_eq!(input.world, Point::new(3.0, 4.0));
        assert_eq!(input.button, PointerButton::Middle);
        assert!(input.modifiers.shift);
    }

    #[test]
    fn test_modifiers_deserialize_partial() {
        let mods: KeyModifiers = serde_json::from_str(r#"{ "shift": true }"#).expect("should parse");
        assert_eq!(mods, KeyModifiers::shift());
    }
}
