//! Scene elements - shapes, rich text and artboards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(Uuid);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Parse an ID from its string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid UUID.
    pub fn parse(value: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(value).map(Self)
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ElementId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

const DEFAULT_FILL: &str = "#000000";
const DEFAULT_ARTBOARD_BACKGROUND: &str = "#FFFFFF";

fn default_fill() -> String {
    DEFAULT_FILL.to_string()
}

fn default_background() -> String {
    DEFAULT_ARTBOARD_BACKGROUND.to_string()
}

/// Horizontal alignment of a text block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    Left,
    /// Centered within the text box.
    Center,
    /// Flush right.
    Right,
}

/// Block-level text style, the defaults every span inherits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    /// Font family name.
    pub font_family: String,
    /// CSS-like font weight (`normal`, `bold`, ...).
    pub font_weight: String,
    /// CSS-like font style (`normal`, `italic`).
    pub font_style: String,
    /// Horizontal alignment.
    pub text_align: TextAlign,
    /// Extra spacing between glyphs in pixels.
    pub letter_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_family: "Arial".to_string(),
            font_weight: "normal".to_string(),
            font_style: "normal".to_string(),
            text_align: TextAlign::Left,
            letter_spacing: 0.0,
        }
    }
}

/// Per-span style overrides. Absent fields inherit from [`TextStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpanStyle {
    /// Fill color override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Font size override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Font family override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Font weight override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// Font style override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text of the run.
    pub text: String,
    /// Style overrides for the run.
    #[serde(default, rename = "styles")]
    pub style: SpanStyle,
}

impl TextSpan {
    /// Create an unstyled span.
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }
}

/// The kind of element and its type-specific geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// A filled rectangle. `x`/`y` is the top-left corner.
    Rect {
        /// Width in world units.
        width: f64,
        /// Height in world units.
        height: f64,
        /// Fill color.
        #[serde(default = "default_fill")]
        fill: String,
    },

    /// A circle or ellipse. `x`/`y` is the center.
    Circle {
        /// Uniform radius, used for any axis without an explicit radius.
        #[serde(default)]
        radius: f64,
        /// Horizontal radius override.
        #[serde(default, rename = "radiusX", skip_serializing_if = "Option::is_none")]
        radius_x: Option<f64>,
        /// Vertical radius override.
        #[serde(default, rename = "radiusY", skip_serializing_if = "Option::is_none")]
        radius_y: Option<f64>,
        /// Fill color.
        #[serde(default = "default_fill")]
        fill: String,
    },

    /// A rich text box. `x`/`y` is the top-left corner.
    Text {
        /// Box width.
        width: f64,
        /// Box height.
        height: f64,
        /// Ordered text runs.
        #[serde(default)]
        content: Vec<TextSpan>,
        /// Block-level style.
        #[serde(default)]
        style: TextStyle,
    },

    /// A container owning the elements placed mostly inside it.
    Artboard {
        /// Width in world units.
        width: f64,
        /// Height in world units.
        height: f64,
        /// Display title.
        #[serde(default)]
        title: String,
        /// Background color.
        #[serde(default = "default_background")]
        background: String,
    },

    /// Any unrecognized element type. Contributes no geometry.
    #[serde(other)]
    Unknown,
}

fn default_true() -> bool {
    true
}

/// A scene element: its kind plus the transform fields every kind shares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// Element kind and type-specific geometry.
    #[serde(flatten)]
    pub kind: ElementKind,
    /// X position (top-left, or center for circles).
    pub x: f64,
    /// Y position (top-left, or center for circles).
    pub y: f64,
    /// Rotation in radians about the element center.
    #[serde(default)]
    pub rotation: f64,
    /// Owning artboard, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    /// Whether the element is drawn and hit-testable.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Whether the element ignores pointer interaction.
    #[serde(default)]
    pub locked: bool,
}

impl Element {
    /// Create a new element of the given kind at `(x, y)`.
    #[must_use]
    pub fn new(kind: ElementKind, x: f64, y: f64) -> Self {
        Self {
            id: ElementId::new(),
            kind,
            x,
            y,
            rotation: 0.0,
            parent_id: None,
            visible: true,
            locked: false,
        }
    }

    /// Create a rectangle with its top-left corner at `(x, y)`.
    #[must_use]
    pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            ElementKind::Rect {
                width,
                height,
                fill: default_fill(),
            },
            x,
            y,
        )
    }

    /// Create a circle centered at `(cx, cy)`.
    #[must_use]
    pub fn circle(cx: f64, cy: f64, radius: f64) -> Self {
        Self::new(
            ElementKind::Circle {
                radius,
                radius_x: None,
                radius_y: None,
                fill: default_fill(),
            },
            cx,
            cy,
        )
    }

    /// Create an ellipse centered at `(cx, cy)` with independent radii.
    #[must_use]
    pub fn ellipse(cx: f64, cy: f64, radius_x: f64, radius_y: f64) -> Self {
        Self::new(
            ElementKind::Circle {
                radius: radius_x.max(radius_y),
                radius_x: Some(radius_x),
                radius_y: Some(radius_y),
                fill: default_fill(),
            },
            cx,
            cy,
        )
    }

    /// Create a single-span text box.
    #[must_use]
    pub fn text(x: f64, y: f64, width: f64, height: f64, text: impl Into<String>) -> Self {
        Self::new(
            ElementKind::Text {
                width,
                height,
                content: vec![TextSpan::plain(text)],
                style: TextStyle::default(),
            },
            x,
            y,
        )
    }

    /// Create an artboard.
    #[must_use]
    pub fn artboard(x: f64, y: f64, width: f64, height: f64, title: impl Into<String>) -> Self {
        Self::new(
            ElementKind::Artboard {
                width,
                height,
                title: title.into(),
                background: default_background(),
            },
            x,
            y,
        )
    }

    /// Set the rotation in radians.
    #[must_use]
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the owning artboard.
    #[must_use]
    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent_id = Some(parent);
        self
    }

    /// Set the fill color of a rect or circle. Other kinds are unchanged.
    #[must_use]
    pub fn with_fill(mut self, color: impl Into<String>) -> Self {
        if let ElementKind::Rect { fill, .. } | ElementKind::Circle { fill, .. } = &mut self.kind {
            *fill = color.into();
        }
        self
    }

    /// Set visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the lock flag.
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Whether this element is an artboard.
    #[must_use]
    pub fn is_artboard(&self) -> bool {
        matches!(self.kind, ElementKind::Artboard { .. })
    }

    /// Whether the element takes part in hit testing and marquee selection.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.visible && !self.locked
    }

    /// Effective ellipse radii, or `None` if this is not a circle.
    #[must_use]
    pub fn radii(&self) -> Option<(f64, f64)> {
        match &self.kind {
            ElementKind::Circle {
                radius,
                radius_x,
                radius_y,
                ..
            } => Some((radius_x.unwrap_or(*radius), radius_y.unwrap_or(*radius))),
            _ => None,
        }
    }

    /// Width and height of the element's own (unrotated) frame.
    #[must_use]
    pub fn size(&self) -> Option<(f64, f64)> {
        match &self.kind {
            ElementKind::Rect { width, height, .. }
            | ElementKind::Text { width, height, .. }
            | ElementKind::Artboard { width, height, .. } => Some((*width, *height)),
            ElementKind::Circle { .. } => self.radii().map(|(rx, ry)| (rx * 2.0, ry * 2.0)),
            ElementKind::Unknown => None,
        }
    }

    /// Move the element so its center lands on `center`.
    pub fn set_center(&mut self, center: Point) {
        match &self.kind {
            ElementKind::Circle { .. } | ElementKind::Unknown => {
                self.x = center.x;
                self.y = center.y;
            }
            ElementKind::Rect { width, height, .. }
            | ElementKind::Text { width, height, .. }
            | ElementKind::Artboard { width, height, .. } => {
                self.x = center.x - width / 2.0;
                self.y = center.y - height / 2.0;
            }
        }
    }

    /// Resize the element's frame, keeping `x`/`y` semantics per kind.
    ///
    /// Circles receive explicit radii; unknown kinds are unchanged.
    pub fn set_size(&mut self, new_width: f64, new_height: f64) {
        match &mut self.kind {
            ElementKind::Rect { width, height, .. }
            | ElementKind::Text { width, height, .. }
            | ElementKind::Artboard { width, height, .. } => {
                *width = new_width;
                *height = new_height;
            }
            ElementKind::Circle {
                radius_x, radius_y, ..
            } => {
                *radius_x = Some(new_width / 2.0);
                *radius_y = Some(new_height / 2.0);
            }
            ElementKind::Unknown => {}
        }
    }

    /// Clone this element under a fresh ID.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            id: ElementId::new(),
            ..self.clone()
        }
    }
}
