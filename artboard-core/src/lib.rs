//! # Artboard Core
//!
//! Scene interaction engine for a 2D artboard editor.
//! Turns pointer input into reversible scene edits and compiles to WASM for
//! browser hosts.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                EditorSession                │
//! │   history · selection · viewport · clipboard│
//! ├─────────────────────────────────────────────┤
//! │  InteractionEngine                          │
//! │  artboard resize → pan → transform →        │
//! │  drag → marquee                             │
//! ├──────────────┬──────────────┬───────────────┤
//! │  Transforms  │  Snapping    │  Artboards    │
//! │  - rotate    │  - edges     │  - parenting  │
//! │  - resize    │  - centers   │  - resize     │
//! ├──────────────┴──────────────┴───────────────┤
//! │  Geometry kernel: boxes, handles, hit tests │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod artboard;
pub mod config;
pub mod element;
pub mod error;
pub mod event;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod interaction;
pub mod scene;
pub mod selection;
pub mod session;
pub mod snapping;
pub mod transform;
pub mod viewport;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{EditorConfig, HandleConfig, ZoomConfig};
pub use element::{Element, ElementId, ElementKind, SpanStyle, TextAlign, TextSpan, TextStyle};
pub use error::{EditorError, EditorResult};
pub use event::{KeyModifiers, PointerButton, PointerInput};
pub use geometry::{BoundingBox, BoxKind, Point};
pub use handles::{Handle, HandleKind};
pub use history::History;
pub use interaction::{Gesture, GestureKind, InteractionEngine, PointerDown, PointerMove, PointerUp};
pub use scene::Scene;
pub use selection::{frame_around, selection_box, Selection};
pub use session::{EditorSession, RenderFrame};
pub use snapping::{GuideAxis, SnapGuide, SnapResult, SnapSettings};
pub use transform::{InitialGroupState, ResizeOptions};
pub use viewport::Viewport;

/// Artboard core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
