//! # trellis
//!
//! The runtime core of a retained-mode UI toolkit: a scene graph of styled
//! nodes, laid out as nested flex boxes, hit-tested against the pointer, and
//! driven frame by frame.
//!
//! trellis does not rasterize. Drawing, text metrics, and texture loading go
//! through the [`render::RenderBackend`] trait; [`testing::RecordingBackend`]
//! is a headless implementation.
//!
//! ## Core Systems
//!
//! - **[`scene`]**: Slotmap-backed node arena, parent/child links, node states
//! - **[`style`]**: Typed properties, value parsing, inheritance, state overlays
//! - **[`layout`]**: Measure, layout, and arrange passes, plus the paint walk
//! - **[`spatial`]**: Hit-testing by tree descent or quadtree
//! - **[`event`]**: Frame input, enter/leave/press/release/click, focus, bubbling
//! - **[`builder`]**: Declarative element constructors
//! - **[`ui`]**: The per-frame pipeline tying everything together
//! - **[`testing`]**: Recording backend, Pilot, tree dumps
//! - **[`geometry`]**: Point, Size, Rect, EdgeInsets, Constraints

// Foundation
pub mod config;
pub mod geometry;

// Core systems
pub mod layout;
pub mod scene;
pub mod spatial;
pub mod style;

// Events
pub mod event;

// Rendering
pub mod render;

// Application
pub mod builder;
pub mod ui;

// Headless testing
pub mod testing;

pub use config::UiConfig;
pub use event::{EventType, FrameInput, UiEvent};
pub use geometry::{Constraints, EdgeInsets, Point, Rect, Size};
pub use render::RenderBackend;
pub use scene::{Node, NodeId, NodeKind, Scene, StateKind};
pub use spatial::HitStrategy;
pub use style::{Color, Length, Property, Styles};
pub use ui::{FrameReport, Ui};
