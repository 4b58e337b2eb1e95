//! Scene graph: slotmap-backed node arena with parent/child links.

pub mod node;
pub mod state;
pub mod tree;

pub use node::{
    error_styles, Boundable, EventTarget, LayoutBox, Node, NodeId, NodeKind, Parented,
    StateListener, Stylable, ALL_STATES,
};
pub use state::{NodeState, StateKind};
pub use tree::{Attached, Scene, SceneError};
