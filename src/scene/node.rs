//! Node types: NodeId, NodeKind, Node, and the capability traits.

use std::collections::HashMap;
use std::fmt;

use slotmap::new_key_type;

use crate::event::{EventType, Handler};
use crate::geometry::{EdgeInsets, Rect, Size};
use crate::style::{Border, Color, Length, Styles, ROOT_FONT_SIZE};

use super::state::{NodeState, StateKind};

new_key_type! {
    /// Unique identifier for a scene node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Called with `(node, state name, new value)` whenever a state changes.
pub type StateListener = Box<dyn FnMut(NodeId, &str, bool)>;

/// Listener key that matches every state name.
pub const ALL_STATES: &str = "all";

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// What a node is.
///
/// `EventHandler` and `StateStyle` are carriers: attaching one to a parent
/// registers its payload on the parent instead of adding a child.
pub enum NodeKind {
    /// Generic container or leaf box, tagged for debugging (`div`, `button`, `h1`).
    Box { tag: String },
    Text(String),
    Image { source: String },
    /// Visible stand-in for a node that failed to resolve or attach.
    Error { message: String },
    EventHandler { event: EventType, handler: Handler },
    StateStyle { state: StateKind, styles: Styles },
}

impl NodeKind {
    /// Short name used in tree dumps and logs.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Box { tag } => tag,
            NodeKind::Text(_) => "text",
            NodeKind::Image { .. } => "image",
            NodeKind::Error { .. } => "error",
            NodeKind::EventHandler { .. } => "on-event",
            NodeKind::StateStyle { .. } => "style-on",
        }
    }

    /// Whether attaching this kind registers a payload instead of a child.
    pub fn is_carrier(&self) -> bool {
        matches!(self, NodeKind::EventHandler { .. } | NodeKind::StateStyle { .. })
    }
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Box { tag } => f.debug_struct("Box").field("tag", tag).finish(),
            NodeKind::Text(text) => f.debug_tuple("Text").field(text).finish(),
            NodeKind::Image { source } => f.debug_struct("Image").field("source", source).finish(),
            NodeKind::Error { message } => {
                f.debug_struct("Error").field("message", message).finish()
            }
            NodeKind::EventHandler { event, .. } => {
                f.debug_struct("EventHandler").field("event", event).finish_non_exhaustive()
            }
            NodeKind::StateStyle { state, styles } => f
                .debug_struct("StateStyle")
                .field("state", state)
                .field("styles", styles)
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// LayoutBox
// ---------------------------------------------------------------------------

/// Per-frame outputs of resolution and layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    /// Output of the measure pass.
    pub preferred: Size,
    /// Output of the layout pass.
    pub size: Size,
    /// Output of the arrange pass.
    pub bounds: Rect,
    /// Own opacity times every ancestor's.
    pub opacity: f64,
    /// Computed font size in pixels.
    pub font_size: f64,
}

impl Default for LayoutBox {
    fn default() -> Self {
        Self {
            preferred: Size::ZERO,
            size: Size::ZERO,
            bounds: Rect::default(),
            opacity: 1.0,
            font_size: ROOT_FONT_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A scene element.
pub struct Node {
    pub kind: NodeKind,
    /// Optional application-assigned identifier.
    pub id: Option<String>,
    pub styles: Styles,
    pub state: NodeState,
    pub layout: LayoutBox,
    pub(crate) handlers: HashMap<EventType, Handler>,
    pub(crate) listeners: Vec<(String, StateListener)>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Node {
    /// Create a detached node of the given kind.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: None,
            styles: Styles::new(),
            state: NodeState::new(),
            layout: LayoutBox::default(),
            handlers: HashMap::new(),
            listeners: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// A generic box with the given tag.
    pub fn boxed(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Box { tag: tag.into() })
    }

    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    /// An image leaf referencing a texture source.
    pub fn image(source: impl Into<String>) -> Self {
        Self::new(NodeKind::Image { source: source.into() })
    }

    /// An error placeholder showing `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NodeKind::Error { message: message.into() }).with_styles(error_styles())
    }

    /// Set the application id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Replace the styles (builder).
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Register a handler (builder).
    pub fn with_handler(
        mut self,
        event: EventType,
        handler: impl FnMut(&mut crate::event::EventContext<'_>, &crate::event::UiEvent) + 'static,
    ) -> Self {
        self.handlers.insert(event, Box::new(handler));
        self
    }

    /// Text drawn for this node: the string of a text node or an error's diagnostic.
    pub fn display_text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.kind, NodeKind::Error { .. })
    }

    /// Convert in place to an error placeholder. Handlers are dropped;
    /// children must be destroyed by the caller.
    pub(crate) fn become_error(&mut self, message: String) {
        self.kind = NodeKind::Error { message };
        self.styles = error_styles();
        self.handlers.clear();
        self.layout = LayoutBox {
            opacity: self.layout.opacity,
            ..LayoutBox::default()
        };
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .field("state", &self.state)
            .field("layout", &self.layout)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Fixed styling for error placeholders.
pub fn error_styles() -> Styles {
    Styles::new()
        .with_background(Color::rgb(255, 235, 235))
        .with_color(Color::DARK_RED)
        .with_border(Border::solid(2.0, Color::RED))
        .with_padding(EdgeInsets::all(4.0))
        .with_font_size(Length::Px(14.0))
}

// ---------------------------------------------------------------------------
// Capability traits
// ---------------------------------------------------------------------------

/// Something with layout geometry.
pub trait Boundable {
    fn bounds(&self) -> Rect;
    fn preferred_size(&self) -> Size;
    fn final_size(&self) -> Size;
}

/// Something carrying resolved styles.
pub trait Stylable {
    fn styles(&self) -> &Styles;
    fn styles_mut(&mut self) -> &mut Styles;
    fn final_opacity(&self) -> f64;
}

/// Something that receives events.
pub trait EventTarget {
    fn state(&self) -> &NodeState;
    fn has_handler(&self, event: EventType) -> bool;
    fn set_handler(&mut self, event: EventType, handler: Handler);
}

/// Something linked into a tree.
pub trait Parented {
    fn parent(&self) -> Option<NodeId>;
    fn children(&self) -> &[NodeId];
}

impl Boundable for Node {
    fn bounds(&self) -> Rect {
        self.layout.bounds
    }

    fn preferred_size(&self) -> Size {
        self.layout.preferred
    }

    fn final_size(&self) -> Size {
        self.layout.size
    }
}

impl Stylable for Node {
    fn styles(&self) -> &Styles {
        &self.styles
    }

    fn styles_mut(&mut self) -> &mut Styles {
        &mut self.styles
    }

    fn final_opacity(&self) -> f64 {
        self.layout.opacity
    }
}

impl EventTarget for Node {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn has_handler(&self, event: EventType) -> bool {
        self.handlers.contains_key(&event)
    }

    fn set_handler(&mut self, event: EventType, handler: Handler) {
        self.handlers.insert(event, handler);
    }
}

impl Parented for Node {
    fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    fn children(&self) -> &[NodeId] {
        &self.children
    }
}
