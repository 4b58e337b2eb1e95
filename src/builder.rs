//! Declarative element builders.
//!
//! Build a tree of [`Element`]s, then [`mount`](Element::mount) it into a
//! [`Scene`]:
//!
//! ```ignore
//! let root = layout(FlexDirection::Column)
//!     .child(heading(1).child("Settings"))
//!     .child(
//!         button()
//!             .child("Save")
//!             .child(on_event(EventType::Click, |cx, _| cx.mark_layout_dirty()))
//!             .child(style_on(StateKind::Hover, Styles::new().with_background(Color::DARK_GRAY))),
//!     )
//!     .mount(&mut scene);
//! ```
//!
//! [`on_event`] and [`style_on`] build carrier elements: attaching one
//! registers a handler or state overlay on its parent instead of adding a
//! child.

use crate::event::{EventContext, EventType, UiEvent};
use crate::geometry::EdgeInsets;
use crate::scene::{Node, NodeId, NodeKind, Scene, SceneError, StateKind};
use crate::style::{Color, FlexDirection, Length, Property, Styles};

/// A node plus the children it will be mounted with.
pub struct Element {
    node: Node,
    children: Vec<Element>,
}

impl Element {
    pub fn new(node: Node) -> Self {
        Self {
            node,
            children: Vec::new(),
        }
    }

    /// Append a child (builder).
    pub fn child(mut self, child: impl Into<Element>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children (builder).
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Element>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Set the application id used by [`Scene::find`] (builder).
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.node.id = Some(id.into());
        self
    }

    /// Transform the element's styles (builder).
    pub fn style(mut self, f: impl FnOnce(Styles) -> Styles) -> Self {
        self.node.styles = f(std::mem::take(&mut self.node.styles));
        self
    }

    /// Set a property from its textual form (builder).
    ///
    /// The value is parsed during style resolution; a malformed value turns
    /// the node into an error placeholder then. An unknown property name
    /// does so immediately.
    pub fn css(mut self, name: &str, value: &str) -> Self {
        if let Err(err) = self.node.styles.set_str(name, value) {
            log::warn!("{err}");
            self.node.become_error(err.to_string());
        }
        self
    }

    pub fn width(self, width: Length) -> Self {
        self.style(|s| s.with_width(width))
    }

    pub fn height(self, height: Length) -> Self {
        self.style(|s| s.with_height(height))
    }

    pub fn padding(self, padding: EdgeInsets) -> Self {
        self.style(|s| s.with_padding(padding))
    }

    pub fn margin(self, margin: EdgeInsets) -> Self {
        self.style(|s| s.with_margin(margin))
    }

    pub fn background(self, color: Color) -> Self {
        self.style(|s| s.with_background(color))
    }

    pub fn color(self, color: Color) -> Self {
        self.style(|s| s.with_color(color))
    }

    pub fn opacity(self, opacity: f64) -> Self {
        self.style(|s| s.with_opacity(opacity))
    }

    /// Register a handler directly (builder). Same effect as a [`on_event`] child.
    pub fn on(
        mut self,
        event: EventType,
        handler: impl FnMut(&mut EventContext<'_>, &UiEvent) + 'static,
    ) -> Self {
        self.node.handlers.insert(event, Box::new(handler));
        self
    }

    /// Borrow the node being built.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Insert the tree as a detached subtree. The first subtree mounted into
    /// an empty scene becomes its root.
    pub fn mount(self, scene: &mut Scene) -> NodeId {
        let id = scene.insert(self.node);
        for child in self.children {
            // The parent was just inserted, so attaching cannot fail.
            if let Err(err) = child.mount_under(scene, id) {
                log::warn!("mount failed: {err}");
            }
        }
        id
    }

    /// Insert the tree under `parent`.
    ///
    /// Returns the id holding the element: the new node, or `parent` when
    /// the element was a carrier.
    pub fn mount_under(self, scene: &mut Scene, parent: NodeId) -> Result<NodeId, SceneError> {
        let id = scene.insert_child(parent, self.node)?;
        for child in self.children {
            child.mount_under(scene, id)?;
        }
        Ok(id)
    }
}

impl From<Node> for Element {
    fn from(node: Node) -> Self {
        Element::new(node)
    }
}

impl From<&str> for Element {
    fn from(value: &str) -> Self {
        text(value)
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        text(value)
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

fn boxed(tag: &str, styles: Styles) -> Element {
    Element::new(Node::boxed(tag).with_styles(styles))
}

/// A heading. Level 1 is the largest; levels past 2 share the level-2 look.
///
/// Heading font settings are explicit so the text inside inherits them.
pub fn heading(level: u8) -> Element {
    let level = level.clamp(1, 6);
    let (size, margin) = match level {
        1 => (24.0, EdgeInsets::new(16.0, 0.0, 8.0, 0.0)),
        _ => (20.0, EdgeInsets::new(14.0, 0.0, 7.0, 0.0)),
    };
    boxed(
        &format!("h{level}"),
        Styles::new()
            .with_font_size(Length::Px(size))
            .with_font_weight(700.0)
            .with_margin(margin),
    )
}

/// A text run. Its font presets give way to inherited values.
pub fn text(content: impl Into<String>) -> Element {
    Element::new(
        Node::text(content).with_styles(
            Styles::new()
                .with_default(Property::FontSize, Length::Px(20.0))
                .with_default(Property::FontWeight, 700.0)
                .with_default(Property::Color, Color::BLACK),
        ),
    )
}

pub fn button() -> Element {
    boxed(
        "button",
        Styles::new()
            .with_padding(EdgeInsets::new(8.0, 16.0, 8.0, 16.0))
            .with_background(Color::GRAY)
            .with_color(Color::BLACK)
            .with_border_radius(Length::Px(4.0)),
    )
}

/// An image sized to its texture.
pub fn image(source: impl Into<String>) -> Element {
    Element::new(Node::image(source))
}

/// A plain filled box.
pub fn rect() -> Element {
    boxed(
        "rect",
        Styles::new()
            .with_padding(EdgeInsets::all(4.0))
            .with_background(Color::GRAY),
    )
}

/// A container stacking its children along `direction`.
pub fn layout(direction: FlexDirection) -> Element {
    boxed("layout", Styles::new().with_direction(direction))
}

/// A carrier registering `handler` for `event` on its parent.
pub fn on_event(
    event: EventType,
    handler: impl FnMut(&mut EventContext<'_>, &UiEvent) + 'static,
) -> Element {
    Element::new(Node::new(NodeKind::EventHandler {
        event,
        handler: Box::new(handler),
    }))
}

/// A carrier registering `overlay` for `state` on its parent.
pub fn style_on(state: StateKind, overlay: Styles) -> Element {
    Element::new(Node::new(NodeKind::StateStyle { state, styles: overlay }))
}
