//! Tree operations: insert, attach, detach, remove, walk.

use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::event::{EventType, Handler};
use crate::style::Styles;

use super::node::{Node, NodeId, NodeKind, StateListener, ALL_STATES};
use super::state::StateKind;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// Errors from tree operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),
    #[error("node {0:?} cannot be its own child")]
    SelfParent(NodeId),
    #[error("node {child:?} is already a child of {parent:?}")]
    AlreadyParented { child: NodeId, parent: NodeId },
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}

/// What [`Scene::add_child`] did with the child.
#[derive(Debug, PartialEq)]
pub enum Attached {
    /// Linked as the parent's last child.
    Child(NodeId),
    /// An event-handler carrier: its callback now lives on the parent.
    Handler(EventType),
    /// A style-state carrier: its overlay now lives on the parent.
    StateStyle(StateKind),
    /// The attach was rejected and an error placeholder took the child's slot.
    Placeholder { placeholder: NodeId, error: SceneError },
}

/// The scene graph, backed by a slotmap arena.
///
/// Nodes own their children as ids; the parent link is a plain id. Detached
/// nodes stay in the arena as free roots until removed.
pub struct Scene {
    nodes: SlotMap<NodeId, Node>,
    root: Option<NodeId>,
    layout_dirty: bool,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            layout_dirty: true,
        }
    }

    // ----- Construction -----

    /// Insert a detached node.
    ///
    /// If no root has been set yet, this node becomes the root.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = self.alloc(node);
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    /// Insert `node` and attach it under `parent`.
    ///
    /// Returns the id now holding the node's content: the new child, or
    /// `parent` when the node was a carrier absorbed by it.
    pub fn insert_child(&mut self, parent: NodeId, node: Node) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let id = self.alloc(node);
        match self.add_child(parent, id)? {
            Attached::Child(child) => Ok(child),
            Attached::Placeholder { placeholder, .. } => Ok(placeholder),
            Attached::Handler(_) | Attached::StateStyle(_) => Ok(parent),
        }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        self.layout_dirty = true;
        self.nodes.insert(node)
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Carrier kinds are absorbed: the handler or overlay is registered on
    /// `parent` and the carrier leaves the arena. Misuse (self-parenting, a
    /// child that already has a parent, or a cycle) attaches an error
    /// placeholder instead and reports the error in [`Attached::Placeholder`].
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<Attached, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let Some(node) = self.nodes.get(child) else {
            return Err(SceneError::UnknownNode(child));
        };

        if node.kind.is_carrier() && node.parent.is_none() {
            return Ok(self.absorb(parent, child));
        }

        let misuse = if parent == child {
            Some(SceneError::SelfParent(child))
        } else if let Some(existing) = node.parent {
            Some(SceneError::AlreadyParented { child, parent: existing })
        } else if self.ancestors(parent).contains(&child) {
            Some(SceneError::Cycle { parent, child })
        } else {
            None
        };
        if let Some(error) = misuse {
            log::warn!("{error}; substituting an error placeholder");
            let placeholder = self.alloc(Node::error(error.to_string()));
            self.link(parent, placeholder);
            return Ok(Attached::Placeholder { placeholder, error });
        }

        self.link(parent, child);
        if self.root == Some(child) {
            self.root = self.ancestors(child).last().copied();
        }
        Ok(Attached::Child(child))
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        self.layout_dirty = true;
    }

    fn absorb(&mut self, parent: NodeId, carrier: NodeId) -> Attached {
        let was_root = self.root == Some(carrier);
        let Some(node) = self.remove(carrier) else {
            return Attached::Child(carrier);
        };
        if was_root {
            self.root = Some(self.ancestors(parent).last().copied().unwrap_or(parent));
        }
        let attached = match node.kind {
            NodeKind::EventHandler { event, handler } => {
                if let Some(target) = self.nodes.get_mut(parent) {
                    target.handlers.insert(event, handler);
                }
                Attached::Handler(event)
            }
            NodeKind::StateStyle { state, styles } => {
                if let Some(target) = self.nodes.get_mut(parent) {
                    target.styles.set_state_style(state, styles);
                }
                Attached::StateStyle(state)
            }
            _ => Attached::Child(carrier),
        };
        log::trace!("absorbed {attached:?} into {parent:?}");
        attached
    }

    // ----- Detach / remove -----

    /// Detach `child` from `parent`. The child keeps its subtree and becomes a free root.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let Some(node) = self.nodes.get(child) else {
            return Err(SceneError::UnknownNode(child));
        };
        if node.parent != Some(parent) {
            return Err(SceneError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes.get_mut(id).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&c| c != id);
        }
        self.layout_dirty = true;
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);
        if self.root == Some(id) {
            self.root = None;
        }

        let mut to_remove = VecDeque::from([id]);
        let mut removed = None;
        while let Some(current) = to_remove.pop_front() {
            let Some(node) = self.nodes.remove(current) else {
                continue;
            };
            to_remove.extend(node.children.iter().copied());
            if current == id {
                removed = Some(node);
            }
        }
        self.layout_dirty = true;
        removed
    }

    /// Turn a node into an error placeholder, destroying its children.
    pub(crate) fn replace_with_error(&mut self, id: NodeId, message: String) {
        for child in self.children(id).to_vec() {
            self.remove(child);
        }
        if let Some(node) = self.nodes.get_mut(id) {
            node.become_error(message);
        }
        self.layout_dirty = true;
    }

    // ----- Queries -----

    /// Immutable access to a node.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable access to a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// The current root node, if set.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Explicitly set the root node.
    pub fn set_root(&mut self, id: NodeId) {
        self.root = Some(id);
        self.layout_dirty = true;
    }

    /// Number of nodes in the arena, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    /// Get the children of a node. Returns an empty slice if the node has no children
    /// or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the root, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself; it starts with the
    /// immediate parent and ends at the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent(current) {
            result.push(p);
            current = p;
        }
        result
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// First node in the root's subtree whose application id is `id`.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        let root = self.root?;
        self.walk_depth_first(root)
            .into_iter()
            .find(|n| self.nodes.get(*n).and_then(|node| node.id.as_deref()) == Some(id))
    }

    // ----- Handlers and overlays -----

    /// Register `handler` for `event` on a node, replacing any previous one.
    pub fn set_handler(&mut self, id: NodeId, event: EventType, handler: Handler) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::UnknownNode(id))?;
        node.handlers.insert(event, handler);
        Ok(())
    }

    /// Register a style overlay for `state` on a node.
    pub fn set_state_style(&mut self, id: NodeId, state: StateKind, styles: Styles) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::UnknownNode(id))?;
        node.styles.set_state_style(state, styles);
        self.layout_dirty = true;
        Ok(())
    }

    // ----- State -----

    /// Set a built-in state. On change, marks layout dirty and notifies listeners.
    pub fn set_state(&mut self, id: NodeId, kind: StateKind, value: bool) -> bool {
        let changed = self
            .nodes
            .get_mut(id)
            .is_some_and(|n| n.state.set(kind, value));
        if changed {
            self.state_changed(id, kind.name(), value);
        }
        changed
    }

    /// Set a state by name. Built-in names ("hover", "active", "focus",
    /// "disabled") go through [`set_state`](Self::set_state). On change, marks
    /// layout dirty and notifies listeners.
    pub fn set_custom_state(&mut self, id: NodeId, name: &str, value: bool) -> bool {
        if let Some(kind) = StateKind::from_name(name) {
            return self.set_state(id, kind, value);
        }
        let changed = self
            .nodes
            .get_mut(id)
            .is_some_and(|n| n.state.set_custom(name, value));
        if changed {
            self.state_changed(id, name, value);
        }
        changed
    }

    /// Listen for changes of the named state on a node; `"all"` matches every state.
    pub fn on_state_change(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        listener: impl FnMut(NodeId, &str, bool) + 'static,
    ) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::UnknownNode(id))?;
        let listener: StateListener = Box::new(listener);
        node.listeners.push((name.into(), listener));
        Ok(())
    }

    fn state_changed(&mut self, id: NodeId, name: &str, value: bool) {
        log::trace!("state {name}={value} on {id:?}");
        self.layout_dirty = true;
        if let Some(node) = self.nodes.get_mut(id) {
            for (key, listener) in node.listeners.iter_mut() {
                if key == name || key == ALL_STATES {
                    listener(id, name, value);
                }
            }
        }
    }

    // ----- Dirty tracking -----

    /// Request style resolution and layout at the start of the next frame.
    pub fn mark_layout_dirty(&mut self) {
        self.layout_dirty = true;
    }

    pub fn is_layout_dirty(&self) -> bool {
        self.layout_dirty
    }

    /// Return the dirty flag and clear it.
    pub fn take_layout_dirty(&mut self) -> bool {
        std::mem::take(&mut self.layout_dirty)
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
