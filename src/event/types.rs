//! UI event types, the handler context, and the handler signature.

use std::fmt;

use crate::geometry::Point;
use crate::scene::{NodeId, Scene};

use super::input::KeyEvent;

/// Kinds of UI events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    Enter,
    Leave,
    Press,
    Release,
    Click,
    Move,
    KeyPress,
    Focus,
    Blur,
}

impl EventType {
    pub fn name(self) -> &'static str {
        match self {
            EventType::Enter => "enter",
            EventType::Leave => "leave",
            EventType::Press => "press",
            EventType::Release => "release",
            EventType::Click => "click",
            EventType::Move => "move",
            EventType::KeyPress => "keypress",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An event delivered to handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    pub kind: EventType,
    /// The node the event was originally dispatched to.
    pub target: NodeId,
    /// Pointer position when the event was produced.
    pub position: Point,
    /// The key, for [`EventType::KeyPress`].
    pub key: Option<KeyEvent>,
}

impl UiEvent {
    /// A pointer or focus event.
    pub fn new(kind: EventType, target: NodeId, position: Point) -> Self {
        Self {
            kind,
            target,
            position,
            key: None,
        }
    }

    /// A key press event.
    pub fn key(target: NodeId, position: Point, key: KeyEvent) -> Self {
        Self {
            kind: EventType::KeyPress,
            target,
            position,
            key: Some(key),
        }
    }
}

/// Event callback. Runs synchronously during dispatch.
pub type Handler = Box<dyn FnMut(&mut EventContext<'_>, &UiEvent)>;

/// What a handler can reach while it runs.
///
/// Handlers get the scene but not the event manager, so they cannot start a
/// nested dispatch. Layout changes are requested with
/// [`mark_layout_dirty`](Self::mark_layout_dirty) and happen next frame.
pub struct EventContext<'a> {
    scene: &'a mut Scene,
    current: NodeId,
    propagation_stopped: bool,
    default_prevented: bool,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(scene: &'a mut Scene, current: NodeId) -> Self {
        Self {
            scene,
            current,
            propagation_stopped: false,
            default_prevented: false,
        }
    }

    /// The node whose handler is running. Differs from the event target while bubbling.
    pub fn current_node(&self) -> NodeId {
        self.current
    }

    pub(crate) fn set_current(&mut self, id: NodeId) {
        self.current = id;
    }

    pub fn scene(&self) -> &Scene {
        self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        self.scene
    }

    /// Stop the event from reaching further ancestors.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Suppress the manager's follow-up action (a press moving focus).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Request style resolution and layout at the start of the next frame.
    pub fn mark_layout_dirty(&mut self) {
        self.scene.mark_layout_dirty();
    }
}
