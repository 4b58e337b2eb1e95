//! Event dispatch with bubbling.
//!
//! [`dispatch_event`] applies the built-in state change for the event at its
//! target, then runs handlers from the target up through its ancestors until
//! one stops propagation or the root is passed.

use crate::scene::{NodeId, Scene, StateKind};

use super::types::{EventContext, EventType, UiEvent};

/// What happened during a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    /// Number of handlers that ran.
    pub handled: usize,
    /// A handler called `stop_propagation`.
    pub stopped: bool,
    /// A handler called `prevent_default`.
    pub default_prevented: bool,
}

/// Compute the bubble path from `start` up to the root (inclusive).
///
/// Returns `[start, parent, grandparent, ..., root]`.
/// If `start` does not exist in the scene, returns an empty vec.
pub fn bubble_path(scene: &Scene, start: NodeId) -> Vec<NodeId> {
    if !scene.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    path.extend(scene.ancestors(start));
    path
}

/// The state an event kind toggles on its target, if any.
pub fn builtin_state(kind: EventType) -> Option<(StateKind, bool)> {
    match kind {
        EventType::Enter => Some((StateKind::Hover, true)),
        EventType::Leave => Some((StateKind::Hover, false)),
        EventType::Press => Some((StateKind::Active, true)),
        EventType::Release => Some((StateKind::Active, false)),
        EventType::Focus => Some((StateKind::Focus, true)),
        EventType::Blur => Some((StateKind::Focus, false)),
        EventType::Click | EventType::Move | EventType::KeyPress => None,
    }
}

/// Dispatch `event` to its target and bubble it up.
///
/// Each handler is taken out of its node while it runs, so a handler cannot
/// re-enter itself. If a handler removes its own node, bubbling ends there.
pub fn dispatch_event(scene: &mut Scene, event: &UiEvent) -> DispatchOutcome {
    let mut outcome = DispatchOutcome::default();
    if !scene.contains(event.target) {
        return outcome;
    }
    if let Some((state, value)) = builtin_state(event.kind) {
        scene.set_state(event.target, state, value);
    }
    log::debug!("dispatch {} to {:?}", event.kind, event.target);

    let mut cx = EventContext::new(scene, event.target);
    let mut current = Some(event.target);
    while let Some(id) = current {
        let handler = cx
            .scene_mut()
            .get_mut(id)
            .and_then(|node| node.handlers.remove(&event.kind));
        if let Some(mut handler) = handler {
            cx.set_current(id);
            handler(&mut cx, event);
            outcome.handled += 1;
            if let Some(node) = cx.scene_mut().get_mut(id) {
                node.handlers.entry(event.kind).or_insert(handler);
            }
        }
        if cx.is_propagation_stopped() {
            outcome.stopped = true;
            break;
        }
        current = cx.scene().parent(id);
    }
    outcome.default_prevented = cx.is_default_prevented();
    outcome
}
