//! Per-frame pointer and keyboard state machine.
//!
//! [`EventManager::process`] turns one frame of [`FrameInput`] plus the node
//! currently under the pointer into UI events, in this order: leave/enter,
//! press (then focus), release (then click), move, key presses.

use crate::config::DEFAULT_DRAG_THRESHOLD;
use crate::geometry::Point;
use crate::scene::{NodeId, Scene, StateKind};

use super::dispatch::dispatch_event;
use super::input::{FrameInput, Key};
use super::types::{EventType, UiEvent};

/// Tracks hover, press, and focus across frames.
#[derive(Debug, Clone)]
pub struct EventManager {
    last_found: Option<NodeId>,
    pressed: Option<NodeId>,
    press_position: Point,
    focused: Option<NodeId>,
    last_pointer: Option<Point>,
    drag_threshold: f64,
}

impl EventManager {
    /// Create a manager with the given click drag threshold in pixels.
    pub fn new(drag_threshold: f64) -> Self {
        Self {
            last_found: None,
            pressed: None,
            press_position: Point::ORIGIN,
            focused: None,
            last_pointer: None,
            drag_threshold,
        }
    }

    /// The node under the pointer as of the last frame.
    pub fn hovered(&self) -> Option<NodeId> {
        self.last_found
    }

    /// The node the primary button went down on, until release.
    pub fn pressed(&self) -> Option<NodeId> {
        self.pressed
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn drag_threshold(&self) -> f64 {
        self.drag_threshold
    }

    pub fn set_drag_threshold(&mut self, threshold: f64) {
        self.drag_threshold = threshold;
    }

    /// Whether a release at `position` is close enough to the press to click.
    pub fn within_click_distance(&self, position: Point) -> bool {
        self.press_position.distance_squared(position) < self.drag_threshold * self.drag_threshold
    }

    /// Move focus to `node`, dispatching `Blur` then `Focus`. No-op when unchanged.
    ///
    /// A previously focused node that has left the scene gets no `Blur`.
    pub fn set_focus(&mut self, scene: &mut Scene, node: Option<NodeId>) -> Vec<UiEvent> {
        let mut fired = Vec::new();
        if node == self.focused {
            return fired;
        }
        let position = self.last_pointer.unwrap_or_default();
        if let Some(old) = self.focused.take().filter(|id| scene.contains(*id)) {
            fired.push(fire(scene, UiEvent::new(EventType::Blur, old, position)));
        }
        self.focused = node.filter(|id| scene.contains(*id));
        if let Some(new) = self.focused {
            fired.push(fire(scene, UiEvent::new(EventType::Focus, new, position)));
        }
        fired
    }

    /// Run one frame. `found` is the node under `input.pointer`.
    ///
    /// Returns the events dispatched, in order.
    pub fn process(&mut self, scene: &mut Scene, found: Option<NodeId>, input: &FrameInput) -> Vec<UiEvent> {
        self.forget_removed(scene);
        let found = found.filter(|id| scene.contains(*id));
        let pointer = input.pointer;
        let mut fired = Vec::new();

        // Enter / leave
        if found != self.last_found {
            if let Some(old) = self.last_found.take() {
                fired.push(fire(scene, UiEvent::new(EventType::Leave, old, pointer)));
            }
            if let Some(new) = found {
                fired.push(fire(scene, UiEvent::new(EventType::Enter, new, pointer)));
            }
            self.last_found = found;
        }

        // Press
        if input.button_pressed {
            self.pressed = found;
            self.press_position = pointer;
            if let Some(target) = found {
                let event = UiEvent::new(EventType::Press, target, pointer);
                let outcome = dispatch_event(scene, &event);
                fired.push(event);
                if !outcome.default_prevented {
                    fired.extend(self.set_focus(scene, Some(target)));
                }
            }
        }

        // Release
        if input.button_released {
            let pressed = self.pressed.take().filter(|id| scene.contains(*id));
            if let Some(target) = found {
                fired.push(fire(scene, UiEvent::new(EventType::Release, target, pointer)));
                if pressed == Some(target) && self.within_click_distance(pointer) {
                    fired.push(fire(scene, UiEvent::new(EventType::Click, target, pointer)));
                }
            }
            if let Some(origin) = pressed.filter(|id| Some(*id) != found) {
                scene.set_state(origin, StateKind::Active, false);
            }
        }

        // Move
        if self.last_pointer != Some(pointer) {
            if let Some(target) = found {
                fired.push(fire(scene, UiEvent::new(EventType::Move, target, pointer)));
            }
        }
        self.last_pointer = Some(pointer);

        // Keys
        for key in &input.keys {
            let Some(target) = self.focused.filter(|id| scene.contains(*id)) else {
                continue;
            };
            fired.push(fire(scene, UiEvent::key(target, pointer, *key)));
            // Tab only drops focus; there is no focus order to advance through yet.
            if key.key == Key::Tab {
                fired.extend(self.set_focus(scene, None));
            }
        }

        fired
    }

    /// Drop references to nodes that no longer exist.
    fn forget_removed(&mut self, scene: &Scene) {
        for slot in [&mut self.last_found, &mut self.pressed, &mut self.focused] {
            if slot.is_some_and(|id| !scene.contains(id)) {
                *slot = None;
            }
        }
    }
}

impl Default for EventManager {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

fn fire(scene: &mut Scene, event: UiEvent) -> UiEvent {
    dispatch_event(scene, &event);
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::input::KeyEvent;
    use crate::scene::Node;
    use pretty_assertions::assert_eq;

    fn kinds(events: &[UiEvent]) -> Vec<(EventType, NodeId)> {
        events.iter().map(|e| (e.kind, e.target)).collect()
    }

    fn two_buttons() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let root = scene.insert(Node::boxed("root"));
        let a = scene.insert_child(root, Node::boxed("a")).unwrap();
        let b = scene.insert_child(root, Node::boxed("b")).unwrap();
        (scene, a, b)
    }

    // ── Hover ────────────────────────────────────────────────────────

    #[test]
    fn leave_precedes_enter() {
        let (mut scene, a, b) = two_buttons();
        let mut manager = EventManager::default();
        let first = manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0));
        assert_eq!(kinds(&first), vec![(EventType::Enter, a), (EventType::Move, a)]);

        let second = manager.process(&mut scene, Some(b), &FrameInput::at(50.0, 1.0));
        assert_eq!(
            kinds(&second),
            vec![(EventType::Leave, a), (EventType::Enter, b), (EventType::Move, b)]
        );
        assert!(!scene.get(a).unwrap().state.get(StateKind::Hover));
        assert!(scene.get(b).unwrap().state.get(StateKind::Hover));

        let third = manager.process(&mut scene, None, &FrameInput::at(500.0, 500.0));
        assert_eq!(kinds(&third), vec![(EventType::Leave, b)]);
        assert_eq!(manager.hovered(), None);
    }

    #[test]
    fn no_move_when_pointer_still() {
        let (mut scene, a, _b) = two_buttons();
        let mut manager = EventManager::default();
        manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0));
        assert!(manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0)).is_empty());
    }

    // ── Click law ────────────────────────────────────────────────────

    /// Press and release on the same node, `(dx, dy)` apart. Returns whether it clicked.
    fn clicks(dx: f64, dy: f64) -> bool {
        let (mut scene, a, _b) = two_buttons();
        let mut manager = EventManager::default();
        manager.process(&mut scene, Some(a), &FrameInput::at(10.0, 10.0).pressed());
        let events = manager.process(
            &mut scene,
            Some(a),
            &FrameInput::at(10.0 + dx, 10.0 + dy).released(),
        );
        events.iter().any(|e| e.kind == EventType::Click && e.target == a)
    }

    #[test]
    fn click_within_threshold() {
        assert!(clicks(0.0, 0.0));
        assert!(clicks(6.0, 7.9));
    }

    #[test]
    fn no_click_at_or_beyond_threshold() {
        assert!(!clicks(6.0, 8.0));
        assert!(!clicks(30.0, 0.0));
    }

    #[test]
    fn release_on_other_node_never_clicks() {
        let (mut scene, a, b) = two_buttons();
        let mut manager = EventManager::default();
        manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0).pressed());
        assert!(scene.get(a).unwrap().state.get(StateKind::Active));
        let events = manager.process(&mut scene, Some(b), &FrameInput::at(1.0, 1.0).released());
        assert_eq!(
            kinds(&events),
            vec![(EventType::Leave, a), (EventType::Enter, b), (EventType::Release, b)]
        );
        assert!(!scene.get(a).unwrap().state.get(StateKind::Active));
        assert_eq!(manager.pressed(), None);
    }

    #[test]
    fn custom_threshold() {
        let (mut scene, a, _b) = two_buttons();
        let mut manager = EventManager::new(2.0);
        manager.process(&mut scene, Some(a), &FrameInput::at(0.0, 0.0).pressed());
        let events = manager.process(&mut scene, Some(a), &FrameInput::at(3.0, 0.0).released());
        assert!(!events.iter().any(|e| e.kind == EventType::Click));
    }

    // ── Focus ────────────────────────────────────────────────────────

    #[test]
    fn press_moves_focus() {
        let (mut scene, a, b) = two_buttons();
        let mut manager = EventManager::default();
        let events = manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0).pressed());
        assert_eq!(
            kinds(&events),
            vec![
                (EventType::Enter, a),
                (EventType::Press, a),
                (EventType::Focus, a),
                (EventType::Move, a),
            ]
        );
        assert_eq!(manager.focused(), Some(a));

        manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0).released());
        let events = manager.process(&mut scene, Some(b), &FrameInput::at(60.0, 1.0).pressed());
        assert!(kinds(&events).starts_with(&[(EventType::Leave, a), (EventType::Enter, b)]));
        assert!(kinds(&events).contains(&(EventType::Blur, a)));
        assert!(!scene.get(a).unwrap().state.get(StateKind::Focus));
        assert!(scene.get(b).unwrap().state.get(StateKind::Focus));
    }

    #[test]
    fn pressing_focused_node_keeps_focus_quietly() {
        let (mut scene, a, _b) = two_buttons();
        let mut manager = EventManager::default();
        manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0).pressed());
        manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0).released());
        let events = manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0).pressed());
        assert_eq!(kinds(&events), vec![(EventType::Press, a)]);
    }

    #[test]
    fn prevented_press_keeps_focus() {
        let mut scene = Scene::new();
        let root = scene.insert(Node::boxed("root"));
        let sticky = scene
            .insert_child(
                root,
                Node::boxed("sticky").with_handler(EventType::Press, |cx, _| cx.prevent_default()),
            )
            .unwrap();
        let mut manager = EventManager::default();
        manager.process(&mut scene, Some(sticky), &FrameInput::at(0.0, 0.0).pressed());
        assert_eq!(manager.focused(), None);
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    #[test]
    fn keys_go_to_focused_node_only() {
        let (mut scene, a, _b) = two_buttons();
        let mut manager = EventManager::default();
        let key = KeyEvent::plain(Key::Char('q'));
        let unfocused = manager.process(&mut scene, None, &FrameInput::at(0.0, 0.0).with_key(key));
        assert!(unfocused.is_empty());

        manager.set_focus(&mut scene, Some(a));
        let events = manager.process(&mut scene, None, &FrameInput::at(0.0, 0.0).with_key(key));
        assert_eq!(kinds(&events), vec![(EventType::KeyPress, a)]);
        assert_eq!(events[0].key, Some(key));
    }

    #[test]
    fn tab_clears_focus() {
        let (mut scene, a, _b) = two_buttons();
        let mut manager = EventManager::default();
        manager.set_focus(&mut scene, Some(a));
        let events = manager.process(
            &mut scene,
            None,
            &FrameInput::at(0.0, 0.0).with_key(KeyEvent::plain(Key::Tab)),
        );
        assert_eq!(kinds(&events), vec![(EventType::KeyPress, a), (EventType::Blur, a)]);
        assert_eq!(manager.focused(), None);
    }

    // ── Removal ──────────────────────────────────────────────────────

    #[test]
    fn removed_nodes_are_forgotten() {
        let (mut scene, a, _b) = two_buttons();
        let mut manager = EventManager::default();
        manager.process(&mut scene, Some(a), &FrameInput::at(1.0, 1.0).pressed());
        scene.remove(a);
        let events = manager.process(&mut scene, None, &FrameInput::at(1.0, 1.0).released());
        assert!(events.is_empty());
        assert_eq!(manager.focused(), None);
        assert_eq!(manager.hovered(), None);
    }

    #[test]
    fn focusing_after_removal_skips_blur() {
        let (mut scene, a, b) = two_buttons();
        let mut manager = EventManager::default();
        manager.set_focus(&mut scene, Some(a));
        scene.remove(a);
        let events = manager.set_focus(&mut scene, Some(b));
        assert_eq!(kinds(&events), vec![(EventType::Focus, b)]);
        assert_eq!(manager.focused(), Some(b));
    }
}
