//! Pilot: drive a [`Ui`] headlessly, one frame per interaction.

use crate::builder::Element;
use crate::config::UiConfig;
use crate::event::{FrameInput, Key, KeyEvent, Modifiers, UiEvent};
use crate::geometry::{Point, Size};
use crate::scene::{NodeId, Scene};
use crate::ui::{FrameReport, Ui};

use super::backend::RecordingBackend;
use super::snapshot::dump_tree;

/// A headless UI driver for tests.
///
/// Every input method runs exactly one frame and returns its report. The
/// pointer position persists between frames, like a real mouse.
///
/// ```ignore
/// let mut pilot = Pilot::mount(button().id("ok").child("OK"));
/// pilot.frame();
/// let events = pilot.click_on("ok");
/// assert!(events.iter().any(|e| e.kind == EventType::Click));
/// ```
pub struct Pilot {
    ui: Ui,
    backend: RecordingBackend,
    pointer: Point,
}

impl Pilot {
    /// Drive `scene` with the default configuration.
    pub fn new(scene: Scene) -> Self {
        Self::with_config(scene, UiConfig::default())
    }

    pub fn with_config(scene: Scene, config: UiConfig) -> Self {
        Self::with_backend(scene, config, RecordingBackend::new())
    }

    /// Drive `scene` through a prepared backend, e.g. one with textures registered.
    pub fn with_backend(scene: Scene, config: UiConfig, backend: RecordingBackend) -> Self {
        Self {
            ui: Ui::new(scene, config),
            backend,
            // Off-screen until the first move.
            pointer: Point::new(-1.0, -1.0),
        }
    }

    /// Mount `element` as the root of a fresh scene.
    pub fn mount(element: Element) -> Self {
        let mut scene = Scene::new();
        element.mount(&mut scene);
        Self::new(scene)
    }

    // ── Frames ───────────────────────────────────────────────────────

    /// Run an idle frame at the current pointer position.
    pub fn frame(&mut self) -> FrameReport {
        self.run(FrameInput::default())
    }

    fn run(&mut self, mut input: FrameInput) -> FrameReport {
        input.pointer = self.pointer;
        self.ui.frame(&input, &mut self.backend)
    }

    // ── Pointer ──────────────────────────────────────────────────────

    /// Move the pointer to `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) -> FrameReport {
        self.pointer = Point::new(x, y);
        self.frame()
    }

    /// Press the primary button where the pointer is.
    pub fn press(&mut self) -> FrameReport {
        self.run(FrameInput::default().pressed())
    }

    /// Release the primary button where the pointer is.
    pub fn release(&mut self) -> FrameReport {
        self.run(FrameInput::default().released())
    }

    /// Move to `(x, y)`, press, and release, one frame each.
    ///
    /// Returns the events of all three frames in order.
    pub fn click(&mut self, x: f64, y: f64) -> Vec<UiEvent> {
        let mut events = self.move_to(x, y).events;
        events.extend(self.press().events);
        events.extend(self.release().events);
        events
    }

    /// Click the center of the node with application id `id`.
    ///
    /// Returns no events if the id is unknown.
    pub fn click_on(&mut self, id: &str) -> Vec<UiEvent> {
        match self.bounds_of(id) {
            Some(center) => self.click(center.x, center.y),
            None => Vec::new(),
        }
    }

    /// Press at `from`, move to `to`, release there.
    pub fn drag(&mut self, from: Point, to: Point) -> Vec<UiEvent> {
        let mut events = self.move_to(from.x, from.y).events;
        events.extend(self.press().events);
        events.extend(self.move_to(to.x, to.y).events);
        events.extend(self.release().events);
        events
    }

    fn bounds_of(&self, id: &str) -> Option<Point> {
        let node = self.ui.scene().find(id)?;
        self.ui.scene().get(node).map(|n| n.layout.bounds.center())
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    /// Press a key with no modifiers.
    pub fn press_key(&mut self, key: Key) -> FrameReport {
        self.press_key_with(key, Modifiers::NONE)
    }

    pub fn press_key_with(&mut self, key: Key, modifiers: Modifiers) -> FrameReport {
        self.run(FrameInput::default().with_key(KeyEvent::new(key, modifiers)))
    }

    /// Deliver every character of `text` in a single frame.
    pub fn type_text(&mut self, text: &str) -> FrameReport {
        let mut input = FrameInput::default();
        for ch in text.chars() {
            input = input.with_key(KeyEvent::plain(Key::Char(ch)));
        }
        self.run(input)
    }

    // ── Window ───────────────────────────────────────────────────────

    pub fn resize(&mut self, width: f64, height: f64) -> FrameReport {
        let mut input = FrameInput::default();
        input.resize = Some(Size::new(width, height));
        self.run(input)
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut Ui {
        &mut self.ui
    }

    pub fn scene(&self) -> &Scene {
        self.ui.scene()
    }

    pub fn backend(&self) -> &RecordingBackend {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut RecordingBackend {
        &mut self.backend
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Look up a node by application id.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.ui.scene().find(id)
    }

    /// The scene as text; see [`dump_tree`].
    pub fn dump(&self) -> String {
        dump_tree(self.ui.scene())
    }
}
