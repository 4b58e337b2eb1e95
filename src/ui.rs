//! The frame-driven runtime.
//!
//! [`Ui`] owns the scene and runs one frame per [`Ui::frame`] call:
//!
//! 1. Apply a pending viewport resize.
//! 2. If the layout is dirty, resolve styles, run the layout passes, and
//!    rebuild the spatial index.
//! 3. Hit-test the pointer.
//! 4. Turn the frame's input into events and dispatch them. Handlers may
//!    mutate the scene; anything that needs a new layout waits for the next
//!    frame.
//! 5. Paint.

use crate::config::UiConfig;
use crate::event::{EventManager, FrameInput, UiEvent};
use crate::geometry::{Point, Size};
use crate::layout;
use crate::render::{RenderBackend, RenderContext, TextureCache};
use crate::scene::{NodeId, Scene};
use crate::spatial::SpatialIndex;

/// What happened during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Frame counter, starting at 1.
    pub frame: u64,
    /// Styles and layout were recomputed at the start of this frame.
    pub relaid: bool,
    /// The node under the pointer.
    pub found: Option<NodeId>,
    /// Events dispatched, in order.
    pub events: Vec<UiEvent>,
}

/// Scene plus everything needed to run it frame by frame.
pub struct Ui {
    scene: Scene,
    config: UiConfig,
    events: EventManager,
    spatial: SpatialIndex,
    textures: TextureCache,
    frames: u64,
}

impl Ui {
    /// Wrap `scene`. The first frame lays it out.
    pub fn new(mut scene: Scene, config: UiConfig) -> Self {
        scene.mark_layout_dirty();
        Self {
            events: EventManager::new(config.drag_threshold),
            spatial: SpatialIndex::new(config.hit_strategy),
            scene,
            config,
            textures: TextureCache::new(),
            frames: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Mutable scene access. Structural or style changes should be followed
    /// by [`Scene::mark_layout_dirty`] so the next frame picks them up.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn events(&self) -> &EventManager {
        &self.events
    }

    pub fn spatial(&self) -> &SpatialIndex {
        &self.spatial
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    pub fn viewport(&self) -> Size {
        self.config.viewport
    }

    /// Number of frames run so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Change the viewport. Takes effect at the next frame.
    pub fn resize(&mut self, viewport: Size) {
        if viewport != self.config.viewport {
            log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
            self.config.viewport = viewport;
            self.scene.mark_layout_dirty();
        }
    }

    /// Move keyboard focus, dispatching blur and focus events.
    pub fn set_focus(&mut self, node: Option<NodeId>) -> Vec<UiEvent> {
        self.events.set_focus(&mut self.scene, node)
    }

    /// The node under `point` as of the last layout.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.spatial.hit_test(&self.scene, point)
    }

    /// Recompute styles and layout if anything marked them dirty.
    ///
    /// Returns whether a layout ran.
    pub fn update_layout(&mut self, backend: &mut dyn RenderBackend) -> bool {
        if !self.scene.take_layout_dirty() {
            return false;
        }
        let mut cx = RenderContext::new(backend, &mut self.textures);
        layout::run(&mut self.scene, self.config.viewport, &mut cx);
        self.spatial.rebuild(&self.scene);
        // Resolution itself may flag the scene (placeholders); that work is done.
        self.scene.take_layout_dirty();
        true
    }

    /// Draw the scene as currently laid out.
    pub fn paint(&mut self, backend: &mut dyn RenderBackend) {
        let mut cx = RenderContext::new(backend, &mut self.textures);
        layout::paint_tree(&self.scene, &mut cx);
    }

    /// Run one frame.
    pub fn frame(&mut self, input: &FrameInput, backend: &mut dyn RenderBackend) -> FrameReport {
        self.frames += 1;
        if let Some(size) = input.resize {
            self.resize(size);
        }
        let relaid = self.update_layout(backend);

        let found = self.hit_test(input.pointer);
        let events = self.events.process(&mut self.scene, found, input);
        if !events.is_empty() {
            log::trace!("frame {}: {} events", self.frames, events.len());
        }

        self.paint(backend);
        FrameReport {
            frame: self.frames,
            relaid,
            found,
            events,
        }
    }
}
