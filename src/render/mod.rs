//! Drawing contract between the runtime and a graphics backend.
//!
//! The runtime never rasterizes anything itself. The paint pass walks the
//! arranged scene and issues calls against a [`RenderBackend`]; text metrics
//! and texture sizes flow back through the same trait during measurement.

pub mod texture;

use crate::geometry::Rect;
use crate::style::Styles;

pub use texture::{TextureCache, TextureInfo};

/// A graphics backend the paint pass draws through.
///
/// `opacity` arguments carry the node's final composed opacity; `styles` are
/// the node's resolved styles, so backends read colors, borders, radius, and
/// fonts from there.
pub trait RenderBackend {
    /// Start a frame.
    fn clear(&mut self);

    /// Fill `bounds` with the background color (and shadow, if any).
    fn draw_background(&mut self, bounds: Rect, styles: &Styles, opacity: f64);

    /// Stroke the border described by `styles` around `bounds`.
    fn draw_borders(&mut self, bounds: Rect, styles: &Styles, opacity: f64);

    /// Draw `text` inside `bounds` using the font and color in `styles`.
    fn draw_text(&mut self, text: &str, bounds: Rect, styles: &Styles, opacity: f64);

    /// Draw a previously loaded texture stretched over `bounds`.
    fn draw_texture(&mut self, source: &str, bounds: Rect, styles: &Styles, opacity: f64);

    /// Load the texture named `source`. `None` when it cannot be loaded.
    fn load_texture(&mut self, source: &str) -> Option<TextureInfo>;

    /// Width in pixels of `text` set at `font_size`.
    fn measure_text(&self, text: &str, font_size: f64) -> f64;

    /// The current clip rectangle, if clipping is on.
    fn clip_rect(&self) -> Option<Rect>;

    fn set_clip_rect(&mut self, clip: Option<Rect>);

    /// Finish the frame.
    fn present(&mut self);
}

/// A backend paired with the texture cache, handed to the measure and paint passes.
pub struct RenderContext<'a> {
    pub backend: &'a mut dyn RenderBackend,
    pub textures: &'a mut TextureCache,
}

impl<'a> RenderContext<'a> {
    pub fn new(backend: &'a mut dyn RenderBackend, textures: &'a mut TextureCache) -> Self {
        Self { backend, textures }
    }

    /// Texture size for `source`, loading through the backend on first use.
    pub fn texture(&mut self, source: &str) -> Option<TextureInfo> {
        self.textures.get_or_load(source, &mut *self.backend)
    }
}
