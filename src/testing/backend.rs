//! A render backend that records every call instead of drawing.

use std::collections::HashMap;

use crate::geometry::Rect;
use crate::render::{RenderBackend, TextureInfo};
use crate::style::{Border, Color, Length, Styles};

/// Advance of one character, as a fraction of the font size.
pub const CHAR_WIDTH: f64 = 0.5;

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Background {
        bounds: Rect,
        color: Color,
        opacity: f64,
    },
    Borders {
        bounds: Rect,
        border: Border,
        opacity: f64,
    },
    Text {
        text: String,
        bounds: Rect,
        color: Color,
        font_size: Length,
        opacity: f64,
    },
    Texture {
        source: String,
        bounds: Rect,
        opacity: f64,
    },
    Clip(Option<Rect>),
    Present,
}

impl DrawCall {
    /// Short lowercase name of the call, handy for order assertions.
    pub fn name(&self) -> &'static str {
        match self {
            DrawCall::Clear => "clear",
            DrawCall::Background { .. } => "background",
            DrawCall::Borders { .. } => "borders",
            DrawCall::Text { .. } => "text",
            DrawCall::Texture { .. } => "texture",
            DrawCall::Clip(_) => "clip",
            DrawCall::Present => "present",
        }
    }
}

/// Headless [`RenderBackend`].
///
/// Text is measured as a fixed advance of [`CHAR_WIDTH`] times the font size
/// per character. Only textures registered with
/// [`with_texture`](Self::with_texture) load.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<DrawCall>,
    textures: HashMap<String, TextureInfo>,
    texture_loads: usize,
    clip: Option<Rect>,
    frames: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `source` loadable with the given pixel size (builder).
    pub fn with_texture(mut self, source: impl Into<String>, width: u32, height: u32) -> Self {
        self.textures.insert(source.into(), TextureInfo::new(width, height));
        self
    }

    /// Calls recorded since creation or the last [`take_calls`](Self::take_calls).
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// How many times [`RenderBackend::load_texture`] was called.
    pub fn texture_loads(&self) -> usize {
        self.texture_loads
    }

    /// Number of presented frames.
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Text drawn in the most recent frame, in paint order.
    pub fn last_frame_text(&self) -> Vec<&str> {
        let start = self
            .calls
            .iter()
            .rposition(|c| matches!(c, DrawCall::Clear))
            .unwrap_or(0);
        self.calls[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl RenderBackend for RecordingBackend {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_background(&mut self, bounds: Rect, styles: &Styles, opacity: f64) {
        self.calls.push(DrawCall::Background {
            bounds,
            color: styles.background(),
            opacity,
        });
    }

    fn draw_borders(&mut self, bounds: Rect, styles: &Styles, opacity: f64) {
        self.calls.push(DrawCall::Borders {
            bounds,
            border: styles.border(),
            opacity,
        });
    }

    fn draw_text(&mut self, text: &str, bounds: Rect, styles: &Styles, opacity: f64) {
        self.calls.push(DrawCall::Text {
            text: text.to_owned(),
            bounds,
            color: styles.color(),
            font_size: styles.font_size(),
            opacity,
        });
    }

    fn draw_texture(&mut self, source: &str, bounds: Rect, _styles: &Styles, opacity: f64) {
        self.calls.push(DrawCall::Texture {
            source: source.to_owned(),
            bounds,
            opacity,
        });
    }

    fn load_texture(&mut self, source: &str) -> Option<TextureInfo> {
        self.texture_loads += 1;
        self.textures.get(source).copied()
    }

    fn measure_text(&self, text: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * CHAR_WIDTH
    }

    fn clip_rect(&self) -> Option<Rect> {
        self.clip
    }

    fn set_clip_rect(&mut self, clip: Option<Rect>) {
        self.clip = clip;
        self.calls.push(DrawCall::Clip(clip));
    }

    fn present(&mut self) {
        self.frames += 1;
        self.calls.push(DrawCall::Present);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_half_an_em_per_char() {
        let backend = RecordingBackend::new();
        assert_eq!(backend.measure_text("abcd", 10.0), 20.0);
        assert_eq!(backend.measure_text("", 10.0), 0.0);
    }

    #[test]
    fn only_registered_textures_load() {
        let mut backend = RecordingBackend::new().with_texture("a.png", 4, 2);
        assert_eq!(backend.load_texture("a.png"), Some(TextureInfo::new(4, 2)));
        assert_eq!(backend.load_texture("b.png"), None);
        assert_eq!(backend.texture_loads(), 2);
    }

    #[test]
    fn clip_round_trips() {
        let mut backend = RecordingBackend::new();
        let clip = Rect::new(0.0, 0.0, 10.0, 10.0);
        backend.set_clip_rect(Some(clip));
        assert_eq!(backend.clip_rect(), Some(clip));
        assert_eq!(backend.calls(), &[DrawCall::Clip(Some(clip))]);
    }
}
