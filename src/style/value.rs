//! Typed style values.
//!
//! [`StyleValue`] is a closed union over every shape a property can take. Each
//! [`Property`](super::Property) accepts a fixed subset of variants, checked when
//! the value is stored.

use std::fmt;

use crate::geometry::EdgeInsets;

/// Root font size used for `rem` units and as the default `font-size`.
pub const ROOT_FONT_SIZE: f64 = 16.0;

// ---------------------------------------------------------------------------
// Length
// ---------------------------------------------------------------------------

/// A length with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Px(f64),
    /// Percentage of the relevant basis (constraint max, parent font size).
    Percent(f64),
    /// Multiple of the node's own computed font size.
    Em(f64),
    /// Multiple of [`ROOT_FONT_SIZE`].
    Rem(f64),
    Auto,
}

impl Length {
    /// Resolve to pixels. `Percent` resolves against `basis`; `Auto` yields `None`.
    pub fn resolve(self, basis: f64, font_size: f64) -> Option<f64> {
        match self {
            Length::Px(v) => Some(v),
            Length::Percent(p) => Some(basis * p / 100.0),
            Length::Em(v) => Some(v * font_size),
            Length::Rem(v) => Some(v * ROOT_FONT_SIZE),
            Length::Auto => None,
        }
    }

    /// Resolve units that do not need a layout basis: everything but `Percent` and `Auto`.
    pub fn absolute(self, font_size: f64) -> Option<f64> {
        match self {
            Length::Percent(_) | Length::Auto => None,
            other => other.resolve(0.0, font_size),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Px(v) => write!(f, "{v}px"),
            Length::Percent(v) => write!(f, "{v}%"),
            Length::Em(v) => write!(f, "{v}em"),
            Length::Rem(v) => write!(f, "{v}rem"),
            Length::Auto => f.write_str("auto"),
        }
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const CYAN: Color = Color::rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const DARK_GRAY: Color = Color::rgb(169, 169, 169);
    pub const SILVER: Color = Color::rgb(192, 192, 192);
    pub const DARK_RED: Color = Color::rgb(139, 0, 0);
    pub const NAVY: Color = Color::rgb(0, 0, 128);
    pub const FOREST_GREEN: Color = Color::rgb(34, 139, 34);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Look up a named color (case-insensitive).
    pub fn named(name: &str) -> Option<Color> {
        let color = match name.to_ascii_lowercase().as_str() {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "yellow" => Self::YELLOW,
            "cyan" => Self::CYAN,
            "magenta" => Self::MAGENTA,
            "gray" | "grey" => Self::GRAY,
            "lightgray" | "lightgrey" => Self::LIGHT_GRAY,
            "darkgray" | "darkgrey" => Self::DARK_GRAY,
            "silver" => Self::SILVER,
            "darkred" => Self::DARK_RED,
            "navy" => Self::NAVY,
            "forestgreen" => Self::FOREST_GREEN,
            "orange" => Self::ORANGE,
            "purple" => Self::PURPLE,
            _ => return None,
        };
        Some(color)
    }

    /// Multiply the alpha channel by `opacity` (clamped to `0..=1`).
    pub fn with_opacity(self, opacity: f64) -> Color {
        let alpha = (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8;
        Color { a: alpha, ..self }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

// ---------------------------------------------------------------------------
// Compound values
// ---------------------------------------------------------------------------

/// Border line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    None,
    Solid,
    Dashed,
    Dotted,
}

impl BorderStyle {
    pub fn from_name(name: &str) -> Option<BorderStyle> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(BorderStyle::None),
            "solid" => Some(BorderStyle::Solid),
            "dashed" => Some(BorderStyle::Dashed),
            "dotted" => Some(BorderStyle::Dotted),
            _ => None,
        }
    }
}

/// Border widths, line style, and color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: EdgeInsets,
    pub style: BorderStyle,
    pub color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            width: EdgeInsets::ZERO,
            style: BorderStyle::None,
            color: Color::BLACK,
        }
    }
}

impl Border {
    /// A solid border of uniform width.
    pub fn solid(width: f64, color: Color) -> Self {
        Self {
            width: EdgeInsets::all(width),
            style: BorderStyle::Solid,
            color,
        }
    }

    /// Whether drawing this border would produce anything.
    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::None && !self.width.is_zero() && self.color.a > 0
    }
}

/// Drop shadow.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub offset_x: f64,
    pub offset_y: f64,
    pub blur: f64,
    pub color: Color,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            blur: 0.0,
            color: Color::TRANSPARENT,
        }
    }
}

// ---------------------------------------------------------------------------
// Keywords
// ---------------------------------------------------------------------------

/// Main axis of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
}

/// Cross-axis placement of children (`align-items`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Start,
    Center,
    End,
    /// Positioned like `Start`; children keep their laid-out size.
    #[default]
    Stretch,
}

/// Main-axis distribution of children (`justify-content`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Start,
    Center,
    End,
    SpaceBetween,
}

/// Horizontal text alignment inside a node's content box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Line height: a multiplier of the font size or an absolute length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineHeight {
    Multiplier(f64),
    Length(Length),
}

impl LineHeight {
    /// Line height in pixels for the given font size.
    pub fn to_px(self, font_size: f64) -> f64 {
        match self {
            LineHeight::Multiplier(m) => m * font_size,
            LineHeight::Length(Length::Percent(p)) => font_size * p / 100.0,
            LineHeight::Length(len) => len.absolute(font_size).unwrap_or(font_size * 1.2),
        }
    }
}

// ---------------------------------------------------------------------------
// StyleValue
// ---------------------------------------------------------------------------

/// Any value a style property can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Length(Length),
    Number(f64),
    Color(Color),
    Insets(EdgeInsets),
    Border(Border),
    Shadow(Shadow),
    Direction(FlexDirection),
    Align(Align),
    Justify(Justify),
    TextAlign(TextAlign),
    LineHeight(LineHeight),
    FontFamily(String),
    /// Unparsed source text, parsed during style resolution.
    Raw(String),
}

impl StyleValue {
    /// Short variant name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            StyleValue::Length(_) => "length",
            StyleValue::Number(_) => "number",
            StyleValue::Color(_) => "color",
            StyleValue::Insets(_) => "insets",
            StyleValue::Border(_) => "border",
            StyleValue::Shadow(_) => "shadow",
            StyleValue::Direction(_) => "flex direction",
            StyleValue::Align(_) => "alignment",
            StyleValue::Justify(_) => "justification",
            StyleValue::TextAlign(_) => "text alignment",
            StyleValue::LineHeight(_) => "line height",
            StyleValue::FontFamily(_) => "font family",
            StyleValue::Raw(_) => "raw string",
        }
    }
}

impl From<Length> for StyleValue {
    fn from(v: Length) -> Self {
        StyleValue::Length(v)
    }
}

impl From<Color> for StyleValue {
    fn from(v: Color) -> Self {
        StyleValue::Color(v)
    }
}

impl From<EdgeInsets> for StyleValue {
    fn from(v: EdgeInsets) -> Self {
        StyleValue::Insets(v)
    }
}

impl From<Border> for StyleValue {
    fn from(v: Border) -> Self {
        StyleValue::Border(v)
    }
}

impl From<Shadow> for StyleValue {
    fn from(v: Shadow) -> Self {
        StyleValue::Shadow(v)
    }
}

impl From<FlexDirection> for StyleValue {
    fn from(v: FlexDirection) -> Self {
        StyleValue::Direction(v)
    }
}

impl From<Align> for StyleValue {
    fn from(v: Align) -> Self {
        StyleValue::Align(v)
    }
}

impl From<Justify> for StyleValue {
    fn from(v: Justify) -> Self {
        StyleValue::Justify(v)
    }
}

impl From<TextAlign> for StyleValue {
    fn from(v: TextAlign) -> Self {
        StyleValue::TextAlign(v)
    }
}

impl From<LineHeight> for StyleValue {
    fn from(v: LineHeight) -> Self {
        StyleValue::LineHeight(v)
    }
}

impl From<f64> for StyleValue {
    fn from(v: f64) -> Self {
        StyleValue::Number(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_resolution() {
        assert_eq!(Length::Px(12.0).resolve(100.0, 16.0), Some(12.0));
        assert_eq!(Length::Percent(50.0).resolve(300.0, 16.0), Some(150.0));
        assert_eq!(Length::Em(2.0).resolve(0.0, 10.0), Some(20.0));
        assert_eq!(Length::Rem(2.0).resolve(0.0, 10.0), Some(32.0));
        assert_eq!(Length::Auto.resolve(100.0, 16.0), None);
    }

    #[test]
    fn absolute_skips_percent() {
        assert_eq!(Length::Percent(50.0).absolute(16.0), None);
        assert_eq!(Length::Em(1.5).absolute(16.0), Some(24.0));
    }

    #[test]
    fn named_colors() {
        assert_eq!(Color::named("Red"), Some(Color::RED));
        assert_eq!(Color::named("grey"), Some(Color::GRAY));
        assert_eq!(Color::named("chartreuse-ish"), None);
    }

    #[test]
    fn color_opacity() {
        assert_eq!(Color::RED.with_opacity(0.5).a, 128);
        assert_eq!(Color::RED.with_opacity(3.0).a, 255);
    }

    #[test]
    fn border_visibility() {
        assert!(Border::solid(1.0, Color::BLACK).is_visible());
        assert!(!Border::default().is_visible());
        assert!(!Border::solid(0.0, Color::BLACK).is_visible());
    }

    #[test]
    fn line_height_px() {
        assert!((LineHeight::Multiplier(1.2).to_px(20.0) - 24.0).abs() < 1e-9);
        assert_eq!(LineHeight::Length(Length::Px(30.0)).to_px(20.0), 30.0);
        assert_eq!(LineHeight::Length(Length::Em(2.0)).to_px(10.0), 20.0);
    }
}
