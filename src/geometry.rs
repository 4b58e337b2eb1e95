//! Core geometry types: Point, Size, Rect, EdgeInsets, Constraints.
//!
//! All coordinates are logical pixels as `f64`. Sizes may go negative: layout
//! never clamps them away, so callers can observe over-constrained boxes.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A position in pixel space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A width/height pair.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero or negative.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle: top-left position plus size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Size,
}

impl Rect {
    /// Create a rect from coordinates and dimensions.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            position: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rect from a position and a size.
    #[inline]
    pub const fn from_parts(position: Point, size: Size) -> Self {
        Self { position, size }
    }

    #[inline]
    pub const fn x(self) -> f64 {
        self.position.x
    }

    #[inline]
    pub const fn y(self) -> f64 {
        self.position.y
    }

    #[inline]
    pub const fn width(self) -> f64 {
        self.size.width
    }

    #[inline]
    pub const fn height(self) -> f64 {
        self.size.height
    }

    /// Right edge (x + width).
    #[inline]
    pub fn right(self) -> f64 {
        self.position.x + self.size.width
    }

    /// Bottom edge (y + height).
    #[inline]
    pub fn bottom(self) -> f64 {
        self.position.y + self.size.height
    }

    /// Center point.
    #[inline]
    pub fn center(self) -> Point {
        Point::new(
            self.position.x + self.size.width / 2.0,
            self.position.y + self.size.height / 2.0,
        )
    }

    /// Closed containment test: points on any edge are inside.
    #[inline]
    pub fn contains_point(self, point: Point) -> bool {
        point.x >= self.x() && point.x <= self.right() && point.y >= self.y() && point.y <= self.bottom()
    }

    /// Closed-interval overlap: rectangles that merely touch intersect.
    #[inline]
    pub fn intersects(self, other: Rect) -> bool {
        self.x() <= other.right()
            && other.x() <= self.right()
            && self.y() <= other.bottom()
            && other.y() <= self.bottom()
    }

    /// Shrink by `insets` on each side. The result may have negative size.
    #[inline]
    pub fn inset(self, insets: EdgeInsets) -> Rect {
        Rect::new(
            self.x() + insets.left,
            self.y() + insets.top,
            self.width() - insets.horizontal(),
            self.height() - insets.vertical(),
        )
    }

    /// Scale the rect about its own center.
    pub fn scaled(self, factor: f64) -> Rect {
        let center = self.center();
        let width = self.width() * factor;
        let height = self.height() * factor;
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }
}

// ---------------------------------------------------------------------------
// EdgeInsets
// ---------------------------------------------------------------------------

/// Per-side distances for margin, padding, and border widths.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EdgeInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets::all(0.0);

    /// CSS order: top, right, bottom, left.
    #[inline]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    #[inline]
    pub const fn all(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    #[inline]
    pub const fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Left + right.
    #[inline]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    /// Top + bottom.
    #[inline]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }

    /// True when every side is zero.
    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

// ---------------------------------------------------------------------------
// Constraints
// ---------------------------------------------------------------------------

/// Size bounds handed down during layout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Constraints {
    pub min_width: f64,
    pub max_width: f64,
    pub min_height: f64,
    pub max_height: f64,
}

impl Default for Constraints {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl Constraints {
    #[inline]
    pub const fn new(min_width: f64, max_width: f64, min_height: f64, max_height: f64) -> Self {
        Self { min_width, max_width, min_height, max_height }
    }

    /// Zero minimum, `size` maximum.
    #[inline]
    pub const fn loose(size: Size) -> Self {
        Self::new(0.0, size.width, 0.0, size.height)
    }

    /// Exactly `size`.
    #[inline]
    pub const fn tight(size: Size) -> Self {
        Self::new(size.width, size.width, size.height, size.height)
    }

    /// No bounds at all.
    #[inline]
    pub const fn unbounded() -> Self {
        Self::new(0.0, f64::INFINITY, 0.0, f64::INFINITY)
    }

    /// Clamp `size` into these bounds.
    ///
    /// Applied as `max(min)` then `min(max)`, so an inverted range (negative
    /// available space) yields the maximum rather than panicking.
    #[inline]
    pub fn constrain(self, size: Size) -> Size {
        Size::new(
            size.width.max(self.min_width).min(self.max_width),
            size.height.max(self.min_height).min(self.max_height),
        )
    }
}
