//! Runtime configuration.

use crate::geometry::Size;
use crate::spatial::HitStrategy;

/// Default click drag threshold in pixels.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 10.0;

/// Configuration for a [`crate::ui::Ui`] runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Viewport size handed to the root as its layout constraints.
    pub viewport: Size,
    /// Maximum press-to-release displacement still counted as a click.
    pub drag_threshold: f64,
    /// How pointer hit-testing finds the node under the cursor.
    pub hit_strategy: HitStrategy,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(800.0, 600.0),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            hit_strategy: HitStrategy::Descent,
        }
    }
}

impl UiConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport size (builder).
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.viewport = Size::new(width, height);
        self
    }

    /// Set the click drag threshold in pixels (builder).
    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Set the hit-testing strategy (builder).
    pub fn with_hit_strategy(mut self, strategy: HitStrategy) -> Self {
        self.hit_strategy = strategy;
        self
    }

    /// Use a quadtree for hit-testing with the given bucket capacity and depth (builder).
    pub fn with_quadtree(self, max_objects: usize, max_levels: usize) -> Self {
        self.with_hit_strategy(HitStrategy::Quadtree { max_objects, max_levels })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = UiConfig::default();
        assert_eq!(config.drag_threshold, 10.0);
        assert_eq!(config.hit_strategy, HitStrategy::Descent);
    }

    #[test]
    fn builders_chain() {
        let config = UiConfig::new()
            .with_viewport(320.0, 240.0)
            .with_drag_threshold(4.0)
            .with_quadtree(4, 8);
        assert_eq!(config.viewport, Size::new(320.0, 240.0));
        assert_eq!(config.drag_threshold, 4.0);
        assert_eq!(
            config.hit_strategy,
            HitStrategy::Quadtree { max_objects: 4, max_levels: 8 }
        );
    }
}
