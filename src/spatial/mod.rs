//! Pointer hit-testing.
//!
//! [`SpatialIndex`] answers "which node is under this point" after layout has
//! assigned bounds. Two strategies give the same answers for a static tree:
//!
//! - [`HitStrategy::Descent`] walks the scene from the root, pruning subtrees
//!   whose bounds miss the point. Nothing is precomputed.
//! - [`HitStrategy::Quadtree`] indexes every visible node's bounds once per
//!   layout. Candidates are then filtered to nodes whose whole ancestor chain
//!   contains the point, and the one latest in paint order wins.

pub mod descent;
pub mod quadtree;

use crate::geometry::{Point, Rect};
use crate::scene::{NodeId, Scene};

pub use quadtree::Quadtree;

/// Default bucket capacity for the quadtree strategy.
pub const DEFAULT_MAX_OBJECTS: usize = 10;
/// Default depth limit for the quadtree strategy.
pub const DEFAULT_MAX_LEVELS: usize = 8;

/// How [`SpatialIndex`] finds the node under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitStrategy {
    /// Recursive descent over the scene.
    #[default]
    Descent,
    /// A quadtree rebuilt after each layout.
    Quadtree { max_objects: usize, max_levels: usize },
}

impl HitStrategy {
    /// The quadtree strategy with default capacity and depth.
    pub fn quadtree() -> Self {
        HitStrategy::Quadtree {
            max_objects: DEFAULT_MAX_OBJECTS,
            max_levels: DEFAULT_MAX_LEVELS,
        }
    }
}

/// A node in the quadtree, tagged with its position in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indexed {
    pub order: usize,
    pub id: NodeId,
}

/// Hit-testing front end over the configured strategy.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    strategy: HitStrategy,
    tree: Option<Quadtree<Indexed>>,
}

impl SpatialIndex {
    pub fn new(strategy: HitStrategy) -> Self {
        Self { strategy, tree: None }
    }

    pub fn strategy(&self) -> HitStrategy {
        self.strategy
    }

    /// Switch strategy. Takes effect at the next [`rebuild`](Self::rebuild).
    pub fn set_strategy(&mut self, strategy: HitStrategy) {
        self.strategy = strategy;
        self.tree = None;
    }

    /// The quadtree, once built.
    pub fn quadtree(&self) -> Option<&Quadtree<Indexed>> {
        self.tree.as_ref()
    }

    /// Re-index the scene after layout.
    pub fn rebuild(&mut self, scene: &Scene) {
        let HitStrategy::Quadtree { max_objects, max_levels } = self.strategy else {
            self.tree = None;
            return;
        };
        let Some(root) = scene.root() else {
            self.tree = None;
            return;
        };
        let bounds = scene.get(root).map(|node| node.layout.bounds).unwrap_or_default();
        let tree = self
            .tree
            .get_or_insert_with(|| Quadtree::new(bounds, max_objects, max_levels));
        if tree.bounds() != bounds {
            *tree = Quadtree::new(bounds, max_objects, max_levels);
        } else {
            tree.clear();
        }

        for (order, id) in scene.walk_depth_first(root).into_iter().enumerate() {
            let Some(node) = scene.get(id) else { continue };
            if node.layout.opacity > 0.0 {
                tree.insert(node.layout.bounds, Indexed { order, id });
            }
        }
        log::debug!("spatial index rebuilt: {} nodes, {} buckets", tree.len(), tree.total_nodes() + 1);
    }

    /// The topmost node under `point`.
    pub fn hit_test(&self, scene: &Scene, point: Point) -> Option<NodeId> {
        let root = scene.root()?;
        match (&self.strategy, &self.tree) {
            (HitStrategy::Quadtree { .. }, Some(tree)) => {
                let query = Rect::from_parts(point, Default::default());
                tree.retrieve(query)
                    .into_iter()
                    .filter(|entry| reachable(scene, entry.id, point))
                    .max_by_key(|entry| entry.order)
                    .map(|entry| entry.id)
            }
            _ => descent::hit_test(scene, root, point),
        }
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new(HitStrategy::default())
    }
}

/// Whether `id` and every ancestor contain `point`.
fn reachable(scene: &Scene, id: NodeId, point: Point) -> bool {
    let contains = |id: NodeId| {
        scene
            .get(id)
            .is_some_and(|node| node.layout.opacity > 0.0 && node.layout.bounds.contains_point(point))
    };
    contains(id) && scene.ancestors(id).into_iter().all(contains)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Node;
    use pretty_assertions::assert_eq;

    /// A 4x4 grid of cells inside a panel, with one cell overflowing the panel.
    fn grid() -> (Scene, Vec<NodeId>) {
        let mut scene = Scene::new();
        let mut root = Node::boxed("root");
        root.layout.bounds = Rect::new(0.0, 0.0, 400.0, 400.0);
        let root = scene.insert(root);
        let mut ids = vec![root];
        for row in 0..4 {
            for col in 0..4 {
                let mut cell = Node::boxed("cell");
                cell.layout.bounds = Rect::new(col as f64 * 100.0, row as f64 * 100.0, 100.0, 100.0);
                let cell = scene.insert_child(root, cell).unwrap();
                let mut inner = Node::boxed("inner");
                inner.layout.bounds =
                    Rect::new(col as f64 * 100.0 + 25.0, row as f64 * 100.0 + 25.0, 90.0, 50.0);
                let inner = scene.insert_child(cell, inner).unwrap();
                ids.extend([cell, inner]);
            }
        }
        (scene, ids)
    }

    #[test]
    fn strategies_agree() {
        let (scene, _ids) = grid();
        let descent = SpatialIndex::new(HitStrategy::Descent);
        let mut quad = SpatialIndex::new(HitStrategy::Quadtree { max_objects: 2, max_levels: 6 });
        quad.rebuild(&scene);
        assert!(quad.quadtree().is_some_and(|t| t.total_nodes() > 0));

        let mut y = -10.0;
        while y <= 410.0 {
            let mut x = -10.0;
            while x <= 410.0 {
                let point = Point::new(x, y);
                assert_eq!(
                    quad.hit_test(&scene, point),
                    descent.hit_test(&scene, point),
                    "disagree at {point:?}"
                );
                x += 7.5;
            }
            y += 7.5;
        }
    }

    #[test]
    fn overflow_outside_parent_is_not_hit() {
        let (scene, ids) = grid();
        let mut quad = SpatialIndex::new(HitStrategy::quadtree());
        quad.rebuild(&scene);
        // The first inner box overflows its cell into the next cell.
        let point = Point::new(110.0, 50.0);
        assert_eq!(quad.hit_test(&scene, point), Some(ids[3]));
    }

    #[test]
    fn descent_needs_no_rebuild() {
        let (scene, ids) = grid();
        let index = SpatialIndex::default();
        assert_eq!(index.strategy(), HitStrategy::Descent);
        assert_eq!(index.hit_test(&scene, Point::new(50.0, 50.0)), Some(ids[2]));
        assert!(index.quadtree().is_none());
    }

    #[test]
    fn empty_scene_hits_nothing() {
        let scene = Scene::new();
        let mut index = SpatialIndex::new(HitStrategy::quadtree());
        index.rebuild(&scene);
        assert_eq!(index.hit_test(&scene, Point::ORIGIN), None);
    }
}
