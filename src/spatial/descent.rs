//! Hit-testing by recursive descent over arranged bounds.

use crate::geometry::Point;
use crate::scene::{NodeId, Scene};

/// The topmost node under `point`, searching from `start`.
///
/// Subtrees whose bounds do not contain the point are pruned, as are fully
/// transparent nodes. Among the nodes that remain, the last one visited in
/// paint order wins, so later siblings beat earlier ones and children beat
/// their parent.
pub fn hit_test(scene: &Scene, start: NodeId, point: Point) -> Option<NodeId> {
    let node = scene.get(start)?;
    if node.layout.opacity <= 0.0 || !node.layout.bounds.contains_point(point) {
        return None;
    }
    let mut found = start;
    for child in scene.children(start) {
        if let Some(hit) = hit_test(scene, *child, point) {
            found = hit;
        }
    }
    Some(found)
}

/// Every node under `point` from `start` down, outermost first.
pub fn hit_path(scene: &Scene, start: NodeId, point: Point) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = hit_test(scene, start, point);
    while let Some(id) = current {
        path.push(id);
        current = if id == start { None } else { scene.parent(id) };
    }
    path.reverse();
    path
}
