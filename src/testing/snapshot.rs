//! Plain-text scene dumps for snapshot assertions.

use std::fmt::Write;

use crate::scene::{NodeId, NodeKind, Scene};

/// Render the tree from the scene root, one node per line.
///
/// Each line reads `kind[#id] x,y WxH`, followed by the text or image source,
/// any active built-in states, and the composed opacity when below 1.
/// Children are indented two spaces under their parent.
pub fn dump_tree(scene: &Scene) -> String {
    match scene.root() {
        Some(root) => dump_subtree(scene, root),
        None => String::new(),
    }
}

/// Like [`dump_tree`], starting from `id`.
pub fn dump_subtree(scene: &Scene, id: NodeId) -> String {
    let mut out = String::new();
    write_node(scene, id, 0, &mut out);
    // Drop the final newline so inline snapshots stay tidy.
    out.pop();
    out
}

fn write_node(scene: &Scene, id: NodeId, depth: usize, out: &mut String) {
    let Some(node) = scene.get(id) else {
        return;
    };
    let bounds = node.layout.bounds;
    let _ = write!(out, "{:indent$}{}", "", node.kind.name(), indent = depth * 2);
    if let Some(app_id) = &node.id {
        let _ = write!(out, "#{app_id}");
    }
    let _ = write!(
        out,
        " {},{} {}x{}",
        bounds.x(),
        bounds.y(),
        bounds.width(),
        bounds.height()
    );
    match &node.kind {
        NodeKind::Text(text) => {
            let _ = write!(out, " {text:?}");
        }
        NodeKind::Error { message } => {
            let _ = write!(out, " !{message:?}");
        }
        NodeKind::Image { source } => {
            let _ = write!(out, " <{source}>");
        }
        _ => {}
    }
    let states: Vec<&str> = node.state.active_kinds().into_iter().map(|k| k.name()).collect();
    if !states.is_empty() {
        let _ = write!(out, " [{}]", states.join(", "));
    }
    if node.layout.opacity < 1.0 {
        let _ = write!(out, " opacity={}", node.layout.opacity);
    }
    out.push('\n');
    for child in scene.children(id) {
        write_node(scene, *child, depth + 1, out);
    }
}
