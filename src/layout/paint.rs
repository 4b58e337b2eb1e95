//! The paint pass: walk the arranged scene and draw through the backend.

use crate::render::RenderContext;
use crate::scene::{NodeId, NodeKind, Scene};

/// Draw a whole frame: clear, paint from the root clipped to its bounds,
/// present. The backend's previous clip is restored before presenting.
pub fn paint_tree(scene: &Scene, cx: &mut RenderContext<'_>) {
    cx.backend.clear();
    if let Some(root) = scene.root() {
        let previous = cx.backend.clip_rect();
        if let Some(node) = scene.get(root) {
            cx.backend.set_clip_rect(Some(node.layout.bounds));
        }
        paint(scene, root, cx);
        cx.backend.set_clip_rect(previous);
    }
    cx.backend.present();
}

/// Paint `id` and then its children in order.
///
/// Fully transparent subtrees are skipped. A `scale` other than 1 scales the
/// node's background and border about its center; text and textures use the
/// same scaled box. Children are not scaled.
pub fn paint(scene: &Scene, id: NodeId, cx: &mut RenderContext<'_>) {
    let Some(node) = scene.get(id) else {
        return;
    };
    let opacity = node.layout.opacity;
    if opacity <= 0.0 {
        return;
    }
    let styles = &node.styles;
    let scale = styles.scale();
    let bounds = if scale != 1.0 {
        node.layout.bounds.scaled(scale)
    } else {
        node.layout.bounds
    };

    cx.backend.draw_background(bounds, styles, opacity);
    if styles.border().is_visible() {
        cx.backend.draw_borders(bounds, styles, opacity);
    }
    match &node.kind {
        NodeKind::Text(text) => cx.backend.draw_text(text, bounds, styles, opacity),
        NodeKind::Error { message } => cx.backend.draw_text(message, bounds, styles, opacity),
        NodeKind::Image { source } => {
            if cx.texture(source).is_some() {
                cx.backend.draw_texture(source, bounds, styles, opacity);
            }
        }
        _ => {}
    }

    for child in scene.children(id) {
        paint(scene, *child, cx);
    }
}
