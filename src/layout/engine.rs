//! The layout passes.
//!
//! [`run`] drives a full layout: resolve styles, measure preferred sizes
//! bottom-up, lay out top-down under constraints, then arrange children into
//! absolute bounds. Each pass writes its result into the node's
//! [`LayoutBox`](crate::scene::LayoutBox).

use crate::geometry::{Constraints, EdgeInsets, Point, Rect, Size};
use crate::render::RenderContext;
use crate::scene::{NodeId, NodeKind, Scene};
use crate::style::{self, Align, FlexDirection, Justify, Length};

/// Run every pass from the scene root. Returns the root's final size.
pub fn run(scene: &mut Scene, viewport: Size, cx: &mut RenderContext<'_>) -> Size {
    let Some(root) = scene.root() else {
        return Size::ZERO;
    };
    style::resolve_tree(scene);
    measure_preferred(scene, root, cx);
    let size = layout(scene, root, Constraints::loose(viewport));
    arrange_children(scene, root, Rect::from_parts(Point::ORIGIN, size));
    log::debug!(
        "layout: {} nodes in {}x{} viewport, root {}x{}",
        scene.len(),
        viewport.width,
        viewport.height,
        size.width,
        size.height
    );
    size
}

/// Whether `id` takes part in layout. Fully transparent nodes do not.
fn in_flow(scene: &Scene, id: NodeId) -> bool {
    scene.get(id).is_some_and(|node| node.layout.opacity > 0.0)
}

fn margin(scene: &Scene, id: NodeId) -> EdgeInsets {
    scene.get(id).map(|node| node.styles.margin()).unwrap_or_default()
}

/// Space between two adjacent siblings along the main axis.
fn gap(scene: &Scene, direction: FlexDirection, prev: NodeId, next: NodeId) -> f64 {
    let (prev, next) = (margin(scene, prev), margin(scene, next));
    match direction {
        FlexDirection::Row => prev.right + next.left,
        FlexDirection::Column => prev.bottom + next.top,
    }
}

fn flow_children(scene: &Scene, id: NodeId) -> Vec<NodeId> {
    scene
        .children(id)
        .iter()
        .copied()
        .filter(|child| in_flow(scene, *child))
        .collect()
}

/// Zero the layout of a subtree that is out of flow.
fn collapse(scene: &mut Scene, id: NodeId, origin: Point) {
    for node_id in scene.walk_depth_first(id) {
        if let Some(node) = scene.get_mut(node_id) {
            node.layout.preferred = Size::ZERO;
            node.layout.size = Size::ZERO;
            node.layout.bounds = Rect::from_parts(origin, Size::ZERO);
        }
    }
}

// ---------------------------------------------------------------------------
// Measure
// ---------------------------------------------------------------------------

/// Compute and store the preferred size of `id` and its subtree.
pub fn measure_preferred(scene: &mut Scene, id: NodeId, cx: &mut RenderContext<'_>) -> Size {
    if !scene.contains(id) {
        return Size::ZERO;
    }
    if !in_flow(scene, id) {
        collapse(scene, id, Point::ORIGIN);
        return Size::ZERO;
    }

    let children = scene.children(id).to_vec();
    for child in &children {
        measure_preferred(scene, *child, cx);
    }

    let Some(node) = scene.get(id) else {
        return Size::ZERO;
    };
    let font_size = node.layout.font_size;
    let padding = node.styles.padding();
    let mut size = match &node.kind {
        NodeKind::Image { source } => match cx.texture(source) {
            Some(info) => Size::new(f64::from(info.width), f64::from(info.height)),
            None => Size::ZERO,
        },
        NodeKind::Text(_) | NodeKind::Error { .. } => {
            let text = node.display_text().unwrap_or_default();
            let width = cx.backend.measure_text(text, font_size);
            let height = node.styles.line_height().to_px(font_size);
            Size::new(width + padding.horizontal(), height + padding.vertical())
        }
        _ => {
            let direction = node.styles.direction();
            let content = children_extent(scene, &flow_children(scene, id), direction);
            Size::new(content.width + padding.horizontal(), content.height + padding.vertical())
        }
    };

    let Some(node) = scene.get_mut(id) else {
        return Size::ZERO;
    };
    if let Some(width) = node.styles.width().absolute(font_size) {
        size.width = width;
    }
    if let Some(height) = node.styles.height().absolute(font_size) {
        size.height = height;
    }
    node.layout.preferred = size;
    size
}

/// Main-axis sum (with sibling gaps) and cross-axis max of the children's preferred sizes.
fn children_extent(scene: &Scene, children: &[NodeId], direction: FlexDirection) -> Size {
    let mut main = 0.0;
    let mut cross: f64 = 0.0;
    for (i, child) in children.iter().enumerate() {
        let size = scene.get(*child).map(|n| n.layout.preferred).unwrap_or_default();
        let (child_main, child_cross) = split_axes(size, direction);
        main += child_main;
        cross = cross.max(child_cross);
        if let Some(next) = children.get(i + 1) {
            main += gap(scene, direction, *child, *next);
        }
    }
    join_axes(main, cross, direction)
}

fn split_axes(size: Size, direction: FlexDirection) -> (f64, f64) {
    match direction {
        FlexDirection::Row => (size.width, size.height),
        FlexDirection::Column => (size.height, size.width),
    }
}

fn join_axes(main: f64, cross: f64, direction: FlexDirection) -> Size {
    match direction {
        FlexDirection::Row => Size::new(main, cross),
        FlexDirection::Column => Size::new(cross, main),
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Fit the preferred size of `id` into `constraints`, then lay out its children.
///
/// Children get `0..(final size - padding)` on each axis. The available space
/// is not clamped, so padding larger than the node yields negative maxima.
pub fn layout(scene: &mut Scene, id: NodeId, constraints: Constraints) -> Size {
    if !scene.contains(id) {
        return Size::ZERO;
    }
    if !in_flow(scene, id) {
        collapse(scene, id, Point::ORIGIN);
        return Size::ZERO;
    }
    let Some(node) = scene.get(id) else {
        return Size::ZERO;
    };
    let styles = &node.styles;
    let font_size = node.layout.font_size;

    let own = Constraints::new(
        bound(styles.min_width(), font_size).map_or(constraints.min_width, |v| v.max(constraints.min_width)),
        bound(styles.max_width(), font_size).map_or(constraints.max_width, |v| v.min(constraints.max_width)),
        bound(styles.min_height(), font_size).map_or(constraints.min_height, |v| v.max(constraints.min_height)),
        bound(styles.max_height(), font_size).map_or(constraints.max_height, |v| v.min(constraints.max_height)),
    );
    let mut size = own.constrain(node.layout.preferred);
    if let Length::Percent(p) = styles.width() {
        if constraints.max_width.is_finite() {
            size.width = constraints.max_width * p / 100.0;
        }
    }
    if let Length::Percent(p) = styles.height() {
        if constraints.max_height.is_finite() {
            size.height = constraints.max_height * p / 100.0;
        }
    }

    let padding = styles.padding();
    let available = Constraints::new(
        0.0,
        size.width - padding.horizontal(),
        0.0,
        size.height - padding.vertical(),
    );
    let children = scene.children(id).to_vec();
    for child in children {
        layout(scene, child, available);
    }

    if let Some(node) = scene.get_mut(id) {
        node.layout.size = size;
    }
    size
}

/// A min/max length in pixels, if it has one without a layout basis.
fn bound(length: Length, font_size: f64) -> Option<f64> {
    length.absolute(font_size)
}

// ---------------------------------------------------------------------------
// Arrange
// ---------------------------------------------------------------------------

/// Assign `bounds` to `id` and position its children inside the padding box.
pub fn arrange_children(scene: &mut Scene, id: NodeId, bounds: Rect) {
    let Some(node) = scene.get_mut(id) else {
        return;
    };
    node.layout.bounds = bounds;
    if node.children.is_empty() {
        return;
    }
    let content = bounds.inset(node.styles.padding());
    let direction = node.styles.direction();
    let justify = node.styles.justify();
    let align = node.styles.align();

    let children = scene.children(id).to_vec();
    let flow: Vec<NodeId> = children.iter().copied().filter(|c| in_flow(scene, *c)).collect();
    for child in children.iter().filter(|c| !flow.contains(c)) {
        collapse(scene, *child, content.position);
    }
    if flow.is_empty() {
        return;
    }

    let sizes: Vec<Size> = flow
        .iter()
        .map(|c| scene.get(*c).map(|n| n.layout.size).unwrap_or_default())
        .collect();
    let gaps: Vec<f64> = flow.windows(2).map(|w| gap(scene, direction, w[0], w[1])).collect();
    let extent: f64 = sizes.iter().map(|s| split_axes(*s, direction).0).sum::<f64>() + gaps.iter().sum::<f64>();
    let (content_main, content_cross) = split_axes(content.size, direction);
    let free = content_main - extent;

    let (mut offset, spacing) = match justify {
        Justify::Start => (0.0, 0.0),
        Justify::Center => (free / 2.0, 0.0),
        Justify::End => (free, 0.0),
        Justify::SpaceBetween if flow.len() > 1 => (0.0, free / (flow.len() - 1) as f64),
        Justify::SpaceBetween => (0.0, 0.0),
    };

    for (i, child) in flow.iter().enumerate() {
        let size = sizes[i];
        let (child_main, child_cross) = split_axes(size, direction);
        let cross_offset = match align {
            Align::Start | Align::Stretch => 0.0,
            Align::Center => (content_cross - child_cross) / 2.0,
            Align::End => content_cross - child_cross,
        };
        let position = match direction {
            FlexDirection::Row => Point::new(content.x() + offset, content.y() + cross_offset),
            FlexDirection::Column => Point::new(content.x() + cross_offset, content.y() + offset),
        };
        arrange_children(scene, *child, Rect::from_parts(position, size));
        offset += child_main + gaps.get(i).copied().unwrap_or(0.0) + spacing;
    }
}
