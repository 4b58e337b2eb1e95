//! Style resolution.
//!
//! Runs root-first over the scene. For each node:
//!
//! 1. Parse any raw string values. A parse failure turns the node into an
//!    error placeholder and resolution carries on with its siblings.
//! 2. If the set of active states changed since the overlays were last
//!    applied, restore the snapshotted values.
//! 3. Inherit [`Property::INHERITED`] values from the parent unless the node
//!    sets them explicitly. Only explicit or inherited parent values flow down.
//! 4. Re-apply overlays for the active states in priority order.
//! 5. Compose opacity multiplicatively and compute the font size in pixels.
//! 6. Recurse into children.

use crate::scene::{NodeId, Scene};

use super::property::Property;
use super::styles::Source;
use super::value::{Length, StyleValue, ROOT_FONT_SIZE};

/// What a resolved node passes to its children.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContext {
    inherited: Vec<(Property, StyleValue)>,
    /// Final opacity of the node.
    pub opacity: f64,
    /// Computed font size of the node in pixels.
    pub font_size: f64,
}

impl ResolvedContext {
    /// Context for the root: nothing inherited, opacity 1.
    pub fn root() -> Self {
        Self {
            inherited: Vec::new(),
            opacity: 1.0,
            font_size: ROOT_FONT_SIZE,
        }
    }

    /// The value children inherit for `property`, if the node provides one.
    pub fn value(&self, property: Property) -> Option<&StyleValue> {
        self.inherited
            .iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }
}

impl Default for ResolvedContext {
    fn default() -> Self {
        Self::root()
    }
}

/// Resolve the whole tree from the scene root.
pub fn resolve_tree(scene: &mut Scene) {
    if let Some(root) = scene.root() {
        resolve(scene, root, &ResolvedContext::root());
    }
}

/// Resolve `id` against its parent's context, then its subtree.
///
/// Returns the context handed to the children, or `None` for an unknown id.
pub fn resolve(scene: &mut Scene, id: NodeId, parent: &ResolvedContext) -> Option<ResolvedContext> {
    if let Err(err) = scene.get_mut(id)?.styles.parse_raw() {
        log::warn!("style error on {id:?}: {err}");
        scene.replace_with_error(id, err.to_string());
    }

    let node = scene.get_mut(id)?;
    let active = node.state.active_kinds();
    let styles = &mut node.styles;

    let outdated = styles.overlays_outdated(&active);
    if outdated {
        styles.restore_overlays();
    }
    for property in Property::INHERITED {
        match parent.value(property) {
            Some(value) => styles.inherit(property, value.clone()),
            None => styles.clear_inherited(property),
        }
    }
    if outdated {
        styles.apply_overlays(&active);
        log::trace!("overlays {:?} on {id:?}", styles.applied_states());
    }

    let font_size = match styles.font_size() {
        Length::Px(v) => v,
        Length::Percent(p) => parent.font_size * p / 100.0,
        Length::Em(v) => v * parent.font_size,
        Length::Rem(v) => v * ROOT_FONT_SIZE,
        Length::Auto => parent.font_size,
    };
    let opacity = styles.opacity() * parent.opacity;

    let inherited = Property::INHERITED
        .into_iter()
        .filter(|p| styles.source(*p) >= Source::Inherited)
        .map(|p| match p {
            Property::FontSize => (p, StyleValue::Length(Length::Px(font_size))),
            _ => (p, styles.value(p)),
        })
        .collect();

    node.layout.opacity = opacity;
    node.layout.font_size = font_size;
    let context = ResolvedContext {
        inherited,
        opacity,
        font_size,
    };

    let children = node.children.clone();
    for child in children {
        resolve(scene, child, &context);
    }
    Some(context)
}
