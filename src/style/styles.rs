//! The per-node property bag.
//!
//! [`Styles`] maps each [`Property`] to an [`Entry`]: a value plus the
//! [`Source`] it came from. Absent properties read as their default. A Styles
//! also owns its state-overlay table and the snapshot of values an applied
//! overlay replaced, so overlays can be removed exactly.

use std::collections::BTreeMap;

use crate::geometry::EdgeInsets;
use crate::scene::StateKind;

use super::parse::{parse_value, StyleError};
use super::property::Property;
use super::value::{
    Align, Border, Color, FlexDirection, Justify, Length, LineHeight, Shadow, StyleValue,
    TextAlign, ROOT_FONT_SIZE,
};

/// Where a stored value came from. Ordered by precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Source {
    #[default]
    Default,
    Inherited,
    Explicit,
}

/// A stored value and its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub value: StyleValue,
    pub source: Source,
}

/// Generates typed `with_*` builder setters that store explicit values.
macro_rules! typed_setters {
    ($($name:ident => $prop:ident : $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("Set `", stringify!($prop), "` explicitly (builder).")]
            pub fn $name(mut self, value: $ty) -> Self {
                self.put(Property::$prop, StyleValue::from(value), Source::Explicit);
                self
            }
        )*
    };
}

/// Property bag with source tags, state overlays, and an overlay snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Styles {
    entries: BTreeMap<Property, Entry>,
    states: BTreeMap<StateKind, Styles>,
    snapshot: BTreeMap<Property, Option<Entry>>,
    applied: Vec<StateKind>,
    /// Default-tagged presets hidden by an inherited value.
    shadowed: BTreeMap<Property, Entry>,
    /// An applied overlay was edited since it was last applied.
    overlays_dirty: bool,
}

impl Styles {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self::default()
    }

    // ----- Access -----

    /// The stored value, if any.
    pub fn get(&self, property: Property) -> Option<&StyleValue> {
        self.entries.get(&property).map(|e| &e.value)
    }

    /// The stored value, or the property default.
    pub fn value(&self, property: Property) -> StyleValue {
        self.get(property)
            .cloned()
            .unwrap_or_else(|| property.default_value())
    }

    /// The stored entry, if any.
    pub fn entry(&self, property: Property) -> Option<&Entry> {
        self.entries.get(&property)
    }

    /// Source of the property; unset reads as [`Source::Default`].
    pub fn source(&self, property: Property) -> Source {
        self.entries
            .get(&property)
            .map_or(Source::Default, |e| e.source)
    }

    /// Iterate over stored entries in property order.
    pub fn iter(&self) -> impl Iterator<Item = (Property, &Entry)> {
        self.entries.iter().map(|(p, e)| (*p, e))
    }

    /// True when no property is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ----- Mutation -----

    /// Set a property explicitly, validating the value's shape.
    pub fn set(&mut self, property: Property, value: impl Into<StyleValue>) -> Result<(), StyleError> {
        let value = value.into();
        if !property.accepts(&value) {
            return Err(StyleError::TypeMismatch {
                property,
                found: value.kind(),
            });
        }
        self.put(property, value, Source::Explicit);
        Ok(())
    }

    /// Set a property by name from an unparsed string.
    ///
    /// The name is checked now; the value is parsed during style resolution,
    /// where a malformed value turns the owning node into an error placeholder.
    pub fn set_str(&mut self, name: &str, value: &str) -> Result<(), StyleError> {
        let property =
            Property::from_name(name).ok_or_else(|| StyleError::UnknownProperty(name.to_string()))?;
        self.put(property, StyleValue::Raw(value.to_string()), Source::Explicit);
        Ok(())
    }

    /// Remove a stored property.
    pub fn remove(&mut self, property: Property) -> Option<Entry> {
        self.entries.remove(&property)
    }

    /// Store `value` with `source`. A property currently replaced by an overlay
    /// also has its snapshot updated, so the write survives the overlay's removal.
    fn put(&mut self, property: Property, value: StyleValue, source: Source) {
        let entry = Entry { value, source };
        if let Some(saved) = self.snapshot.get_mut(&property) {
            *saved = Some(entry.clone());
        }
        self.entries.insert(property, entry);
    }

    // ----- Builders -----

    typed_setters! {
        with_width => Width: Length,
        with_height => Height: Length,
        with_min_width => MinWidth: Length,
        with_max_width => MaxWidth: Length,
        with_min_height => MinHeight: Length,
        with_max_height => MaxHeight: Length,
        with_margin => Margin: EdgeInsets,
        with_padding => Padding: EdgeInsets,
        with_direction => FlexDirection: FlexDirection,
        with_justify => JustifyContent: Justify,
        with_align => AlignItems: Align,
        with_font_size => FontSize: Length,
        with_font_weight => FontWeight: f64,
        with_line_height => LineHeight: LineHeight,
        with_text_align => TextAlign: TextAlign,
        with_color => Color: Color,
        with_background => Background: Color,
        with_border => Border: Border,
        with_border_radius => BorderRadius: Length,
        with_shadow => Shadow: Shadow,
        with_opacity => Opacity: f64,
        with_scale => Scale: f64,
    }

    /// Set `FontFamily` explicitly (builder).
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.put(Property::FontFamily, StyleValue::FontFamily(family.into()), Source::Explicit);
        self
    }

    /// Store an unparsed value for `property` (builder).
    pub fn with_str(mut self, property: Property, value: impl Into<String>) -> Self {
        self.put(property, StyleValue::Raw(value.into()), Source::Explicit);
        self
    }

    /// Store a value tagged [`Source::Default`] (builder).
    ///
    /// Default-tagged presets never block inheritance: a parent's explicit
    /// value replaces them. Values of the wrong shape are ignored.
    pub fn with_default(mut self, property: Property, value: impl Into<StyleValue>) -> Self {
        let value = value.into();
        if property.accepts(&value) {
            self.put(property, value, Source::Default);
        } else {
            log::warn!("ignoring {} preset for {property}", value.kind());
        }
        self
    }

    /// Register an overlay for `state` (builder).
    pub fn with_state(mut self, state: StateKind, overlay: Styles) -> Self {
        self.set_state_style(state, overlay);
        self
    }

    // ----- Typed getters -----

    fn read<T>(&self, property: Property, extract: fn(&StyleValue) -> Option<T>, fallback: T) -> T {
        self.get(property).and_then(extract).unwrap_or(fallback)
    }

    fn length(&self, property: Property, fallback: Length) -> Length {
        self.read(property, |v| match v {
            StyleValue::Length(l) => Some(*l),
            _ => None,
        }, fallback)
    }

    fn insets(&self, property: Property) -> EdgeInsets {
        self.read(property, |v| match v {
            StyleValue::Insets(i) => Some(*i),
            _ => None,
        }, EdgeInsets::ZERO)
    }

    fn number(&self, property: Property, fallback: f64) -> f64 {
        self.read(property, |v| match v {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }, fallback)
    }

    fn color_of(&self, property: Property, fallback: Color) -> Color {
        self.read(property, |v| match v {
            StyleValue::Color(c) => Some(*c),
            _ => None,
        }, fallback)
    }

    pub fn width(&self) -> Length {
        self.length(Property::Width, Length::Auto)
    }

    pub fn height(&self) -> Length {
        self.length(Property::Height, Length::Auto)
    }

    pub fn min_width(&self) -> Length {
        self.length(Property::MinWidth, Length::Px(0.0))
    }

    pub fn max_width(&self) -> Length {
        self.length(Property::MaxWidth, Length::Auto)
    }

    pub fn min_height(&self) -> Length {
        self.length(Property::MinHeight, Length::Px(0.0))
    }

    pub fn max_height(&self) -> Length {
        self.length(Property::MaxHeight, Length::Auto)
    }

    pub fn margin(&self) -> EdgeInsets {
        self.insets(Property::Margin)
    }

    pub fn padding(&self) -> EdgeInsets {
        self.insets(Property::Padding)
    }

    pub fn direction(&self) -> FlexDirection {
        self.read(Property::FlexDirection, |v| match v {
            StyleValue::Direction(d) => Some(*d),
            _ => None,
        }, FlexDirection::Row)
    }

    pub fn justify(&self) -> Justify {
        self.read(Property::JustifyContent, |v| match v {
            StyleValue::Justify(j) => Some(*j),
            _ => None,
        }, Justify::Start)
    }

    pub fn align(&self) -> Align {
        self.read(Property::AlignItems, |v| match v {
            StyleValue::Align(a) => Some(*a),
            _ => None,
        }, Align::Stretch)
    }

    pub fn font_family(&self) -> &str {
        match self.get(Property::FontFamily) {
            Some(StyleValue::FontFamily(f)) => f,
            _ => "sans-serif",
        }
    }

    pub fn font_size(&self) -> Length {
        self.length(Property::FontSize, Length::Px(ROOT_FONT_SIZE))
    }

    pub fn font_weight(&self) -> f64 {
        self.number(Property::FontWeight, 400.0)
    }

    pub fn line_height(&self) -> LineHeight {
        self.read(Property::LineHeight, |v| match v {
            StyleValue::LineHeight(l) => Some(*l),
            _ => None,
        }, LineHeight::Multiplier(1.2))
    }

    pub fn text_align(&self) -> TextAlign {
        self.read(Property::TextAlign, |v| match v {
            StyleValue::TextAlign(t) => Some(*t),
            _ => None,
        }, TextAlign::Left)
    }

    pub fn color(&self) -> Color {
        self.color_of(Property::Color, Color::BLACK)
    }

    pub fn background(&self) -> Color {
        self.color_of(Property::Background, Color::TRANSPARENT)
    }

    pub fn border(&self) -> Border {
        self.read(Property::Border, |v| match v {
            StyleValue::Border(b) => Some(*b),
            _ => None,
        }, Border::default())
    }

    pub fn border_radius(&self) -> Length {
        self.length(Property::BorderRadius, Length::Px(0.0))
    }

    pub fn shadow(&self) -> Shadow {
        self.read(Property::Shadow, |v| match v {
            StyleValue::Shadow(s) => Some(*s),
            _ => None,
        }, Shadow::default())
    }

    pub fn opacity(&self) -> f64 {
        self.number(Property::Opacity, 1.0)
    }

    pub fn scale(&self) -> f64 {
        self.number(Property::Scale, 1.0)
    }

    // ----- Resolution support -----

    /// Copy a parent value in unless this property is set explicitly.
    pub(crate) fn inherit(&mut self, property: Property, value: StyleValue) {
        if self.source(property) == Source::Explicit {
            return;
        }
        let previous = self.entries.insert(
            property,
            Entry { value, source: Source::Inherited },
        );
        if let Some(preset) = previous.filter(|e| e.source == Source::Default) {
            self.shadowed.insert(property, preset);
        }
    }

    /// Drop an inherited value the parent no longer provides, bringing back
    /// any preset it was hiding.
    pub(crate) fn clear_inherited(&mut self, property: Property) {
        if self.source(property) == Source::Inherited {
            self.entries.remove(&property);
            if let Some(preset) = self.shadowed.remove(&property) {
                self.entries.insert(property, preset);
            }
        }
    }

    /// Parse every `Raw` value in place, including overlays and the snapshot.
    pub(crate) fn parse_raw(&mut self) -> Result<(), StyleError> {
        for (property, entry) in self.entries.iter_mut() {
            parse_entry(*property, entry)?;
        }
        for (property, saved) in self.snapshot.iter_mut() {
            if let Some(entry) = saved {
                parse_entry(*property, entry)?;
            }
        }
        for overlay in self.states.values_mut() {
            overlay.parse_raw()?;
        }
        Ok(())
    }

    // ----- State overlays -----

    /// The overlay registered for `state`.
    pub fn state_style(&self, state: StateKind) -> Option<&Styles> {
        self.states.get(&state)
    }

    /// Register an overlay for `state`, merging into any existing one.
    ///
    /// Editing an overlay that is currently applied makes the next resolution
    /// restore and reapply it.
    pub fn set_state_style(&mut self, state: StateKind, overlay: Styles) {
        if self.applied.contains(&state) {
            self.overlays_dirty = true;
        }
        match self.states.get_mut(&state) {
            Some(existing) => existing.entries.extend(overlay.entries),
            None => {
                self.states.insert(state, overlay);
            }
        }
    }

    /// States whose overlays are currently applied, in priority order.
    pub fn applied_states(&self) -> &[StateKind] {
        &self.applied
    }

    fn wanted_states(&self, active: &[StateKind]) -> Vec<StateKind> {
        StateKind::PRIORITY
            .into_iter()
            .filter(|s| active.contains(s) && self.states.contains_key(s))
            .collect()
    }

    /// Whether the applied overlays differ from those `active` calls for.
    pub(crate) fn overlays_outdated(&self, active: &[StateKind]) -> bool {
        self.overlays_dirty || self.wanted_states(active) != self.applied
    }

    /// Put back every value an overlay replaced. Idempotent.
    pub(crate) fn restore_overlays(&mut self) {
        for (property, saved) in std::mem::take(&mut self.snapshot) {
            match saved {
                Some(entry) => {
                    self.entries.insert(property, entry);
                }
                None => {
                    self.entries.remove(&property);
                }
            }
        }
        self.applied.clear();
    }

    /// Apply overlays for `active` states in priority order.
    ///
    /// Each replaced property is snapshotted once, before the first overlay
    /// touching it, so later overlays win without losing the original value.
    pub(crate) fn apply_overlays(&mut self, active: &[StateKind]) {
        let wanted = self.wanted_states(active);
        for state in &wanted {
            let Some(overlay) = self.states.get(state) else {
                continue;
            };
            for (property, entry) in &overlay.entries {
                if !self.snapshot.contains_key(property) {
                    self.snapshot
                        .insert(*property, self.entries.get(property).cloned());
                }
                self.entries.insert(
                    *property,
                    Entry {
                        value: entry.value.clone(),
                        source: Source::Explicit,
                    },
                );
            }
        }
        self.applied = wanted;
        self.overlays_dirty = false;
    }
}

fn parse_entry(property: Property, entry: &mut Entry) -> Result<(), StyleError> {
    if let StyleValue::Raw(text) = &entry.value {
        entry.value = parse_value(property, text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Access and defaults ──────────────────────────────────────────

    #[test]
    fn unset_reads_as_default() {
        let styles = Styles::new();
        assert_eq!(styles.source(Property::Color), Source::Default);
        assert_eq!(styles.color(), Color::BLACK);
        assert_eq!(styles.background(), Color::TRANSPARENT);
        assert_eq!(styles.opacity(), 1.0);
        assert_eq!(styles.font_size(), Length::Px(16.0));
        assert_eq!(styles.direction(), FlexDirection::Row);
    }

    #[test]
    fn builders_are_explicit() {
        let styles = Styles::new()
            .with_background(Color::RED)
            .with_padding(EdgeInsets::all(4.0));
        assert_eq!(styles.source(Property::Background), Source::Explicit);
        assert_eq!(styles.background(), Color::RED);
        assert_eq!(styles.padding(), EdgeInsets::all(4.0));
    }

    #[test]
    fn defaults_presets_keep_default_source() {
        let styles = Styles::new().with_default(Property::FontSize, Length::Px(24.0));
        assert_eq!(styles.source(Property::FontSize), Source::Default);
        assert_eq!(styles.font_size(), Length::Px(24.0));
    }

    #[test]
    fn presets_come_back_when_inheritance_stops() {
        let mut styles = Styles::new().with_default(Property::Color, Color::RED);
        styles.inherit(Property::Color, StyleValue::Color(Color::NAVY));
        assert_eq!(styles.color(), Color::NAVY);
        assert_eq!(styles.source(Property::Color), Source::Inherited);

        styles.clear_inherited(Property::Color);
        assert_eq!(styles.color(), Color::RED);
        assert_eq!(styles.source(Property::Color), Source::Default);
    }

    // ── Validation ───────────────────────────────────────────────────

    #[test]
    fn set_rejects_wrong_shape() {
        let mut styles = Styles::new();
        let err = styles.set(Property::Width, Color::RED).unwrap_err();
        assert_eq!(
            err,
            StyleError::TypeMismatch { property: Property::Width, found: "color" }
        );
        assert!(styles.is_empty());
    }

    #[test]
    fn set_str_checks_property_name() {
        let mut styles = Styles::new();
        assert!(styles.set_str("fontSize", "20px").is_ok());
        assert_eq!(
            styles.get(Property::FontSize),
            Some(&StyleValue::Raw("20px".into()))
        );
        assert_eq!(
            styles.set_str("z-index", "3"),
            Err(StyleError::UnknownProperty("z-index".into()))
        );
    }

    #[test]
    fn parse_raw_replaces_strings() {
        let mut styles = Styles::new()
            .with_str(Property::Width, "50%")
            .with_state(StateKind::Hover, Styles::new().with_str(Property::Background, "#00f"));
        styles.parse_raw().unwrap();
        assert_eq!(styles.width(), Length::Percent(50.0));
        assert_eq!(
            styles.state_style(StateKind::Hover).map(Styles::background),
            Some(Color::BLUE)
        );
    }

    #[test]
    fn parse_raw_reports_bad_values() {
        let mut styles = Styles::new().with_str(Property::Background, "#12");
        assert!(matches!(
            styles.parse_raw(),
            Err(StyleError::InvalidValue { property: Property::Background, .. })
        ));
    }

    // ── Inheritance ──────────────────────────────────────────────────

    #[test]
    fn inherit_respects_explicit() {
        let mut styles = Styles::new().with_color(Color::RED);
        styles.inherit(Property::Color, StyleValue::Color(Color::BLUE));
        assert_eq!(styles.color(), Color::RED);

        styles.inherit(Property::FontWeight, StyleValue::Number(700.0));
        assert_eq!(styles.source(Property::FontWeight), Source::Inherited);
        styles.clear_inherited(Property::FontWeight);
        assert_eq!(styles.source(Property::FontWeight), Source::Default);
    }

    #[test]
    fn inherit_replaces_default_preset() {
        let mut styles = Styles::new().with_default(Property::FontSize, Length::Px(16.0));
        styles.inherit(Property::FontSize, StyleValue::Length(Length::Px(24.0)));
        assert_eq!(styles.font_size(), Length::Px(24.0));
    }

    // ── Overlays ─────────────────────────────────────────────────────

    fn hoverable() -> Styles {
        Styles::new()
            .with_background(Color::RED)
            .with_state(StateKind::Hover, Styles::new().with_background(Color::BLUE))
            .with_state(
                StateKind::Active,
                Styles::new().with_background(Color::GREEN).with_opacity(0.5),
            )
    }

    #[test]
    fn overlay_then_restore_is_exact() {
        let original = hoverable();
        let mut styles = original.clone();
        styles.apply_overlays(&[StateKind::Hover]);
        assert_eq!(styles.background(), Color::BLUE);
        styles.restore_overlays();
        assert_eq!(styles, original);
        styles.restore_overlays();
        assert_eq!(styles, original);
    }

    #[test]
    fn later_priority_wins_and_restores_first_value() {
        let original = hoverable();
        let mut styles = original.clone();
        styles.apply_overlays(&[StateKind::Active, StateKind::Hover]);
        assert_eq!(styles.applied_states(), &[StateKind::Hover, StateKind::Active]);
        assert_eq!(styles.background(), Color::GREEN);
        assert_eq!(styles.opacity(), 0.5);
        styles.restore_overlays();
        assert_eq!(styles, original);
    }

    #[test]
    fn outdated_tracks_active_set() {
        let mut styles = hoverable();
        assert!(!styles.overlays_outdated(&[]));
        assert!(styles.overlays_outdated(&[StateKind::Hover]));
        styles.apply_overlays(&[StateKind::Hover]);
        assert!(!styles.overlays_outdated(&[StateKind::Hover]));
        // Focus has no overlay, so it does not count.
        assert!(!styles.overlays_outdated(&[StateKind::Hover, StateKind::Focus]));
    }

    #[test]
    fn explicit_write_during_overlay_survives_restore() {
        let mut styles = hoverable();
        styles.apply_overlays(&[StateKind::Hover]);
        styles.set(Property::Background, Color::YELLOW).unwrap();
        assert_eq!(styles.background(), Color::YELLOW);
        styles.restore_overlays();
        assert_eq!(styles.background(), Color::YELLOW);
    }

    #[test]
    fn overlay_on_unset_property_restores_to_unset() {
        let mut styles =
            Styles::new().with_state(StateKind::Focus, Styles::new().with_scale(1.1));
        styles.apply_overlays(&[StateKind::Focus]);
        assert_eq!(styles.scale(), 1.1);
        styles.restore_overlays();
        assert_eq!(styles.get(Property::Scale), None);
    }

    #[test]
    fn state_styles_merge() {
        let mut styles = Styles::new();
        styles.set_state_style(StateKind::Hover, Styles::new().with_color(Color::RED));
        styles.set_state_style(StateKind::Hover, Styles::new().with_scale(2.0));
        let overlay = styles.state_style(StateKind::Hover).unwrap();
        assert_eq!(overlay.color(), Color::RED);
        assert_eq!(overlay.scale(), 2.0);
    }
}
