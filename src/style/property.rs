//! The closed set of style properties.

use std::fmt;

use crate::geometry::EdgeInsets;

use super::value::{
    Align, Border, Color, FlexDirection, Justify, Length, LineHeight, Shadow, StyleValue,
    TextAlign, ROOT_FONT_SIZE,
};

/// A style property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Property {
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
    Margin,
    Padding,
    FlexDirection,
    JustifyContent,
    AlignItems,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    TextAlign,
    Color,
    Background,
    Border,
    BorderRadius,
    Shadow,
    Opacity,
    Scale,
}

impl Property {
    /// Every property, in declaration order.
    pub const ALL: [Property; 23] = [
        Property::Width,
        Property::Height,
        Property::MinWidth,
        Property::MaxWidth,
        Property::MinHeight,
        Property::MaxHeight,
        Property::Margin,
        Property::Padding,
        Property::FlexDirection,
        Property::JustifyContent,
        Property::AlignItems,
        Property::FontFamily,
        Property::FontSize,
        Property::FontWeight,
        Property::LineHeight,
        Property::TextAlign,
        Property::Color,
        Property::Background,
        Property::Border,
        Property::BorderRadius,
        Property::Shadow,
        Property::Opacity,
        Property::Scale,
    ];

    /// Properties copied from parent to child during resolution.
    ///
    /// Opacity is absent: it composes multiplicatively instead.
    pub const INHERITED: [Property; 6] = [
        Property::FontFamily,
        Property::FontSize,
        Property::FontWeight,
        Property::Color,
        Property::LineHeight,
        Property::Background,
    ];

    /// Kebab-case name, as written in style strings.
    pub fn name(self) -> &'static str {
        match self {
            Property::Width => "width",
            Property::Height => "height",
            Property::MinWidth => "min-width",
            Property::MaxWidth => "max-width",
            Property::MinHeight => "min-height",
            Property::MaxHeight => "max-height",
            Property::Margin => "margin",
            Property::Padding => "padding",
            Property::FlexDirection => "flex-direction",
            Property::JustifyContent => "justify-content",
            Property::AlignItems => "align-items",
            Property::FontFamily => "font-family",
            Property::FontSize => "font-size",
            Property::FontWeight => "font-weight",
            Property::LineHeight => "line-height",
            Property::TextAlign => "text-align",
            Property::Color => "color",
            Property::Background => "background",
            Property::Border => "border",
            Property::BorderRadius => "border-radius",
            Property::Shadow => "shadow",
            Property::Opacity => "opacity",
            Property::Scale => "scale",
        }
    }

    /// Look up a property by kebab-case (`font-size`) or camelCase (`fontSize`) name.
    pub fn from_name(name: &str) -> Option<Property> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Property::ALL.into_iter().find(|p| p.name().replace('-', "") == normalized)
    }

    /// Whether this property participates in inheritance.
    pub fn is_inherited(self) -> bool {
        Property::INHERITED.contains(&self)
    }

    /// The value an unset property reads as.
    pub fn default_value(self) -> StyleValue {
        match self {
            Property::Width
            | Property::Height
            | Property::MaxWidth
            | Property::MaxHeight => StyleValue::Length(Length::Auto),
            Property::MinWidth | Property::MinHeight => StyleValue::Length(Length::Px(0.0)),
            Property::Margin | Property::Padding => StyleValue::Insets(EdgeInsets::ZERO),
            Property::FlexDirection => StyleValue::Direction(FlexDirection::Row),
            Property::JustifyContent => StyleValue::Justify(Justify::Start),
            Property::AlignItems => StyleValue::Align(Align::Stretch),
            Property::FontFamily => StyleValue::FontFamily("sans-serif".into()),
            Property::FontSize => StyleValue::Length(Length::Px(ROOT_FONT_SIZE)),
            Property::FontWeight => StyleValue::Number(400.0),
            Property::LineHeight => StyleValue::LineHeight(LineHeight::Multiplier(1.2)),
            Property::TextAlign => StyleValue::TextAlign(TextAlign::Left),
            Property::Color => StyleValue::Color(Color::BLACK),
            Property::Background => StyleValue::Color(Color::TRANSPARENT),
            Property::Border => StyleValue::Border(Border::default()),
            Property::BorderRadius => StyleValue::Length(Length::Px(0.0)),
            Property::Shadow => StyleValue::Shadow(Shadow::default()),
            Property::Opacity | Property::Scale => StyleValue::Number(1.0),
        }
    }

    /// Whether `value` has a shape this property can hold. `Raw` is always accepted.
    pub fn accepts(self, value: &StyleValue) -> bool {
        use StyleValue as V;
        match (self, value) {
            (_, V::Raw(_)) => true,
            (
                Property::Width
                | Property::Height
                | Property::MinWidth
                | Property::MaxWidth
                | Property::MinHeight
                | Property::MaxHeight
                | Property::FontSize
                | Property::BorderRadius,
                V::Length(_),
            ) => true,
            (Property::Margin | Property::Padding, V::Insets(_)) => true,
            (Property::FlexDirection, V::Direction(_)) => true,
            (Property::JustifyContent, V::Justify(_)) => true,
            (Property::AlignItems, V::Align(_)) => true,
            (Property::FontFamily, V::FontFamily(_)) => true,
            (Property::FontWeight | Property::Opacity | Property::Scale, V::Number(_)) => true,
            (Property::LineHeight, V::LineHeight(_)) => true,
            (Property::TextAlign, V::TextAlign(_)) => true,
            (Property::Color | Property::Background, V::Color(_)) => true,
            (Property::Border, V::Border(_)) => true,
            (Property::Shadow, V::Shadow(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_lookup() {
        for prop in Property::ALL {
            assert_eq!(Property::from_name(prop.name()), Some(prop));
        }
    }

    #[test]
    fn camel_case_lookup() {
        assert_eq!(Property::from_name("fontSize"), Some(Property::FontSize));
        assert_eq!(Property::from_name("flexDirection"), Some(Property::FlexDirection));
        assert_eq!(Property::from_name("zIndex"), None);
    }

    #[test]
    fn inherited_set_excludes_opacity() {
        assert!(Property::Color.is_inherited());
        assert!(Property::Background.is_inherited());
        assert!(!Property::Opacity.is_inherited());
        assert!(!Property::Width.is_inherited());
    }

    #[test]
    fn defaults_are_accepted() {
        for prop in Property::ALL {
            assert!(prop.accepts(&prop.default_value()), "{prop}");
        }
    }

    #[test]
    fn mismatched_shapes_rejected() {
        assert!(!Property::Width.accepts(&StyleValue::Color(Color::RED)));
        assert!(!Property::Opacity.accepts(&StyleValue::Length(Length::Px(1.0))));
        assert!(Property::Opacity.accepts(&StyleValue::Raw("50%".into())));
    }
}
