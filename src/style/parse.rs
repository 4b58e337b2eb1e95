//! Value parsing: style strings → typed [`StyleValue`]s.

use crate::geometry::EdgeInsets;

use super::property::Property;
use super::tokenizer::{tokenize, Token};
use super::value::{
    Align, Border, BorderStyle, Color, FlexDirection, Justify, Length, LineHeight, Shadow,
    StyleValue, TextAlign, ROOT_FONT_SIZE,
};

/// Errors from style parsing and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("unexpected character at offset {offset} in `{input}`")]
    Lex { input: String, offset: usize },
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: Property, message: String },
    #[error("{property} cannot hold a {found} value")]
    TypeMismatch {
        property: Property,
        found: &'static str,
    },
}

type Tokens<'a> = [(Token, &'a str)];

/// Parse `input` as a value for `property`.
pub fn parse_value(property: Property, input: &str) -> Result<StyleValue, StyleError> {
    let tokens = tokenize(input)?;
    parse_tokens(property, input, &tokens)
        .map_err(|message| StyleError::InvalidValue { property, message })
}

fn parse_tokens(property: Property, input: &str, tokens: &Tokens<'_>) -> Result<StyleValue, String> {
    if tokens.is_empty() {
        return Err("empty value".into());
    }
    let value = match property {
        Property::Width
        | Property::Height
        | Property::MinWidth
        | Property::MaxWidth
        | Property::MinHeight
        | Property::MaxHeight
        | Property::FontSize
        | Property::BorderRadius => StyleValue::Length(parse_length(single(tokens)?)?),
        Property::Margin | Property::Padding => StyleValue::Insets(parse_insets(tokens)?),
        Property::FlexDirection => StyleValue::Direction(match keyword(tokens)?.as_str() {
            "row" => FlexDirection::Row,
            "column" => FlexDirection::Column,
            other => return Err(format!("unknown flex direction `{other}`")),
        }),
        Property::JustifyContent => StyleValue::Justify(match keyword(tokens)?.as_str() {
            "start" | "flex-start" => Justify::Start,
            "center" => Justify::Center,
            "end" | "flex-end" => Justify::End,
            "space-between" => Justify::SpaceBetween,
            other => return Err(format!("unknown justification `{other}`")),
        }),
        Property::AlignItems => StyleValue::Align(match keyword(tokens)?.as_str() {
            "start" | "flex-start" => Align::Start,
            "center" => Align::Center,
            "end" | "flex-end" => Align::End,
            "stretch" => Align::Stretch,
            other => return Err(format!("unknown alignment `{other}`")),
        }),
        Property::TextAlign => StyleValue::TextAlign(match keyword(tokens)?.as_str() {
            "left" => TextAlign::Left,
            "center" => TextAlign::Center,
            "right" => TextAlign::Right,
            other => return Err(format!("unknown text alignment `{other}`")),
        }),
        Property::FontFamily => StyleValue::FontFamily(match tokens {
            [(Token::StringLiteral, text)] => text[1..text.len() - 1].to_string(),
            _ => input.trim().to_string(),
        }),
        Property::FontWeight => StyleValue::Number(match single(tokens)? {
            (Token::Number, text) => number(text)?,
            (Token::Ident, text) if text.eq_ignore_ascii_case("normal") => 400.0,
            (Token::Ident, text) if text.eq_ignore_ascii_case("bold") => 700.0,
            (_, text) => return Err(format!("expected a font weight, got `{text}`")),
        }),
        Property::Opacity | Property::Scale => StyleValue::Number(parse_factor(single(tokens)?)?),
        Property::LineHeight => StyleValue::LineHeight(match single(tokens)? {
            (Token::Number, text) => LineHeight::Multiplier(number(text)?),
            (Token::Ident, text) if text.eq_ignore_ascii_case("normal") => {
                LineHeight::Multiplier(1.2)
            }
            token => LineHeight::Length(parse_length(token)?),
        }),
        Property::Color | Property::Background => {
            let (color, next) = color_at(tokens, 0)?;
            expect_end(tokens, next)?;
            StyleValue::Color(color)
        }
        Property::Border => StyleValue::Border(parse_border(tokens)?),
        Property::Shadow => StyleValue::Shadow(parse_shadow(tokens)?),
    };
    Ok(value)
}

// ---------------------------------------------------------------------------
// Scalars
// ---------------------------------------------------------------------------

fn single<'a>(tokens: &Tokens<'a>) -> Result<(Token, &'a str), String> {
    match tokens {
        [token] => Ok(*token),
        _ => Err(format!("expected a single value, got {} tokens", tokens.len())),
    }
}

fn keyword(tokens: &Tokens<'_>) -> Result<String, String> {
    match single(tokens)? {
        (Token::Ident, text) => Ok(text.to_ascii_lowercase()),
        (_, text) => Err(format!("expected a keyword, got `{text}`")),
    }
}

fn number(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| format!("invalid number `{text}`"))
}

fn split_unit(text: &str) -> (&str, &str) {
    let at = text
        .find(|c: char| c.is_ascii_alphabetic() || c == '%')
        .unwrap_or(text.len());
    text.split_at(at)
}

/// Parse a length. Bare numbers are pixels.
pub(crate) fn parse_length((token, text): (Token, &str)) -> Result<Length, String> {
    match token {
        Token::Number => Ok(Length::Px(number(text)?)),
        Token::Dimension => {
            let (value, unit) = split_unit(text);
            let value = number(value)?;
            match unit {
                "px" => Ok(Length::Px(value)),
                "%" => Ok(Length::Percent(value)),
                "em" => Ok(Length::Em(value)),
                "rem" => Ok(Length::Rem(value)),
                other => Err(format!("unknown unit `{other}`")),
            }
        }
        Token::Ident if text.eq_ignore_ascii_case("auto") => Ok(Length::Auto),
        _ => Err(format!("expected a length, got `{text}`")),
    }
}

/// A unitless factor; percentages are divided by 100.
fn parse_factor(token: (Token, &str)) -> Result<f64, String> {
    match token {
        (Token::Number, text) => number(text),
        (Token::Dimension, text) => match split_unit(text) {
            (value, "%") => Ok(number(value)? / 100.0),
            _ => Err(format!("expected a number or percentage, got `{text}`")),
        },
        (_, text) => Err(format!("expected a number, got `{text}`")),
    }
}

/// A pixel distance: bare number, `px`, or `rem`.
fn pixels(token: (Token, &str)) -> Result<f64, String> {
    match parse_length(token)? {
        Length::Px(v) => Ok(v),
        Length::Rem(v) => Ok(v * ROOT_FONT_SIZE),
        other => Err(format!("expected a pixel value, got `{other}`")),
    }
}

/// Parse 1-4 pixel values into [`EdgeInsets`] (CSS shorthand).
///
/// - 1 value: all sides
/// - 2 values: vertical, horizontal
/// - 3 values: top, horizontal, bottom
/// - 4 values: top, right, bottom, left
pub(crate) fn parse_insets(tokens: &Tokens<'_>) -> Result<EdgeInsets, String> {
    let values = tokens
        .iter()
        .map(|t| pixels(*t))
        .collect::<Result<Vec<_>, _>>()?;
    match values[..] {
        [all] => Ok(EdgeInsets::all(all)),
        [vertical, horizontal] => Ok(EdgeInsets::symmetric(vertical, horizontal)),
        [top, horizontal, bottom] => Ok(EdgeInsets::new(top, horizontal, bottom, horizontal)),
        [top, right, bottom, left] => Ok(EdgeInsets::new(top, right, bottom, left)),
        _ => Err(format!("expected 1-4 values, got {}", values.len())),
    }
}

fn expect_end(tokens: &Tokens<'_>, at: usize) -> Result<(), String> {
    match tokens.get(at) {
        None => Ok(()),
        Some((_, text)) => Err(format!("unexpected trailing `{text}`")),
    }
}

// ---------------------------------------------------------------------------
// Colors
// ---------------------------------------------------------------------------

/// Parse a color starting at `tokens[at]`, returning it and the index after it.
fn color_at(tokens: &Tokens<'_>, at: usize) -> Result<(Color, usize), String> {
    match tokens.get(at) {
        Some((Token::HexColor, text)) => Ok((parse_hex(text)?, at + 1)),
        Some((Token::Ident, name)) if matches!(tokens.get(at + 1), Some((Token::ParenOpen, _))) => {
            parse_rgb_function(name, tokens, at + 2)
        }
        Some((Token::Ident, name)) => Color::named(name)
            .map(|c| (c, at + 1))
            .ok_or_else(|| format!("unknown color `{name}`")),
        Some((_, text)) => Err(format!("expected a color, got `{text}`")),
        None => Err("expected a color".into()),
    }
}

/// `#rgb`, `#rgba`, `#rrggbb`, or `#rrggbbaa`.
pub(crate) fn parse_hex(text: &str) -> Result<Color, String> {
    let digits = text.trim_start_matches('#');
    let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
    let parsed = match digits.len() {
        3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
        4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
        6 => (byte(0), byte(2), byte(4), Ok(255)),
        8 => (byte(0), byte(2), byte(4), byte(6)),
        n => return Err(format!("hex color `{text}` has {n} digits")),
    };
    match parsed {
        (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Color::rgba(r, g, b, a)),
        _ => Err(format!("invalid hex color `{text}`")),
    }
}

/// `rgb(r, g, b)` or `rgba(r, g, b, a)` with alpha in `0..=1`.
fn parse_rgb_function(name: &str, tokens: &Tokens<'_>, mut at: usize) -> Result<(Color, usize), String> {
    let wants_alpha = match name.to_ascii_lowercase().as_str() {
        "rgb" => false,
        "rgba" => true,
        _ => return Err(format!("unknown color function `{name}`")),
    };
    let mut args = Vec::new();
    loop {
        match tokens.get(at) {
            Some((Token::Number, text)) => args.push(number(text)?),
            Some((_, text)) => return Err(format!("unexpected `{text}` in {name}()")),
            None => return Err(format!("unterminated {name}()")),
        }
        at += 1;
        match tokens.get(at) {
            Some((Token::Comma, _)) => at += 1,
            Some((Token::ParenClose, _)) => break,
            _ => return Err(format!("malformed {name}()")),
        }
    }
    let expected = if wants_alpha { 4 } else { 3 };
    if args.len() != expected {
        return Err(format!("{name}() takes {expected} arguments, got {}", args.len()));
    }
    let channel = |v: f64| {
        if (0.0..=255.0).contains(&v) {
            Ok(v.round() as u8)
        } else {
            Err(format!("channel {v} out of range"))
        }
    };
    let alpha = match args.get(3) {
        Some(a) if (0.0..=1.0).contains(a) => (a * 255.0).round() as u8,
        Some(a) => return Err(format!("alpha {a} out of range")),
        None => 255,
    };
    let color = Color::rgba(channel(args[0])?, channel(args[1])?, channel(args[2])?, alpha);
    Ok((color, at + 1))
}

// ---------------------------------------------------------------------------
// Compound values
// ---------------------------------------------------------------------------

/// `none`, or any order of width, line style, and color: `1px solid red`.
///
/// A width without a style implies `solid`.
fn parse_border(tokens: &Tokens<'_>) -> Result<Border, String> {
    if let [(Token::Ident, text)] = tokens {
        if text.eq_ignore_ascii_case("none") {
            return Ok(Border::default());
        }
    }
    let mut width = None;
    let mut style = None;
    let mut color = None;
    let mut at = 0;
    while at < tokens.len() {
        match tokens[at] {
            token @ ((Token::Number | Token::Dimension), _) if width.is_none() => {
                width = Some(pixels(token)?);
                at += 1;
            }
            (Token::Ident, text) if style.is_none() && BorderStyle::from_name(text).is_some() => {
                style = BorderStyle::from_name(text);
                at += 1;
            }
            _ if color.is_none() => {
                let (parsed, next) = color_at(tokens, at)?;
                color = Some(parsed);
                at = next;
            }
            (_, text) => return Err(format!("unexpected `{text}` in border")),
        }
    }
    let width = width.unwrap_or(1.0);
    Ok(Border {
        width: EdgeInsets::all(width),
        style: style.unwrap_or(BorderStyle::Solid),
        color: color.unwrap_or(Color::BLACK),
    })
}

/// `none`, or `x y [blur] [color]`.
fn parse_shadow(tokens: &Tokens<'_>) -> Result<Shadow, String> {
    if let [(Token::Ident, text)] = tokens {
        if text.eq_ignore_ascii_case("none") {
            return Ok(Shadow::default());
        }
    }
    let mut lengths = Vec::new();
    let mut at = 0;
    while let Some(token @ ((Token::Number | Token::Dimension), _)) = tokens.get(at).copied() {
        lengths.push(pixels(token)?);
        at += 1;
    }
    let (offset_x, offset_y, blur) = match lengths[..] {
        [x, y] => (x, y, 0.0),
        [x, y, blur] => (x, y, blur),
        _ => return Err(format!("shadow takes 2 or 3 lengths, got {}", lengths.len())),
    };
    let color = if at < tokens.len() {
        let (color, next) = color_at(tokens, at)?;
        expect_end(tokens, next)?;
        color
    } else {
        Color::rgba(0, 0, 0, 128)
    };
    Ok(Shadow { offset_x, offset_y, blur, color })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(property: Property, input: &str) -> StyleValue {
        parse_value(property, input).unwrap()
    }

    // ── Lengths ──────────────────────────────────────────────────────

    #[test]
    fn lengths_with_units() {
        assert_eq!(parse(Property::Width, "120px"), StyleValue::Length(Length::Px(120.0)));
        assert_eq!(parse(Property::Width, "120"), StyleValue::Length(Length::Px(120.0)));
        assert_eq!(parse(Property::Width, "50%"), StyleValue::Length(Length::Percent(50.0)));
        assert_eq!(parse(Property::FontSize, "1.5em"), StyleValue::Length(Length::Em(1.5)));
        assert_eq!(parse(Property::Height, "auto"), StyleValue::Length(Length::Auto));
    }

    #[test]
    fn malformed_percentage_is_rejected() {
        assert!(matches!(
            parse_value(Property::Width, "50%%"),
            Err(StyleError::Lex { .. })
        ));
        assert!(matches!(
            parse_value(Property::Width, "abc%"),
            Err(StyleError::Lex { .. })
        ));
    }

    #[test]
    fn malformed_em_is_rejected() {
        let err = parse_value(Property::FontSize, "1.2.3em").unwrap_err();
        assert!(matches!(err, StyleError::InvalidValue { property: Property::FontSize, .. }));
    }

    #[test]
    fn empty_value_is_rejected() {
        assert!(parse_value(Property::Width, "   ").is_err());
    }

    // ── Insets ───────────────────────────────────────────────────────

    #[test]
    fn inset_shorthand() {
        assert_eq!(parse(Property::Padding, "4"), StyleValue::Insets(EdgeInsets::all(4.0)));
        assert_eq!(
            parse(Property::Margin, "8px 16px"),
            StyleValue::Insets(EdgeInsets::symmetric(8.0, 16.0))
        );
        assert_eq!(
            parse(Property::Margin, "1 2 3"),
            StyleValue::Insets(EdgeInsets::new(1.0, 2.0, 3.0, 2.0))
        );
        assert_eq!(
            parse(Property::Margin, "16 0 8 0"),
            StyleValue::Insets(EdgeInsets::new(16.0, 0.0, 8.0, 0.0))
        );
        assert!(parse_value(Property::Margin, "1 2 3 4 5").is_err());
        assert!(parse_value(Property::Padding, "10%").is_err());
    }

    // ── Colors ───────────────────────────────────────────────────────

    #[test]
    fn hex_colors() {
        assert_eq!(parse(Property::Color, "#f00"), StyleValue::Color(Color::RED));
        assert_eq!(parse(Property::Color, "#0000ff"), StyleValue::Color(Color::BLUE));
        assert_eq!(
            parse(Property::Background, "#00000080"),
            StyleValue::Color(Color::rgba(0, 0, 0, 128))
        );
    }

    #[test]
    fn bad_hex_length_is_rejected() {
        assert!(parse_value(Property::Color, "#12345").is_err());
    }

    #[test]
    fn named_and_functional_colors() {
        assert_eq!(parse(Property::Background, "navy"), StyleValue::Color(Color::NAVY));
        assert_eq!(
            parse(Property::Background, "rgb(1, 2, 3)"),
            StyleValue::Color(Color::rgb(1, 2, 3))
        );
        assert_eq!(
            parse(Property::Background, "rgba(255, 0, 0, 0.5)"),
            StyleValue::Color(Color::rgba(255, 0, 0, 128))
        );
        assert!(parse_value(Property::Background, "rgb(1, 2)").is_err());
        assert!(parse_value(Property::Background, "rgb(1, 2, 300)").is_err());
        assert!(parse_value(Property::Color, "notacolor").is_err());
    }

    // ── Keywords and numbers ─────────────────────────────────────────

    #[test]
    fn keywords() {
        assert_eq!(
            parse(Property::FlexDirection, "column"),
            StyleValue::Direction(FlexDirection::Column)
        );
        assert_eq!(
            parse(Property::JustifyContent, "space-between"),
            StyleValue::Justify(Justify::SpaceBetween)
        );
        assert_eq!(parse(Property::AlignItems, "flex-end"), StyleValue::Align(Align::End));
        assert!(parse_value(Property::FlexDirection, "diagonal").is_err());
    }

    #[test]
    fn factors_and_weights() {
        assert_eq!(parse(Property::Opacity, "0.5"), StyleValue::Number(0.5));
        assert_eq!(parse(Property::Opacity, "25%"), StyleValue::Number(0.25));
        assert_eq!(parse(Property::FontWeight, "bold"), StyleValue::Number(700.0));
        assert!(parse_value(Property::Scale, "2px").is_err());
    }

    #[test]
    fn line_heights() {
        assert_eq!(
            parse(Property::LineHeight, "1.5"),
            StyleValue::LineHeight(LineHeight::Multiplier(1.5))
        );
        assert_eq!(
            parse(Property::LineHeight, "20px"),
            StyleValue::LineHeight(LineHeight::Length(Length::Px(20.0)))
        );
    }

    #[test]
    fn font_family_strips_quotes() {
        assert_eq!(
            parse(Property::FontFamily, "'Fira Sans'"),
            StyleValue::FontFamily("Fira Sans".into())
        );
        assert_eq!(
            parse(Property::FontFamily, "monospace"),
            StyleValue::FontFamily("monospace".into())
        );
    }

    // ── Border and shadow ────────────────────────────────────────────

    #[test]
    fn borders() {
        assert_eq!(
            parse(Property::Border, "2px dashed #f00"),
            StyleValue::Border(Border {
                width: EdgeInsets::all(2.0),
                style: BorderStyle::Dashed,
                color: Color::RED,
            })
        );
        assert_eq!(
            parse(Property::Border, "blue 3"),
            StyleValue::Border(Border::solid(3.0, Color::BLUE))
        );
        assert_eq!(parse(Property::Border, "none"), StyleValue::Border(Border::default()));
        assert!(parse_value(Property::Border, "1px wavy red").is_err());
    }

    #[test]
    fn shadows() {
        assert_eq!(
            parse(Property::Shadow, "2px 4px 6px black"),
            StyleValue::Shadow(Shadow {
                offset_x: 2.0,
                offset_y: 4.0,
                blur: 6.0,
                color: Color::BLACK,
            })
        );
        assert!(parse_value(Property::Shadow, "2px").is_err());
    }
}
