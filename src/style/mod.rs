//! Style system: typed values, parsing, property bags, and the cascade.

pub mod cascade;
pub mod parse;
pub mod property;
pub mod styles;
pub mod tokenizer;
pub mod value;

pub use cascade::{resolve, resolve_tree, ResolvedContext};
pub use parse::{parse_value, StyleError};
pub use property::Property;
pub use styles::{Entry, Source, Styles};
pub use value::{
    Align, Border, BorderStyle, Color, FlexDirection, Justify, Length, LineHeight, Shadow,
    StyleValue, TextAlign, ROOT_FONT_SIZE,
};
