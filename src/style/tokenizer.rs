//! logos-based tokenizer for style value strings.
//!
//! Token priority in logos is longest-match first, so `10px` lexes as a single
//! [`Token::Dimension`] rather than `Number` + `Ident`, and `#ff00aa` as one
//! [`Token::HexColor`]. Anything that fails to lex is an error: value strings
//! are short and a stray character always means a malformed value.

use logos::Logos;

use super::parse::StyleError;

/// Style value token.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `#` followed by hex digits. Digit count is validated by the parser.
    #[regex(r"#[0-9a-fA-F]+")]
    HexColor,

    /// Number with a unit: `10px`, `50%`, `1.5em`, `2rem`.
    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)(px|%|em|rem)")]
    Dimension,

    /// Bare number, possibly negative or fractional.
    #[regex(r"-?([0-9]+(\.[0-9]+)?|\.[0-9]+)")]
    Number,

    /// Quoted string, single or double.
    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    StringLiteral,

    /// Keyword or color name.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(",")]
    Comma,
}

/// Tokenize a value string into `(Token, slice)` pairs.
pub fn tokenize(input: &str) -> Result<Vec<(Token, &str)>, StyleError> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.slice())),
            Err(()) => {
                return Err(StyleError::Lex {
                    input: input.to_string(),
                    offset: lexer.span().start,
                })
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .map(|t| t.into_iter().map(|(k, _)| k).collect())
            .unwrap_or_default()
    }

    // ── Numbers and dimensions ───────────────────────────────────────

    #[test]
    fn dimensions_are_single_tokens() {
        let tokens = tokenize("10px 50% 1.5em 2rem -4px .5em").unwrap();
        assert!(tokens.iter().all(|(k, _)| *k == Token::Dimension));
        assert_eq!(tokens[1].1, "50%");
        assert_eq!(tokens[4].1, "-4px");
    }

    #[test]
    fn bare_numbers() {
        assert_eq!(kinds("0 -3 2.25"), vec![Token::Number; 3]);
    }

    #[test]
    fn unknown_unit_splits() {
        assert_eq!(kinds("10pt"), vec![Token::Number, Token::Ident]);
    }

    // ── Colors and functions ─────────────────────────────────────────

    #[test]
    fn hex_and_function_tokens() {
        assert_eq!(
            kinds("#fff rgb(1, 2, 3)"),
            vec![
                Token::HexColor,
                Token::Ident,
                Token::ParenOpen,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn quoted_strings() {
        let tokens = tokenize(r#""Fira Sans" 'mono'"#).unwrap();
        assert_eq!(tokens[0], (Token::StringLiteral, r#""Fira Sans""#));
        assert_eq!(tokens[1], (Token::StringLiteral, "'mono'"));
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn stray_character_is_an_error() {
        let err = tokenize("10%%").unwrap_err();
        assert_eq!(
            err,
            StyleError::Lex { input: "10%%".into(), offset: 3 }
        );
    }

    #[test]
    fn bare_hash_is_an_error() {
        assert!(tokenize("#zzz").is_err());
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(tokenize("  \t ").unwrap().is_empty());
    }
}
