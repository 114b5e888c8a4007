//! SPDX license expression parser.
//!
//! Recursive descent over the grammar
//!
//! ```text
//! or-expr   := and-expr ( OR and-expr )*
//! and-expr  := with-expr ( AND with-expr )*
//! with-expr := atom [ WITH exception ] | "(" or-expr ")"
//! ```
//!
//! `AND` and `OR` are left-associative. Operators are accepted in all-upper
//! or all-lower case.

use crate::error::LicenseParseError;
use crate::model::{LicenseExpression, LicenseField, NOASSERTION, NONE};
use regex::Regex;
use std::sync::LazyLock;

static IDSTRING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9.\-]+\+?$").expect("static regex"));

static DOCUMENT_LICENSE_REF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^DocumentRef-[A-Za-z0-9.\-]+:LicenseRef-[A-Za-z0-9.\-]+$").expect("static regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
enum Lexeme<'a> {
    Open,
    Close,
    And,
    Or,
    With,
    Word(&'a str),
}

impl Lexeme<'_> {
    fn describe(&self) -> String {
        match self {
            Self::Open => "'('".to_string(),
            Self::Close => "')'".to_string(),
            Self::And => "AND".to_string(),
            Self::Or => "OR".to_string(),
            Self::With => "WITH".to_string(),
            Self::Word(w) => format!("'{w}'"),
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '+' | ':')
}

fn scan(input: &str) -> Result<Vec<(usize, Lexeme<'_>)>, LicenseParseError> {
    let mut out = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some(&(pos, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '(' {
            chars.next();
            out.push((pos, Lexeme::Open));
        } else if c == ')' {
            chars.next();
            out.push((pos, Lexeme::Close));
        } else if is_word_char(c) {
            let mut end = pos;
            while let Some(&(i, c)) = chars.peek() {
                if !is_word_char(c) {
                    break;
                }
                end = i + c.len_utf8();
                chars.next();
            }
            let word = &input[pos..end];
            let lexeme = match word {
                "AND" | "and" => Lexeme::And,
                "OR" | "or" => Lexeme::Or,
                "WITH" | "with" => Lexeme::With,
                _ => Lexeme::Word(word),
            };
            out.push((pos, lexeme));
        } else {
            return Err(LicenseParseError::new(
                input,
                pos,
                format!("unexpected character '{c}'"),
            ));
        }
    }
    Ok(out)
}

struct Parser<'a> {
    input: &'a str,
    lexemes: Vec<(usize, Lexeme<'a>)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Lexeme<'a>> {
        self.lexemes.get(self.pos).map(|(_, l)| l)
    }

    /// Byte offset of the next lexeme, or end of input
    fn offset(&self) -> usize {
        self.lexemes
            .get(self.pos)
            .map_or(self.input.len(), |(offset, _)| *offset)
    }

    fn error(&self, message: impl Into<String>) -> LicenseParseError {
        LicenseParseError::new(self.input, self.offset(), message)
    }

    fn unexpected(&self, expected: &str) -> LicenseParseError {
        match self.peek() {
            Some(lexeme) => self.error(format!("expected {expected}, found {}", lexeme.describe())),
            None => self.error(format!("expected {expected}, found end of expression")),
        }
    }

    fn or_expr(&mut self) -> Result<LicenseExpression, LicenseParseError> {
        let mut left = self.and_expr()?;
        while self.peek() == Some(&Lexeme::Or) {
            self.pos += 1;
            let right = self.and_expr()?;
            left = LicenseExpression::or(left, right);
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<LicenseExpression, LicenseParseError> {
        let mut left = self.with_expr()?;
        while self.peek() == Some(&Lexeme::And) {
            self.pos += 1;
            let right = self.with_expr()?;
            left = LicenseExpression::and(left, right);
        }
        Ok(left)
    }

    fn with_expr(&mut self) -> Result<LicenseExpression, LicenseParseError> {
        match self.peek() {
            Some(Lexeme::Open) => {
                self.pos += 1;
                let inner = self.or_expr()?;
                if self.peek() != Some(&Lexeme::Close) {
                    return Err(self.unexpected("')'"));
                }
                self.pos += 1;
                if self.peek() == Some(&Lexeme::With) {
                    return Err(self.error("WITH applies to a single license, not a group"));
                }
                Ok(LicenseExpression::parenthesized(inner))
            }
            Some(Lexeme::Word(word)) => {
                let word = *word;
                let license = self.atom(word)?;
                self.pos += 1;
                if self.peek() != Some(&Lexeme::With) {
                    return Ok(license);
                }
                self.pos += 1;
                let exception = match self.peek() {
                    Some(Lexeme::Word(exception)) if IDSTRING_RE.is_match(exception) => *exception,
                    _ => return Err(self.unexpected("exception identifier")),
                };
                self.pos += 1;
                LicenseExpression::with(license, exception)
                    .ok_or_else(|| self.error("WITH applies to a single license"))
            }
            _ => Err(self.unexpected("license identifier or '('")),
        }
    }

    fn atom(&self, word: &str) -> Result<LicenseExpression, LicenseParseError> {
        if word == NOASSERTION || word == NONE {
            return Err(self.error(format!("{word} is only valid as the entire field")));
        }
        if word.contains(':') {
            if !DOCUMENT_LICENSE_REF_RE.is_match(word) {
                return Err(self.error(format!(
                    "'{word}' is not of the form DocumentRef-x:LicenseRef-y"
                )));
            }
        } else if !IDSTRING_RE.is_match(word) {
            return Err(self.error(format!("'{word}' is not a valid license identifier")));
        }
        Ok(LicenseExpression::atom(word))
    }
}

/// Parse a license expression.
///
/// A fully parenthesized expression is unwrapped: `(A AND B)` yields the
/// same tree as `A AND B`. Inner groups keep their
/// [`LicenseExpression::Parenthesized`] node.
///
/// # Errors
///
/// Returns a [`LicenseParseError`] carrying the byte offset of the first
/// offending lexeme.
pub fn parse_license_expression(input: &str) -> Result<LicenseExpression, LicenseParseError> {
    let lexemes = scan(input)?;
    if lexemes.is_empty() {
        return Err(LicenseParseError::new(input, 0, "empty license expression"));
    }
    let mut parser = Parser {
        input,
        lexemes,
        pos: 0,
    };
    let expr = parser.or_expr()?;
    if parser.peek().is_some() {
        return Err(parser.unexpected("AND, OR or end of expression"));
    }
    Ok(expr.unparenthesized().clone())
}

/// Parse a license-bearing field value. Never fails: sentinels are
/// recognized first and malformed expressions become
/// [`LicenseField::Unparseable`].
#[must_use]
pub fn parse_license_field(raw: &str) -> LicenseField {
    match raw.trim() {
        NOASSERTION => LicenseField::NoAssertion,
        NONE => LicenseField::None,
        trimmed => match parse_license_expression(trimmed) {
            Ok(expr) => LicenseField::Expression(expr),
            Err(error) => LicenseField::Unparseable {
                raw: trimmed.to_string(),
                error,
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> LicenseExpression {
        LicenseExpression::atom(s)
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        let expr = parse_license_expression("A AND B OR C").unwrap();
        assert_eq!(expr, LicenseExpression::or(LicenseExpression::and(id("A"), id("B")), id("C")));

        let expr = parse_license_expression("A OR B AND C").unwrap();
        assert_eq!(expr, LicenseExpression::or(id("A"), LicenseExpression::and(id("B"), id("C"))));
    }

    #[test]
    fn test_left_associative_chains() {
        let expr = parse_license_expression("A AND B AND C").unwrap();
        assert_eq!(
            expr,
            LicenseExpression::and(LicenseExpression::and(id("A"), id("B")), id("C"))
        );
    }

    #[test]
    fn test_outer_parentheses_unwrapped() {
        let expr = parse_license_expression("(LicenseRef-2.0 and Apache-2.0)").unwrap();
        assert_eq!(expr, LicenseExpression::and(id("LicenseRef-2.0"), id("Apache-2.0")));
        assert_eq!(expr.to_string(), "LicenseRef-2.0 AND Apache-2.0");
        assert!(matches!(expr, LicenseExpression::And(..)));
    }

    #[test]
    fn test_inner_group_kept() {
        let expr = parse_license_expression("MIT AND (Apache-2.0 OR GPL-2.0+)").unwrap();
        assert_eq!(
            expr,
            LicenseExpression::and(
                id("MIT"),
                LicenseExpression::parenthesized(LicenseExpression::or(
                    id("Apache-2.0"),
                    id("GPL-2.0+")
                ))
            )
        );
        assert_eq!(expr.to_string(), "MIT AND (Apache-2.0 OR GPL-2.0+)");
    }

    #[test]
    fn test_with_binds_tightest() {
        let expr =
            parse_license_expression("GPL-2.0-or-later WITH Classpath-exception-2.0 OR MIT").unwrap();
        let with = LicenseExpression::with(id("GPL-2.0-or-later"), "Classpath-exception-2.0").unwrap();
        assert_eq!(expr, LicenseExpression::or(with, id("MIT")));
    }

    #[test]
    fn test_with_after_group_rejected() {
        let err = parse_license_expression("(MIT OR Apache-2.0) WITH LLVM-exception").unwrap_err();
        assert!(err.message.contains("single license"), "{}", err.message);
    }

    #[test]
    fn test_document_ref_license_ref() {
        let expr = parse_license_expression("DocumentRef-spdx-tool-1.2:LicenseRef-MIT-Style-2").unwrap();
        assert!(matches!(expr, LicenseExpression::LicenseRef(_)));
        assert!(parse_license_expression("Foo:Bar").is_err());
    }

    #[test]
    fn test_mixed_case_operator_rejected() {
        let err = parse_license_expression("MIT And Apache-2.0").unwrap_err();
        assert_eq!(err.position, 4);
    }

    #[test]
    fn test_error_positions() {
        assert_eq!(parse_license_expression("MIT AND").unwrap_err().position, 7);
        assert_eq!(parse_license_expression("(MIT").unwrap_err().position, 4);
        assert_eq!(parse_license_expression("MIT / BSD").unwrap_err().position, 4);
        assert_eq!(parse_license_expression("").unwrap_err().position, 0);
        assert_eq!(parse_license_expression("MIT)").unwrap_err().position, 3);
    }

    #[test]
    fn test_sentinels_only_whole_field() {
        assert_eq!(parse_license_field("NOASSERTION"), LicenseField::NoAssertion);
        assert_eq!(parse_license_field(" NONE "), LicenseField::None);
        assert!(matches!(
            parse_license_field("MIT AND NONE"),
            LicenseField::Unparseable { .. }
        ));
        assert!(parse_license_expression("NOASSERTION").is_err());
    }

    #[test]
    fn test_unparseable_keeps_raw() {
        match parse_license_field("MIT AND") {
            LicenseField::Unparseable { raw, error } => {
                assert_eq!(raw, "MIT AND");
                assert_eq!(error.expression, "MIT AND");
            }
            other => panic!("expected Unparseable, got {other:?}"),
        }
    }

    #[test]
    fn test_display_reparses_to_same_tree() {
        for input in [
            "MIT",
            "A AND B OR C",
            "A OR (B AND C)",
            "(A OR B) AND C",
            "A AND (B AND C)",
            "((A))",
            "LicenseRef-x WITH Autoconf-exception-2.0 AND (MIT OR ISC)",
        ] {
            let expr = parse_license_expression(input).unwrap();
            let reparsed = parse_license_expression(&expr.to_string()).unwrap();
            assert_eq!(expr, reparsed, "{input}");
        }
    }
}
