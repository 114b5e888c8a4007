//! Tag-value tokenizer.
//!
//! Turns raw text into `Tag` / value token pairs, one pair per logical line.
//! `<text>` blocks may span several physical lines; the resulting token
//! carries the line the block was opened on.

use super::tags::Tag;
use crate::error::LexError;
use regex::Regex;
use std::sync::LazyLock;

const TEXT_OPEN: &str = "<text>";
const TEXT_CLOSE: &str = "</text>";

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").expect("static regex")
});

static CHECKSUM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(SHA\d+|SHA3-\d+|BLAKE2b-\d+|BLAKE3|MD\d|ADLER32):\s*[0-9a-fA-F]+$")
        .expect("static regex")
});

/// Classification of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Tag(Tag),
    /// Plain rest-of-line value
    Line,
    /// `<text>…</text>` block, markers included
    Text,
    Person,
    Organization,
    Tool,
    /// `YYYY-MM-DDTHH:MM:SSZ`
    Date,
    /// `ALGO: hex`
    Checksum,
}

/// A token with its raw value and 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            line,
        }
    }

    /// The tag, for tag tokens
    #[must_use]
    pub const fn tag(&self) -> Option<Tag> {
        match self.kind {
            TokenKind::Tag(tag) => Some(tag),
            _ => None,
        }
    }
}

/// Classify a single-line value by its content alone.
#[must_use]
pub fn classify_value(value: &str) -> TokenKind {
    if value.starts_with(TEXT_OPEN) {
        TokenKind::Text
    } else if value.starts_with("Person:") {
        TokenKind::Person
    } else if value.starts_with("Organization:") {
        TokenKind::Organization
    } else if value.starts_with("Tool:") {
        TokenKind::Tool
    } else if DATE_RE.is_match(value) {
        TokenKind::Date
    } else if CHECKSUM_RE.is_match(value) {
        TokenKind::Checksum
    } else {
        TokenKind::Line
    }
}

/// Strip `<text>` markers if present; other values are returned trimmed.
#[must_use]
pub fn unwrap_text(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix(TEXT_OPEN)
        .and_then(|v| v.strip_suffix(TEXT_CLOSE))
        .unwrap_or(value)
}

/// Tokenize a tag-value document.
///
/// # Errors
///
/// Returns the first [`LexError`]: an unknown tag spelling, a line with no
/// `:` separator, or a `<text>` block that is never closed.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    while let Some((line_no, raw)) = lines.next() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Split the untrimmed line so a text block keeps its trailing spaces.
        let Some((spelling, rest)) = raw.trim_start().split_once(':') else {
            return Err(LexError::MissingSeparator { line: line_no });
        };
        let spelling = spelling.trim();
        let tag = Tag::from_spelling(spelling).ok_or_else(|| LexError::UnknownTag {
            tag: spelling.to_string(),
            line: line_no,
        })?;
        tokens.push(Token::new(TokenKind::Tag(tag), spelling, line_no));

        let value = rest.trim();
        if value.starts_with(TEXT_OPEN) && !value.contains(TEXT_CLOSE) {
            // Keep the opening line as written (minus leading space) and every
            // following physical line verbatim up to the closing marker.
            let mut block = rest.trim_start().to_string();
            let mut closed = false;
            for (_, next) in lines.by_ref() {
                block.push('\n');
                if let Some(end) = next.find(TEXT_CLOSE) {
                    block.push_str(&next[..end + TEXT_CLOSE.len()]);
                    closed = true;
                    break;
                }
                block.push_str(next);
            }
            if !closed {
                return Err(LexError::UnterminatedText { line: line_no });
            }
            tokens.push(Token::new(TokenKind::Text, block, line_no));
        } else {
            let value = match value.find(TEXT_CLOSE) {
                Some(end) if value.starts_with(TEXT_OPEN) => {
                    let (text, trailing) = value.split_at(end + TEXT_CLOSE.len());
                    if !trailing.trim().is_empty() {
                        tracing::warn!(
                            "line {line_no}: ignoring {:?} after </text>",
                            trailing.trim()
                        );
                    }
                    text
                }
                _ => value,
            };
            tokens.push(Token::new(classify_value(value), value, line_no));
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triples(tokens: &[Token]) -> Vec<(TokenKind, &str, usize)> {
        tokens
            .iter()
            .map(|t| (t.kind, t.value.as_str(), t.line))
            .collect()
    }

    #[test]
    fn test_document_header_tokens() {
        let input =
            "SPDXVersion: SPDX-1.2\nDataLicense: CC0-1.0\nDocumentComment: <text>sample</text>";
        let tokens = tokenize(input).unwrap();
        assert_eq!(
            triples(&tokens),
            vec![
                (TokenKind::Tag(Tag::SpdxVersion), "SPDXVersion", 1),
                (TokenKind::Line, "SPDX-1.2", 1),
                (TokenKind::Tag(Tag::DataLicense), "DataLicense", 2),
                (TokenKind::Line, "CC0-1.0", 2),
                (TokenKind::Tag(Tag::DocumentComment), "DocumentComment", 3),
                (TokenKind::Text, "<text>sample</text>", 3),
            ]
        );
    }

    #[test]
    fn test_indented_lines_and_comments() {
        let input = "\n        SPDXVersion: SPDX-1.2\n        # Comment.\n        DataLicense: CC0-1.0\n";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[2].line, 4);
    }

    #[test]
    fn test_creator_value_kinds() {
        let input = "Creator: Person: Gary O'Neall\n\
                     Creator: Organization: Source Auditor Inc.\n\
                     Creator: Tool: SourceAuditor-V1.2\n\
                     Created: 2010-02-03T00:00:00Z";
        let kinds: Vec<_> = tokenize(input)
            .unwrap()
            .into_iter()
            .filter(|t| t.tag().is_none())
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Person,
                TokenKind::Organization,
                TokenKind::Tool,
                TokenKind::Date
            ]
        );
    }

    #[test]
    fn test_checksum_and_verification_code() {
        let input = "PackageChecksum: SHA1: 2fd4e1c67a2d28fced849ee1bb76e7391b93eb12\n\
                     PackageVerificationCode: 4e3211c67a2d28fced849ee1bb76e7391b93feba (a.rdf, a.txt)";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Checksum);
        assert_eq!(tokens[3].kind, TokenKind::Line);
        assert_eq!(
            tokens[3].value,
            "4e3211c67a2d28fced849ee1bb76e7391b93feba (a.rdf, a.txt)"
        );
    }

    #[test]
    fn test_multiline_text_keeps_raw_lines() {
        let input = "ReviewComment: <text>This is just an example.\n    Some licenses\n    look like BSD</text>\nReviewDate: 2010-02-10T00:00:00Z";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Text);
        assert_eq!(tokens[1].line, 1);
        assert_eq!(
            tokens[1].value,
            "<text>This is just an example.\n    Some licenses\n    look like BSD</text>"
        );
        assert_eq!(tokens[2].line, 4);
    }

    #[test]
    fn test_multiline_text_keeps_trailing_space_on_first_line() {
        let input = "DocumentComment: <text>example.  \nnext</text>\n";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens[1].value, "<text>example.  \nnext</text>");
        assert_eq!(unwrap_text(&tokens[1].value), "example.  \nnext");
    }

    #[test]
    fn test_content_after_closing_marker_is_dropped() {
        let tokens = tokenize("PackageComment: <text>a</text> junk").unwrap();
        assert_eq!(tokens[1].value, "<text>a</text>");
        assert_eq!(tokens[1].kind, TokenKind::Text);
    }

    #[test]
    fn test_text_block_may_contain_comment_like_lines() {
        let input = "FileComment: <text>first\n# not a comment\nPackageName: not a tag\n</text>";
        let tokens = tokenize(input).unwrap();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[1].value.contains("# not a comment"));
    }

    #[test]
    fn test_unterminated_text() {
        let input = "SPDXVersion: SPDX-2.3\nDocumentComment: <text>never\nclosed";
        assert_eq!(
            tokenize(input),
            Err(LexError::UnterminatedText { line: 2 })
        );
    }

    #[test]
    fn test_unknown_tag() {
        let err = tokenize("SPDXVersion: SPDX-2.3\nBogusTag: x").unwrap_err();
        assert_eq!(
            err,
            LexError::UnknownTag {
                tag: "BogusTag".to_string(),
                line: 2
            }
        );
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(
            tokenize("just some words"),
            Err(LexError::MissingSeparator { line: 1 })
        );
    }

    #[test]
    fn test_value_with_colons_and_empty_value() {
        let tokens =
            tokenize("DocumentNamespace: https://example.com/doc\nPackageComment:").unwrap();
        assert_eq!(tokens[1].value, "https://example.com/doc");
        assert_eq!(tokens[3].value, "");
        assert_eq!(tokens[3].kind, TokenKind::Line);
    }

    #[test]
    fn test_unwrap_text() {
        assert_eq!(unwrap_text("<text>a\nb</text>"), "a\nb");
        assert_eq!(unwrap_text(" plain "), "plain");
    }
}
