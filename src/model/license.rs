//! License expression trees and license-bearing field values.
//!
//! A [`LicenseExpression`] is the parsed form of an SPDX license expression.
//! Its `Display` output is the canonical infix string. For trees produced by
//! the parser, re-parsing that string yields the same tree. A hand-built tree
//! whose shape the left-associative grammar cannot produce, such as a right
//! nested `And(A, And(B, C))`, prints with the inner operand grouped and
//! re-parses with an explicit `Parenthesized` node; the printed string is
//! stable either way.

use crate::error::LicenseParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for "the preparer makes no assertion"
pub const NOASSERTION: &str = "NOASSERTION";
/// Sentinel for "explicitly nothing"
pub const NONE: &str = "NONE";

/// Boolean license expression tree
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseExpression {
    /// A license list identifier (or any idstring, possibly with `+`)
    LicenseId(String),
    /// A `LicenseRef-…` or `DocumentRef-…:LicenseRef-…` reference
    LicenseRef(String),
    And(Box<LicenseExpression>, Box<LicenseExpression>),
    Or(Box<LicenseExpression>, Box<LicenseExpression>),
    /// Exception-qualified atom; `license` is always `LicenseId` or `LicenseRef`
    With {
        license: Box<LicenseExpression>,
        exception: String,
    },
    Parenthesized(Box<LicenseExpression>),
}

impl LicenseExpression {
    /// Build an atom, choosing `LicenseRef` for `LicenseRef-` / `DocumentRef-` forms.
    pub fn atom(id: impl Into<String>) -> Self {
        let id = id.into();
        if is_license_ref(&id) {
            Self::LicenseRef(id)
        } else {
            Self::LicenseId(id)
        }
    }

    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    #[must_use]
    pub fn parenthesized(inner: Self) -> Self {
        Self::Parenthesized(Box::new(inner))
    }

    /// Qualify an atom with an exception. Returns `None` for non-atoms,
    /// since `WITH` only binds to a single license.
    pub fn with(license: Self, exception: impl Into<String>) -> Option<Self> {
        license.is_atom().then(|| Self::With {
            license: Box::new(license),
            exception: exception.into(),
        })
    }

    /// True for `LicenseId` and `LicenseRef`
    #[must_use]
    pub const fn is_atom(&self) -> bool {
        matches!(self, Self::LicenseId(_) | Self::LicenseRef(_))
    }

    /// Strip any number of enclosing parentheses
    #[must_use]
    pub fn unparenthesized(&self) -> &Self {
        let mut current = self;
        while let Self::Parenthesized(inner) = current {
            current = inner;
        }
        current
    }

    /// License atoms in left-to-right order (exceptions excluded)
    #[must_use]
    pub fn atoms(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms<'a>(&'a self, out: &mut Vec<&'a Self>) {
        match self {
            Self::LicenseId(_) | Self::LicenseRef(_) => out.push(self),
            Self::And(l, r) | Self::Or(l, r) => {
                l.collect_atoms(out);
                r.collect_atoms(out);
            }
            Self::With { license, .. } => license.collect_atoms(out),
            Self::Parenthesized(inner) => inner.collect_atoms(out),
        }
    }

    /// Exception identifiers in left-to-right order
    #[must_use]
    pub fn exceptions(&self) -> Vec<&str> {
        match self {
            Self::LicenseId(_) | Self::LicenseRef(_) => Vec::new(),
            Self::And(l, r) | Self::Or(l, r) => {
                let mut out = l.exceptions();
                out.extend(r.exceptions());
                out
            }
            Self::With { exception, .. } => vec![exception.as_str()],
            Self::Parenthesized(inner) => inner.exceptions(),
        }
    }

    /// Atom text, if this node is an atom
    #[must_use]
    pub fn atom_text(&self) -> Option<&str> {
        match self {
            Self::LicenseId(id) | Self::LicenseRef(id) => Some(id),
            _ => None,
        }
    }
}

/// `LicenseRef-x` or `DocumentRef-y:LicenseRef-x`
fn is_license_ref(id: &str) -> bool {
    id.starts_with("LicenseRef-")
        || id
            .split_once(':')
            .is_some_and(|(doc, lic)| doc.starts_with("DocumentRef-") && lic.starts_with("LicenseRef-"))
}

impl fmt::Display for LicenseExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LicenseId(id) | Self::LicenseRef(id) => f.write_str(id),
            Self::And(l, r) => {
                // OR under AND must be grouped; right operands are grouped so
                // the left-associative parse rebuilds the same shape
                write_operand(f, l, matches!(**l, Self::Or(..)))?;
                f.write_str(" AND ")?;
                write_operand(f, r, matches!(**r, Self::And(..) | Self::Or(..)))
            }
            Self::Or(l, r) => {
                write_operand(f, l, false)?;
                f.write_str(" OR ")?;
                write_operand(f, r, matches!(**r, Self::Or(..)))
            }
            Self::With { license, exception } => write!(f, "{license} WITH {exception}"),
            Self::Parenthesized(inner) => write!(f, "({inner})"),
        }
    }
}

fn write_operand(
    f: &mut fmt::Formatter<'_>,
    expr: &LicenseExpression,
    group: bool,
) -> fmt::Result {
    if group {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

/// Value of a license-bearing field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseField {
    Expression(LicenseExpression),
    NoAssertion,
    None,
    /// Kept so tooling can still locate and report the field
    Unparseable {
        raw: String,
        error: LicenseParseError,
    },
}

impl LicenseField {
    /// The parsed expression, if any
    #[must_use]
    pub const fn expression(&self) -> Option<&LicenseExpression> {
        match self {
            Self::Expression(expr) => Some(expr),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::NoAssertion | Self::None)
    }

    /// The attached parse error for unparseable fields
    #[must_use]
    pub const fn parse_error(&self) -> Option<&LicenseParseError> {
        match self {
            Self::Unparseable { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl fmt::Display for LicenseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression(expr) => write!(f, "{expr}"),
            Self::NoAssertion => f.write_str(NOASSERTION),
            Self::None => f.write_str(NONE),
            Self::Unparseable { raw, .. } => f.write_str(raw),
        }
    }
}

/// Extracted licensing info: the text behind a `LicenseRef-…` used in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedLicense {
    pub license_id: String,
    pub extracted_text: Option<String>,
    pub name: Option<String>,
    pub cross_references: Vec<String>,
    pub comment: Option<String>,
}

impl ExtractedLicense {
    pub fn new(license_id: impl Into<String>) -> Self {
        Self {
            license_id: license_id.into(),
            ..Self::default()
        }
    }
}
