//! Property-based tests for the tag-value and license expression parsers.
//!
//! Ensures the parsers don't panic on arbitrary input, and that license
//! expressions survive a print/parse cycle.

use proptest::prelude::*;
use spdx_tagvalue::model::LicenseExpression;
use spdx_tagvalue::parsers::{parse_license_expression, parse_license_field, tokenize, Tag};
use spdx_tagvalue::{parse_tag_value, validate, write_tag_value};

const LICENSE_IDS: &[&str] = &[
    "MIT",
    "Apache-2.0",
    "GPL-2.0-or-later",
    "BSD-3-Clause",
    "LGPL-2.1+",
    "LicenseRef-local",
    "DocumentRef-other:LicenseRef-shared",
];

const EXCEPTIONS: &[&str] = &["Classpath-exception-2.0", "LLVM-exception"];

fn atom() -> impl Strategy<Value = LicenseExpression> {
    (
        prop::sample::select(LICENSE_IDS),
        prop::option::of(prop::sample::select(EXCEPTIONS)),
    )
        .prop_map(|(id, exception)| {
            let license = LicenseExpression::atom(id);
            match exception {
                Some(exception) => LicenseExpression::with(license.clone(), exception)
                    .unwrap_or(license),
                None => license,
            }
        })
}

fn expression() -> impl Strategy<Value = LicenseExpression> {
    atom().prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(l, r)| LicenseExpression::and(l, r)),
            (inner.clone(), inner).prop_map(|(l, r)| LicenseExpression::or(l, r)),
        ]
    })
}

proptest! {
    // Parser tests only assert no-panic; random input is expected to fail
    // most of the time.
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn tokenize_doesnt_panic(s in "\\PC{0,2000}") {
        let _ = tokenize(&s);
    }

    #[test]
    fn parse_tag_value_doesnt_panic(s in "\\PC{0,2000}") {
        if let Ok(parsed) = parse_tag_value(&s) {
            let _ = validate(&parsed.document);
        }
    }

    #[test]
    fn known_tags_with_random_values_dont_panic(
        lines in prop::collection::vec(
            (prop::sample::select(Tag::ALL), "[^\\n<]{0,60}"),
            0..40,
        )
    ) {
        let text: String = lines
            .iter()
            .map(|(tag, value)| format!("{tag}: {value}\n"))
            .collect();
        let parsed = parse_tag_value(&text);
        prop_assert!(parsed.is_ok(), "known tags always tokenize: {:?}", parsed.err());
        let parsed = parsed.unwrap();
        let _ = validate(&parsed.document);
        let _ = write_tag_value(&parsed.document);
    }

    #[test]
    fn license_expression_doesnt_panic(s in "[A-Za-z0-9.+:() -]{0,80}") {
        let _ = parse_license_expression(&s);
        let _ = parse_license_field(&s);
    }

    #[test]
    fn unterminated_text_is_an_error(tag in prop::sample::select(Tag::ALL), body in "[^<\\n]{0,40}") {
        let text = format!("{tag}: <text>{body}\nmore\n");
        prop_assert!(parse_tag_value(&text).is_err());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn license_expression_print_parse_is_stable(expr in expression()) {
        let printed = expr.to_string();
        let reparsed = parse_license_expression(&printed);
        prop_assert!(reparsed.is_ok(), "{printed}: {:?}", reparsed.err());
        let reparsed = reparsed.unwrap();
        prop_assert_eq!(reparsed.to_string(), printed);
        prop_assert_eq!(reparsed.atoms().len(), expr.atoms().len());
        prop_assert_eq!(reparsed.exceptions(), expr.exceptions());
    }

    #[test]
    fn lowercase_operators_parse_the_same(expr in expression()) {
        let printed = expr.to_string();
        let lowered = printed
            .replace(" AND ", " and ")
            .replace(" OR ", " or ")
            .replace(" WITH ", " with ");
        let upper = parse_license_expression(&printed).unwrap();
        let lower = parse_license_expression(&lowered);
        prop_assert_eq!(lower, Ok(upper));
    }
}
