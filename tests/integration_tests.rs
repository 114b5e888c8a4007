//! Integration tests for spdx-tagvalue
//!
//! These tests run whole documents through parsing, validation and
//! writing, using the fixtures under `tests/fixtures`.

use spdx_tagvalue::{
    error::BuilderErrorKind,
    model::{LicenseField, SpdxValue},
    parse_file, parse_tag_value,
    properties::same_properties,
    to_json, to_json_in, validate,
    validation::{RuleCategory, Severity},
    write_document, write_tag_value, ParserConfig, SpdxError, WriteOptions,
};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("fixture readable")
}

// ============================================================================
// Parser Tests
// ============================================================================

mod parser_tests {
    use super::*;

    #[test]
    fn test_parse_complete_document() {
        let parsed = parse_tag_value(&fixture("complete.spdx")).expect("tokenizes");
        assert!(parsed.is_clean(), "{:?}", parsed.diagnostics);

        let doc = &parsed.document;
        assert_eq!(doc.spdx_version, "SPDX-2.3");
        assert_eq!(doc.name, "hello-world");
        assert_eq!(
            doc.comment.as_deref(),
            Some("Sample document covering\nevery entity kind.")
        );
        assert_eq!(doc.external_document_refs.len(), 1);

        let info = doc.creation_info.as_ref().expect("creation info");
        assert_eq!(info.creators.len(), 3);
        assert_eq!(info.creators[0].contact.as_deref(), Some("jane@example.com"));
        assert_eq!(info.license_list_version.as_deref(), Some("3.22"));

        assert_eq!(doc.packages.len(), 2);
        assert_eq!(doc.files.len(), 2);
        assert_eq!(doc.snippets.len(), 1);
        assert_eq!(doc.extracted_licenses.len(), 1);
        assert_eq!(doc.relationships.len(), 5);
        assert_eq!(doc.annotations.len(), 1);
        assert_eq!(doc.reviews.len(), 1);
    }

    #[test]
    fn test_files_link_to_preceding_package() {
        let doc = parse_tag_value(&fixture("complete.spdx")).unwrap().document;

        let readme = doc.file("SPDXRef-readme").expect("readme");
        assert_eq!(readme.owning_package, None);

        let source = doc.file("SPDXRef-hello-c").expect("hello.c");
        assert_eq!(source.owning_package.as_deref(), Some("SPDXRef-hello"));
        assert_eq!(source.checksums.len(), 2);
        assert_eq!(doc.files_of("SPDXRef-hello").count(), 1);
        assert_eq!(doc.files_of("SPDXRef-greeting").count(), 0);
    }

    #[test]
    fn test_package_values() {
        let doc = parse_tag_value(&fixture("complete.spdx")).unwrap().document;
        let hello = doc.package("SPDXRef-hello").expect("hello");

        assert_eq!(hello.version.as_deref(), Some("1.0.0"));
        assert_eq!(hello.files_analyzed, Some(true));
        assert_eq!(
            hello.verification_code.as_ref().unwrap().excluded_files,
            vec!["./hello.spdx"]
        );
        assert_eq!(
            hello.license_concluded.as_ref().unwrap().to_string(),
            "(MIT OR Apache-2.0) AND LicenseRef-hello-extra"
        );
        assert_eq!(hello.license_info_from_files.len(), 3);
        assert_eq!(hello.external_refs[0].comment.as_deref(), Some("Generic purl."));

        let greeting = doc.package("SPDXRef-greeting").expect("greeting");
        assert_eq!(greeting.download_location, Some(SpdxValue::NoAssertion));
        assert_eq!(greeting.license_concluded, Some(LicenseField::NoAssertion));
        assert_eq!(greeting.copyright_text, Some(SpdxValue::None));
        let declared = greeting.license_declared.as_ref().unwrap().expression().unwrap();
        assert_eq!(declared.exceptions(), vec!["LLVM-exception"]);
    }

    #[test]
    fn test_external_document_target_resolves() {
        let parsed = parse_tag_value(&fixture("complete.spdx")).unwrap();
        let external = parsed
            .document
            .relationships
            .iter()
            .find(|r| r.related_spdx_element.starts_with("DocumentRef-"))
            .expect("external relationship");
        assert!(!external.dangling);
    }

    #[test]
    fn test_parse_file_with_config() {
        let parsed = parse_file(&fixture_path("complete.spdx"), &ParserConfig::default())
            .expect("parses");
        assert!(parsed.is_clean());

        let strict = ParserConfig {
            fail_on_diagnostics: true,
        };
        let err = parse_file(&fixture_path("problems.spdx"), &strict).unwrap_err();
        assert!(matches!(err, SpdxError::Diagnostics { count: 4, .. }), "{err}");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_file(&fixture_path("does-not-exist.spdx"), &ParserConfig::default())
            .unwrap_err();
        assert!(matches!(err, SpdxError::Io { .. }), "{err}");
    }
}

// ============================================================================
// Diagnostics Tests
// ============================================================================

mod diagnostics_tests {
    use super::*;

    #[test]
    fn test_problem_document_diagnostics() {
        let parsed = parse_tag_value(&fixture("problems.spdx")).expect("tokenizes");
        let lines: Vec<usize> = parsed.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(parsed.diagnostics.len(), 4, "{:?}", parsed.diagnostics);

        assert!(matches!(
            parsed.diagnostics[0].kind,
            BuilderErrorKind::PropertyWithoutEntity { .. }
        ));
        assert_eq!(lines[0], 9);
        assert!(matches!(
            parsed.diagnostics[1].kind,
            BuilderErrorKind::LicenseExpression { .. }
        ));
        assert_eq!(lines[1], 13);
        assert!(parsed
            .diagnostics
            .iter()
            .any(|d| matches!(&d.kind, BuilderErrorKind::DuplicateIdentifier { id } if id == "SPDXRef-broken")));
        assert!(parsed.diagnostics.iter().any(|d| matches!(
            &d.kind,
            BuilderErrorKind::UnresolvedReference { target, .. } if target == "SPDXRef-ghost"
        )));
    }

    #[test]
    fn test_best_effort_document_survives() {
        let doc = parse_tag_value(&fixture("problems.spdx")).unwrap().document;
        assert_eq!(doc.packages.len(), 2);
        assert_eq!(doc.packages[0].version, None);
        assert!(matches!(
            doc.packages[0].license_concluded,
            Some(LicenseField::Unparseable { .. })
        ));
        assert!(doc.relationships[0].dangling);
    }

    #[test]
    fn test_lex_error_aborts() {
        let mut text = fixture("complete.spdx");
        text.push_str("NotATag: value\n");
        let err = parse_tag_value(&text).unwrap_err();
        assert_eq!(err.line(), text.lines().count());
    }

    #[test]
    fn test_unterminated_text_aborts() {
        let text = "SPDXVersion: SPDX-2.3\nDocumentComment: <text>never closed\n";
        let err = parse_tag_value(text).unwrap_err();
        assert_eq!(err.line(), 2);
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_complete_document_is_valid() {
        let doc = parse_tag_value(&fixture("complete.spdx")).unwrap().document;
        let report = validate(&doc);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn test_problem_document_issues() {
        let doc = parse_tag_value(&fixture("problems.spdx")).unwrap().document;
        let report = validate(&doc);

        assert_eq!(report.error_count(), 5, "{:#?}", report.issues);
        assert_eq!(report.warning_count(), 1, "{:#?}", report.issues);
        assert!(!report.is_valid());

        let identifier = report.issues_for(RuleCategory::Identifier);
        assert_eq!(identifier.len(), 2);
        assert!(identifier[0].message.contains("SPDXRef-broken"));
        assert!(identifier[1].message.contains("SPDXRef-ghost"));

        assert_eq!(report.issues_at("creation_info").len(), 1);

        // The duplicate id is reported against its first owner
        let package = report.issues_at("packages[0]");
        assert_eq!(package.len(), 4);
        assert_eq!(package[0].rule, RuleCategory::Identifier);
        assert_eq!(package[1].rule, RuleCategory::Format);
        assert_eq!(package[2].rule, RuleCategory::License);
        assert_eq!(package[3].severity, Severity::Warning);
    }

    #[test]
    fn test_report_order_groups() {
        let doc = parse_tag_value(&fixture("problems.spdx")).unwrap().document;
        let report = validate(&doc);
        let rank = |rule: RuleCategory| match rule {
            RuleCategory::Structural => 0,
            RuleCategory::Identifier => 1,
            _ => 2,
        };
        let ranks: Vec<u8> = report.issues.iter().map(|i| rank(i.rule)).collect();
        let mut sorted = ranks.clone();
        sorted.sort_unstable();
        assert_eq!(ranks, sorted);
    }
}

// ============================================================================
// Writer Tests
// ============================================================================

mod writer_tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_properties() {
        let original = parse_tag_value(&fixture("complete.spdx")).unwrap().document;
        let written = write_document(&original, &WriteOptions::default()).expect("valid");
        let reparsed = parse_tag_value(&written).expect("tokenizes");

        assert!(reparsed.is_clean(), "{:?}", reparsed.diagnostics);
        assert!(same_properties(&original, &reparsed.document));
        assert_eq!(to_json(&original), to_json(&reparsed.document));
    }

    #[test]
    fn test_round_trip_keeps_trailing_space_in_multiline_text() {
        let mut original = parse_tag_value(&fixture("complete.spdx")).unwrap().document;
        original.comment = Some("example.  \nnext line\n  indented".to_string());
        original.packages[0].description = Some("first  \nsecond".to_string());

        let written = write_tag_value(&original);
        let reparsed = parse_tag_value(&written).unwrap().document;
        assert_eq!(reparsed.comment, original.comment);
        assert_eq!(reparsed.packages[0].description, original.packages[0].description);
        assert!(same_properties(&original, &reparsed));
    }

    #[test]
    fn test_write_is_stable() {
        let original = parse_tag_value(&fixture("complete.spdx")).unwrap().document;
        let first = write_tag_value(&original);
        let second = write_tag_value(&parse_tag_value(&first).unwrap().document);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_document_refused() {
        let doc = parse_tag_value(&fixture("problems.spdx")).unwrap().document;
        let err = write_document(&doc, &WriteOptions::default()).unwrap_err();
        assert!(matches!(err, SpdxError::Validation { errors: 5, .. }), "{err}");

        let unchecked = WriteOptions {
            validate: false,
            ..WriteOptions::default()
        };
        let text = write_document(&doc, &unchecked).expect("written without validation");
        assert!(text.contains("PackageLicenseConcluded: MIT AND\n"));
    }

    #[test]
    fn test_repeated_entities_collapse() {
        let mut text = fixture("complete.spdx");
        text.push_str("Relationship: SPDXRef-DOCUMENT DESCRIBES SPDXRef-hello\n");
        text.push_str("\nPackageName: greeting-lib\nSPDXID: SPDXRef-greeting\n");
        text.push_str("PackageVersion: 0.3.1\nPackageDownloadLocation: NOASSERTION\n");
        text.push_str("FilesAnalyzed: false\nPackageLicenseConcluded: NOASSERTION\n");
        text.push_str("PackageLicenseDeclared: Apache-2.0 WITH LLVM-exception\n");
        text.push_str("PackageCopyrightText: NONE\n");

        let parsed = parse_tag_value(&text).unwrap();
        assert_eq!(parsed.document.packages.len(), 3);
        assert_eq!(validate(&parsed.document).error_count(), 1);

        let written = write_document(&parsed.document, &WriteOptions::default()).expect("deduplicated");
        let reparsed = parse_tag_value(&written).unwrap().document;
        assert_eq!(reparsed.packages.len(), 2);
        assert_eq!(reparsed.relationships.len(), 5);
    }
}

// ============================================================================
// Property Access Tests
// ============================================================================

mod property_tests {
    use super::*;

    #[test]
    fn test_document_json_shape() {
        let doc = parse_tag_value(&fixture("complete.spdx")).unwrap().document;
        let json = to_json(&doc);

        assert_eq!(json["SPDXID"], "SPDXRef-DOCUMENT");
        assert_eq!(json["spdxVersion"], "SPDX-2.3");
        assert_eq!(json["packages"].as_array().unwrap().len(), 2);
        assert_eq!(json["packages"][0]["versionInfo"], "1.0.0");
        assert_eq!(json["packages"][0]["filesAnalyzed"], true);
        assert!(json["packages"][1].get("packageFileName").is_none());
    }

    #[test]
    fn test_annotations_nested_under_their_subject() {
        let doc = parse_tag_value(&fixture("complete.spdx")).unwrap().document;
        let json = to_json(&doc);

        assert_eq!(json["packages"][0]["SPDXID"], "SPDXRef-hello");
        assert_eq!(json["packages"][0]["annotations"][0]["annotationType"], "REVIEW");
        assert_eq!(
            json["packages"][0]["annotations"][0]["comment"],
            "Checked license headers."
        );
        assert!(json["packages"][1].get("annotations").is_none());
        assert!(json["files"][0].get("annotations").is_none());

        let hello = doc.package("SPDXRef-hello").unwrap();
        assert_eq!(
            to_json_in(hello, &doc)["annotations"][0]["annotator"],
            "Person: Jane Doe"
        );
    }
}
