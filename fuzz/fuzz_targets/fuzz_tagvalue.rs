#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tagvalue::{parse_tag_value, validate, write_tag_value};

/// Fuzz tokenizing, building, validating and writing.
///
/// Prefixes input with a document header so the builder gets past the
/// header section and exercises entity handling.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(parsed) = parse_tag_value(s) {
            let _ = validate(&parsed.document);
            let _ = write_tag_value(&parsed.document);
        }

        if s.len() < 10_000 {
            let wrapped = format!(
                "SPDXVersion: SPDX-2.3\nDataLicense: CC0-1.0\nSPDXID: SPDXRef-DOCUMENT\nDocumentName: fuzz\nDocumentNamespace: https://example.com/fuzz\n{s}",
            );
            if let Ok(parsed) = parse_tag_value(&wrapped) {
                let _ = validate(&parsed.document);
                let written = write_tag_value(&parsed.document);
                let _ = parse_tag_value(&written);
            }
        }
    }
});
