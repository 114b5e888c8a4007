#![no_main]
use libfuzzer_sys::fuzz_target;
use spdx_tagvalue::parsers::parse_license_expression;

/// Fuzz the license expression parser; anything that parses must print
/// back to text that parses to the same string.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(expr) = parse_license_expression(s) {
            let printed = expr.to_string();
            let reparsed = parse_license_expression(&printed).expect("printed expression parses");
            assert_eq!(reparsed.to_string(), printed);
        }
    }
});
