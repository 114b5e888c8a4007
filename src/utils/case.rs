//! Identifier case conversion.

/// Convert a `snake_case` name to `camelCase`.
///
/// Empty segments (leading, trailing or doubled underscores) are dropped.
#[must_use]
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, segment) in name.split('_').filter(|s| !s.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(segment);
            continue;
        }
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("license_info_from_files"), "licenseInfoFromFiles");
        assert_eq!(snake_to_camel("name"), "name");
        assert_eq!(snake_to_camel("_leading__double_"), "leadingDouble");
        assert_eq!(snake_to_camel(""), "");
    }
}
