//! Content hashing utilities.

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_64;

/// Compute a content hash for arbitrary bytes
#[must_use]
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}

/// Hash the JSON rendering of a value.
///
/// Values that fail to serialize all hash to the hash of empty input.
#[must_use]
pub fn json_hash<T: Serialize + ?Sized>(value: &T) -> u64 {
    content_hash(&serde_json::to_vec(value).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash() {
        let data = b"hello world";
        let hash = content_hash(data);
        assert_ne!(hash, 0);

        // Same input should produce same hash
        assert_eq!(hash, content_hash(data));

        // Different input should produce different hash
        assert_ne!(hash, content_hash(b"hello world!"));
    }

    #[test]
    fn test_json_hash_is_structural() {
        assert_eq!(json_hash(&vec!["a", "b"]), json_hash(&["a", "b"]));
        assert_ne!(json_hash(&vec!["a", "b"]), json_hash(&vec!["b", "a"]));
    }
}
