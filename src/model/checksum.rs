//! Checksums and the closed checksum-algorithm vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Checksum algorithm as spelled in SPDX 2.x documents.
///
/// Unknown spellings are kept verbatim in [`ChecksumAlgorithm::Unknown`] so a
/// document written against a newer vocabulary still parses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChecksumAlgorithm {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha3_256,
    Sha3_384,
    Sha3_512,
    Blake2b256,
    Blake2b384,
    Blake2b512,
    Blake3,
    Md2,
    Md4,
    Md5,
    Md6,
    Adler32,
    Unknown(String),
}

impl ChecksumAlgorithm {
    /// Parse the tag-value spelling (case-insensitive, `_` accepted for `-`).
    #[must_use]
    pub fn from_spelling(spelling: &str) -> Self {
        match spelling.trim().to_uppercase().replace('_', "-").as_str() {
            "SHA1" => Self::Sha1,
            "SHA224" => Self::Sha224,
            "SHA256" => Self::Sha256,
            "SHA384" => Self::Sha384,
            "SHA512" => Self::Sha512,
            "SHA3-256" => Self::Sha3_256,
            "SHA3-384" => Self::Sha3_384,
            "SHA3-512" => Self::Sha3_512,
            "BLAKE2B-256" => Self::Blake2b256,
            "BLAKE2B-384" => Self::Blake2b384,
            "BLAKE2B-512" => Self::Blake2b512,
            "BLAKE3" => Self::Blake3,
            "MD2" => Self::Md2,
            "MD4" => Self::Md4,
            "MD5" => Self::Md5,
            "MD6" => Self::Md6,
            "ADLER32" => Self::Adler32,
            _ => Self::Unknown(spelling.trim().to_string()),
        }
    }

    /// Canonical SPDX spelling.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha3_256 => "SHA3-256",
            Self::Sha3_384 => "SHA3-384",
            Self::Sha3_512 => "SHA3-512",
            Self::Blake2b256 => "BLAKE2b-256",
            Self::Blake2b384 => "BLAKE2b-384",
            Self::Blake2b512 => "BLAKE2b-512",
            Self::Blake3 => "BLAKE3",
            Self::Md2 => "MD2",
            Self::Md4 => "MD4",
            Self::Md5 => "MD5",
            Self::Md6 => "MD6",
            Self::Adler32 => "ADLER32",
            Self::Unknown(name) => name,
        }
    }

    /// Exact digest length in hex characters, for fixed-size algorithms.
    ///
    /// BLAKE3, MD6 and unknown algorithms have no fixed length.
    #[must_use]
    pub const fn hex_length(&self) -> Option<usize> {
        match self {
            Self::Adler32 => Some(8),
            Self::Md2 | Self::Md4 | Self::Md5 => Some(32),
            Self::Sha1 => Some(40),
            Self::Sha224 => Some(56),
            Self::Sha256 | Self::Sha3_256 | Self::Blake2b256 => Some(64),
            Self::Sha384 | Self::Sha3_384 | Self::Blake2b384 => Some(96),
            Self::Sha512 | Self::Sha3_512 | Self::Blake2b512 => Some(128),
            Self::Blake3 | Self::Md6 | Self::Unknown(_) => None,
        }
    }

    /// Whether this spelling is part of the SPDX vocabulary
    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A checksum: algorithm plus hex digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    pub value: String,
}

impl Checksum {
    /// Create a new checksum
    #[must_use]
    pub fn new(algorithm: ChecksumAlgorithm, value: impl Into<String>) -> Self {
        Self {
            algorithm,
            value: value.into(),
        }
    }

    /// Describe why the digest does not fit its algorithm, if it doesn't.
    ///
    /// BLAKE3 digests must be at least 256 bits; MD6 and unknown algorithms
    /// are only checked for being hexadecimal.
    #[must_use]
    pub fn digest_problem(&self) -> Option<String> {
        if self.value.is_empty() {
            return Some("checksum value is empty".to_string());
        }
        if !self.value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(format!(
                "{} checksum '{}' is not hexadecimal",
                self.algorithm, self.value
            ));
        }
        let len = self.value.len();
        match (&self.algorithm, self.algorithm.hex_length()) {
            (_, Some(expected)) if len != expected => Some(format!(
                "{} checksum must be {} hex characters, found {}",
                self.algorithm, expected, len
            )),
            (ChecksumAlgorithm::Blake3, None) if len < 64 => Some(format!(
                "BLAKE3 checksum must be at least 64 hex characters, found {len}"
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.algorithm, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_spellings() {
        assert_eq!(ChecksumAlgorithm::from_spelling("SHA1"), ChecksumAlgorithm::Sha1);
        assert_eq!(ChecksumAlgorithm::from_spelling("sha256"), ChecksumAlgorithm::Sha256);
        assert_eq!(
            ChecksumAlgorithm::from_spelling("BLAKE2b-256"),
            ChecksumAlgorithm::Blake2b256
        );
        assert_eq!(
            ChecksumAlgorithm::from_spelling("SHA3_512"),
            ChecksumAlgorithm::Sha3_512
        );
        assert_eq!(
            ChecksumAlgorithm::from_spelling("CRC32"),
            ChecksumAlgorithm::Unknown("CRC32".to_string())
        );
    }

    #[test]
    fn test_sha1_length() {
        let good = Checksum::new(
            ChecksumAlgorithm::Sha1,
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12",
        );
        assert!(good.digest_problem().is_none());

        let short = Checksum::new(ChecksumAlgorithm::Sha1, "abc");
        let problem = short.digest_problem().expect("short digest");
        assert!(problem.contains("40"), "{problem}");
    }

    #[test]
    fn test_non_hex_digest() {
        let bad = Checksum::new(ChecksumAlgorithm::Md5, "zz".repeat(16));
        assert!(bad.digest_problem().unwrap().contains("hexadecimal"));
    }

    #[test]
    fn test_variable_length_algorithms() {
        assert!(Checksum::new(ChecksumAlgorithm::Blake3, "ab".repeat(16))
            .digest_problem()
            .is_some());
        assert!(Checksum::new(ChecksumAlgorithm::Blake3, "ab".repeat(32))
            .digest_problem()
            .is_none());
        assert!(Checksum::new(ChecksumAlgorithm::Md6, "abc")
            .digest_problem()
            .is_none());
    }
}
