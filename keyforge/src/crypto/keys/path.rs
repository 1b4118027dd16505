//! Derivation path parsing
//!
//! Two grammars are accepted:
//!
//! - [`DerivationPath`]: the hardened-only form used by the Ed25519 engine,
//!   `m(/[0-9]+')+`. Indices are stored bare; hardening is applied by the
//!   engine.
//! - [`Bip32Path`]: the secp256k1 BIP-32 form, `m(/[0-9]+'?)+`, storing raw
//!   child numbers with the hardened bit already set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

use super::derivation::HARDENED_OFFSET;

/// Hardened-only derivation path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<u32>,
}

impl DerivationPath {
    /// Parse and validate a path such as `m/44'/784'/0'/0'/0'`
    pub fn parse(path: &str) -> Result<Self> {
        let segments = split_segments(path)?;

        let mut indices = Vec::with_capacity(segments.len());
        for segment in segments {
            let digits = segment
                .strip_suffix('\'')
                .filter(|digits| is_digits(digits))
                .ok_or_else(|| Error::InvalidPathFormat(path.to_string()))?;
            indices.push(parse_index(digits)?);
        }

        Ok(Self { indices })
    }

    /// Build a path from bare (un-hardened) indices
    pub fn from_indices(indices: Vec<u32>) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::InvalidPathFormat("path has no segments".to_string()));
        }
        if let Some(index) = indices.iter().find(|&&index| index >= HARDENED_OFFSET) {
            return Err(Error::InvalidPathSegment(format!(
                "index {} is not below 2^31",
                index
            )));
        }
        Ok(Self { indices })
    }

    /// Bare indices, root to leaf
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of segments after the root
    pub fn depth(&self) -> usize {
        self.indices.len()
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.indices {
            write!(f, "/{}'", index)?;
        }
        Ok(())
    }
}

impl Serialize for DerivationPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse(&text).map_err(serde::de::Error::custom)
    }
}

/// Whether `path` is a valid hardened-only derivation path
pub fn is_valid_path(path: &str) -> bool {
    DerivationPath::parse(path).is_ok()
}

/// BIP-32 path for secp256k1 derivation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bip32Path {
    child_numbers: Vec<u32>,
}

impl Bip32Path {
    /// Parse a path such as `m/44'/60'/0'/0/0`
    pub fn parse(path: &str) -> Result<Self> {
        let segments = split_segments(path)?;

        let mut child_numbers = Vec::with_capacity(segments.len());
        for segment in segments {
            let (digits, hardened) = match segment.strip_suffix('\'') {
                Some(digits) => (digits, true),
                None => (segment, false),
            };
            if !is_digits(digits) {
                return Err(Error::InvalidPathFormat(path.to_string()));
            }

            let index = parse_index(digits)?;
            child_numbers.push(if hardened { index | HARDENED_OFFSET } else { index });
        }

        Ok(Self { child_numbers })
    }

    /// Raw child numbers, root to leaf
    pub fn child_numbers(&self) -> &[u32] {
        &self.child_numbers
    }
}

impl FromStr for Bip32Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Bip32Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for &child in &self.child_numbers {
            if child >= HARDENED_OFFSET {
                write!(f, "/{}'", child & !HARDENED_OFFSET)?;
            } else {
                write!(f, "/{}", child)?;
            }
        }
        Ok(())
    }
}

/// Split `m/a/b/...` into its segments, rejecting anything without a segment
fn split_segments(path: &str) -> Result<Vec<&str>> {
    let rest = path
        .strip_prefix("m/")
        .ok_or_else(|| Error::InvalidPathFormat(path.to_string()))?;

    let segments: Vec<&str> = rest.split('/').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(Error::InvalidPathFormat(path.to_string()));
    }

    Ok(segments)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a digits-only segment into an index below 2^31
fn parse_index(digits: &str) -> Result<u32> {
    let index = digits
        .parse::<u32>()
        .map_err(|e| Error::InvalidPathSegment(format!("{}: {}", digits, e)))?;

    if index >= HARDENED_OFFSET {
        return Err(Error::InvalidPathSegment(format!(
            "{}: index is not below 2^31",
            digits
        )));
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hardened_path() {
        let path = DerivationPath::parse("m/44'/637'/0'/0'/0'").unwrap();
        assert_eq!(path.indices(), &[44, 637, 0, 0, 0]);
        assert_eq!(path.depth(), 5);
        assert_eq!(path.to_string(), "m/44'/637'/0'/0'/0'");
    }

    #[test]
    fn test_missing_hardening_marker() {
        let err = DerivationPath::parse("m/44/637'/0'/0'/0'").unwrap_err();
        assert!(matches!(err, Error::InvalidPathFormat(_)));

        let err = DerivationPath::parse("m/44'/501'/0'/0").unwrap_err();
        assert!(matches!(err, Error::InvalidPathFormat(_)));
    }

    #[test]
    fn test_rejects_malformed_paths() {
        for bad in [
            "",
            "m",
            "m/",
            "44'/0'",
            "M/44'",
            "m//0'",
            "m/0'/",
            "m/+1'",
            "m/-1'",
            "m/1''",
            "m/a'",
            "m/'",
            " m/0'",
            "m/0' ",
            "m/0h",
        ] {
            assert!(
                matches!(DerivationPath::parse(bad), Err(Error::InvalidPathFormat(_))),
                "{:?} should be a format error",
                bad
            );
        }
    }

    #[test]
    fn test_out_of_range_segment() {
        let err = DerivationPath::parse("m/2147483648'").unwrap_err();
        assert!(matches!(err, Error::InvalidPathSegment(_)));

        let err = DerivationPath::parse("m/99999999999'").unwrap_err();
        assert!(matches!(err, Error::InvalidPathSegment(_)));

        assert!(DerivationPath::parse("m/2147483647'").is_ok());
    }

    #[test]
    fn test_from_indices() {
        let path = DerivationPath::from_indices(vec![44, 501, 0, 0]).unwrap();
        assert_eq!(path.to_string(), "m/44'/501'/0'/0'");

        assert!(DerivationPath::from_indices(vec![]).is_err());
        assert!(matches!(
            DerivationPath::from_indices(vec![HARDENED_OFFSET]),
            Err(Error::InvalidPathSegment(_))
        ));
    }

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("m/44'/501'/0'/0'"));
        assert!(!is_valid_path("m/44'/501'/0'/0"));
        assert!(!is_valid_path("invalid"));
    }

    #[test]
    fn test_serde_as_string() {
        let path: DerivationPath = serde_json::from_str("\"m/44'/784'/0'/0'/0'\"").unwrap();
        assert_eq!(path.indices(), &[44, 784, 0, 0, 0]);
        assert_eq!(serde_json::to_string(&path).unwrap(), "\"m/44'/784'/0'/0'/0'\"");
        assert!(serde_json::from_str::<DerivationPath>("\"m/44/0\"").is_err());
    }

    #[test]
    fn test_bip32_path() {
        let path = Bip32Path::parse("m/44'/60'/0'/0/0").unwrap();
        assert_eq!(
            path.child_numbers(),
            &[44 | HARDENED_OFFSET, 60 | HARDENED_OFFSET, HARDENED_OFFSET, 0, 0]
        );
        assert_eq!(path.to_string(), "m/44'/60'/0'/0/0");

        assert!(matches!(Bip32Path::parse("m/44'/x/0"), Err(Error::InvalidPathFormat(_))));
        assert!(matches!(Bip32Path::parse("m"), Err(Error::InvalidPathFormat(_))));
        assert!(matches!(
            Bip32Path::parse("m/2147483648"),
            Err(Error::InvalidPathSegment(_))
        ));
    }
}
