//! Checksum algorithm tags.
//!
//! Closed enumeration of the hash algorithms that can appear on a package
//! `<sum>` element, with one stable lowercase wire name per tag. Keeping
//! this a closed enum stops typos from reaching the serialized output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Hash algorithm tag for package checksums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChecksumType {
    Md5,
    Sha,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
}

impl ChecksumType {
    /// Canonical lowercase name used on the wire.
    pub fn as_name(&self) -> &'static str {
        match self {
            ChecksumType::Md5 => "md5",
            ChecksumType::Sha => "sha",
            ChecksumType::Sha1 => "sha1",
            ChecksumType::Sha224 => "sha224",
            ChecksumType::Sha256 => "sha256",
            ChecksumType::Sha384 => "sha384",
            ChecksumType::Sha512 => "sha512",
        }
    }

    /// Look up a tag from its wire name, case-insensitively.
    ///
    /// Returns `None` for names outside the table; callers decide whether
    /// that is a warning (parser) or simply an unset field.
    pub fn from_name(name: &str) -> Option<ChecksumType> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Some(ChecksumType::Md5),
            "sha" => Some(ChecksumType::Sha),
            "sha1" => Some(ChecksumType::Sha1),
            "sha224" => Some(ChecksumType::Sha224),
            "sha256" => Some(ChecksumType::Sha256),
            "sha384" => Some(ChecksumType::Sha384),
            "sha512" => Some(ChecksumType::Sha512),
            _ => None,
        }
    }
}

impl fmt::Display for ChecksumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names() {
        assert_eq!(ChecksumType::Md5.as_name(), "md5");
        assert_eq!(ChecksumType::Sha.as_name(), "sha");
        assert_eq!(ChecksumType::Sha1.as_name(), "sha1");
        assert_eq!(ChecksumType::Sha224.as_name(), "sha224");
        assert_eq!(ChecksumType::Sha256.as_name(), "sha256");
        assert_eq!(ChecksumType::Sha384.as_name(), "sha384");
        assert_eq!(ChecksumType::Sha512.as_name(), "sha512");
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(ChecksumType::from_name("sha1"), Some(ChecksumType::Sha1));
        assert_eq!(ChecksumType::from_name("SHA1"), Some(ChecksumType::Sha1));
        assert_eq!(ChecksumType::from_name("Sha256"), Some(ChecksumType::Sha256));
    }

    #[test]
    fn test_from_name_unknown() {
        assert_eq!(ChecksumType::from_name(""), None);
        assert_eq!(ChecksumType::from_name("crc32"), None);
        assert_eq!(ChecksumType::from_name("sha-1"), None);
    }

    #[test]
    fn test_name_round_trip() {
        for ty in [
            ChecksumType::Md5,
            ChecksumType::Sha,
            ChecksumType::Sha1,
            ChecksumType::Sha224,
            ChecksumType::Sha256,
            ChecksumType::Sha384,
            ChecksumType::Sha512,
        ] {
            assert_eq!(ChecksumType::from_name(ty.as_name()), Some(ty));
        }
    }
}
