//! Whole-file content hashing.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of `bytes`.
#[must_use]
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_digest() {
        assert_eq!(
            content_hash(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn different_content_different_hash() {
        assert_ne!(content_hash(b"function a() {}"), content_hash(b"function a() { }"));
    }
}
