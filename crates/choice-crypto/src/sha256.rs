//! # Reputation Commitments
//!
//! A reputation hash is a compact public commitment to a score for an
//! address. It is pure and unsalted: the same `(address, score)` pair always
//! yields the same hash, so anyone holding both can verify it. Callers that
//! need unlinkability must salt before publishing.
//!
//! The preimage is the UTF-8 string `"{score}:{lowercase address}"`. This is
//! a fixed text format rather than a canonical JSON document, so it does not
//! go through `CanonicalBytes`.

use sha2::{Digest, Sha256};

use choice_core::Address;

/// Compute the `0x`-prefixed SHA-256 commitment to `score` for `address`.
pub fn generate_reputation_hash(address: &Address, score: u8) -> String {
    let preimage = format!("{score}:{}", address.storage_key());
    format!("0x{}", to_hex(&Sha256::digest(preimage.as_bytes())))
}

pub(crate) fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::new(s).unwrap()
    }

    #[test]
    fn hash_is_prefixed_hex() {
        let h = generate_reputation_hash(&addr("0xabc"), 60);
        assert!(h.starts_with("0x"));
        assert_eq!(h.len(), 2 + 64);
        assert!(h[2..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn hash_matches_preimage_digest() {
        let expected = format!("0x{}", to_hex(&Sha256::digest(b"60:0xabc")));
        assert_eq!(generate_reputation_hash(&addr("0xabc"), 60), expected);
    }

    #[test]
    fn hash_ignores_address_case() {
        assert_eq!(
            generate_reputation_hash(&addr("0xABC"), 42),
            generate_reputation_hash(&addr("0xabc"), 42)
        );
    }

    #[test]
    fn hash_binds_score() {
        assert_ne!(
            generate_reputation_hash(&addr("0xabc"), 42),
            generate_reputation_hash(&addr("0xabc"), 43)
        );
    }

    #[test]
    fn known_vector_empty_string_digest() {
        assert_eq!(
            to_hex(&Sha256::digest(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
