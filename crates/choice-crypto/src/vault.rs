//! # Vault Encryption
//!
//! Seals a serializable value under a key derived from a wallet signature.
//!
//! ## Format
//!
//! `hex(nonce || ciphertext)` where the nonce is 12 random bytes and the
//! ciphertext carries the 16-byte GCM tag. The key is `SHA-256(signature)`,
//! so every byte of the signature contributes to the key.
//!
//! ## Failure
//!
//! A wrong signature fails GCM authentication and returns
//! [`CryptoError::Decryption`]. There is no path that turns a failed
//! decryption into an empty value.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};

use choice_core::CryptoError;

use crate::sha256::to_hex;

const NONCE_LEN: usize = 12;

/// Encrypt `value` as JSON under a key derived from `signature`.
pub fn encrypt<T: Serialize>(value: &T, signature: &str) -> Result<String, CryptoError> {
    let cipher = cipher_for(signature)?;
    let plaintext =
        serde_json::to_vec(value).map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_slice())
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;

    let mut sealed = nonce_bytes.to_vec();
    sealed.extend_from_slice(&ciphertext);
    Ok(to_hex(&sealed))
}

/// Decrypt a value produced by [`encrypt`] with the same `signature`.
///
/// # Errors
///
/// - [`CryptoError::MalformedCiphertext`] for bad hex or a truncated payload.
/// - [`CryptoError::Decryption`] when the signature does not match or the
///   plaintext is not the expected JSON shape.
pub fn decrypt<T: DeserializeOwned>(sealed: &str, signature: &str) -> Result<T, CryptoError> {
    let bytes = hex_to_bytes(sealed.trim()).map_err(CryptoError::MalformedCiphertext)?;
    if bytes.len() <= NONCE_LEN {
        return Err(CryptoError::MalformedCiphertext(format!(
            "payload of {} bytes is shorter than nonce plus tag",
            bytes.len()
        )));
    }
    let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);

    let cipher = cipher_for(signature)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| {
            tracing::warn!("vault decryption failed; signature does not match");
            CryptoError::Decryption("authentication failed; invalid signature?".to_string())
        })?;

    serde_json::from_slice(&plaintext)
        .map_err(|e| CryptoError::Decryption(format!("plaintext is not the expected JSON: {e}")))
}

fn cipher_for(signature: &str) -> Result<Aes256Gcm, CryptoError> {
    if signature.is_empty() {
        return Err(CryptoError::Encryption(
            "signature must not be empty".to_string(),
        ));
    }
    let key = Sha256::digest(signature.as_bytes());
    Aes256Gcm::new_from_slice(&key).map_err(|e| CryptoError::Encryption(e.to_string()))
}

fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, String> {
    if hex.len() % 2 != 0 {
        return Err("hex string must have even length".to_string());
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .ok_or_else(|| format!("non-ASCII input at position {i}"))
                .and_then(|pair| {
                    u8::from_str_radix(pair, 16)
                        .map_err(|e| format!("invalid hex at position {i}: {e}"))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Payload {
        address: String,
        score: u8,
    }

    fn payload() -> Payload {
        Payload {
            address: "0xabc".to_string(),
            score: 60,
        }
    }

    const SIG: &str = "0x4f1c9a7e2b0d8c6a5e3f1b9d7c5a3e1f0b8d6c4a2e0f9b7d5c3a1e8f6b4d2c0a";

    #[test]
    fn encrypt_then_decrypt_recovers_value() {
        let sealed = encrypt(&payload(), SIG).unwrap();
        let opened: Payload = decrypt(&sealed, SIG).unwrap();
        assert_eq!(opened, payload());
    }

    #[test]
    fn ciphertext_is_hex_and_not_plaintext() {
        let sealed = encrypt(&payload(), SIG).unwrap();
        assert!(sealed.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!sealed.contains("0xabc"));
    }

    #[test]
    fn fresh_nonce_per_encryption() {
        let a = encrypt(&payload(), SIG).unwrap();
        let b = encrypt(&payload(), SIG).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_signature_is_a_decryption_error() {
        let sealed = encrypt(&payload(), SIG).unwrap();
        let err = decrypt::<Payload>(&sealed, "0xdifferent").unwrap_err();
        assert!(matches!(err, CryptoError::Decryption(_)));
    }

    #[test]
    fn signature_sharing_a_prefix_does_not_decrypt() {
        let sealed = encrypt(&payload(), SIG).unwrap();
        let mut other = SIG[..40].to_string();
        other.push_str("ffffffffffffffffffffffffff");
        assert!(decrypt::<Payload>(&sealed, &other).is_err());
    }

    #[test]
    fn tampered_ciphertext_is_rejected() {
        let mut sealed = encrypt(&payload(), SIG).unwrap();
        let last = sealed.pop().unwrap();
        sealed.push(if last == '0' { '1' } else { '0' });
        assert!(matches!(
            decrypt::<Payload>(&sealed, SIG),
            Err(CryptoError::Decryption(_))
        ));
    }

    #[test]
    fn malformed_input_is_reported_as_such() {
        assert!(matches!(
            decrypt::<Payload>("zz", SIG),
            Err(CryptoError::MalformedCiphertext(_))
        ));
        assert!(matches!(
            decrypt::<Payload>("abc", SIG),
            Err(CryptoError::MalformedCiphertext(_))
        ));
        assert!(matches!(
            decrypt::<Payload>("00112233", SIG),
            Err(CryptoError::MalformedCiphertext(_))
        ));
    }

    #[test]
    fn empty_signature_is_refused() {
        assert!(encrypt(&payload(), "").is_err());
    }
}
