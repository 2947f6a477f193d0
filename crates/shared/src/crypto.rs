//! Cryptographic utilities for API key generation and hashing.

use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of the random portion of an API key.
const KEY_RANDOM_LEN: usize = 32;

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Generates a new API key of the form `rm_<32 alphanumeric chars>`.
///
/// Only the SHA-256 hash of the full key is ever stored; the plaintext is
/// shown to the caller once at creation time.
pub fn generate_api_key() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("rm_{}", random)
}

/// Extracts the prefix from an API key (first 8 characters after "rm_").
///
/// The prefix is stored alongside the hash so keys can be identified in
/// listings without revealing the full key.
pub fn extract_key_prefix(key: &str) -> Option<&str> {
    if key.starts_with("rm_") && key.len() >= 11 {
        Some(&key[3..11])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex() {
        let hash = sha256_hex("test");
        assert_eq!(hash.len(), 64);
        assert_eq!(
            hash,
            "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08"
        );
    }

    #[test]
    fn test_sha256_hex_empty_string() {
        let hash = sha256_hex("");
        assert_eq!(hash.len(), 64);
        // SHA256 of empty string
        assert_eq!(
            hash,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_sha256_hex_deterministic() {
        let hash1 = sha256_hex("same_input");
        let hash2 = sha256_hex("same_input");
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_generate_api_key_format() {
        let key = generate_api_key();
        assert!(key.starts_with("rm_"));
        assert_eq!(key.len(), 3 + KEY_RANDOM_LEN);
        assert!(key[3..].chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generate_api_key_unique() {
        let a = generate_api_key();
        let b = generate_api_key();
        assert_ne!(a, b);
    }

    #[test]
    fn test_extract_key_prefix() {
        assert_eq!(extract_key_prefix("rm_abcdefgh12345678"), Some("abcdefgh"));
        assert_eq!(extract_key_prefix("rm_short"), None);
        assert_eq!(extract_key_prefix("pk_abcdefgh12345678"), None);
        assert_eq!(extract_key_prefix(""), None);
    }

    #[test]
    fn test_sha256_hex_arbitrary_inputs() {
        use fake::{faker::lorem::en::Word, Fake};
        for _ in 0..10 {
            let word: String = Word().fake();
            assert_eq!(sha256_hex(&word).len(), 64);
        }
    }

    #[test]
    fn test_generated_key_prefix_roundtrip() {
        let key = generate_api_key();
        let prefix = extract_key_prefix(&key).unwrap();
        assert_eq!(prefix.len(), 8);
        assert!(key[3..].starts_with(prefix));
    }
}
