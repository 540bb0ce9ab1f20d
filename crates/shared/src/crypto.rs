//! API key generation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;

/// Prefix carried by every generated API key.
pub const API_KEY_PREFIX: &str = "mib_";

/// Number of random bytes behind a key (encodes to 32 base64 characters).
const API_KEY_RANDOM_BYTES: usize = 24;

/// Generates a new API key: `mib_` followed by 32 URL-safe base64 characters.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_RANDOM_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("{}{}", API_KEY_PREFIX, URL_SAFE_NO_PAD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_api_key_format() {
        let key = generate_api_key();
        assert!(key.starts_with(API_KEY_PREFIX));
        assert_eq!(key.len(), API_KEY_PREFIX.len() + 32);
        assert!(key[API_KEY_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_generate_api_key_unique() {
        assert_ne!(generate_api_key(), generate_api_key());
    }
}
