use base64::{engine::general_purpose, Engine as _};
use rand::{thread_rng, Rng};

/// Generates a cryptographically secure API key with 256 bits of entropy.
///
/// The key is formatted as `nk-{base64url_encoded_random_bytes}` where the
/// random bytes are 32 bytes (256 bits) of cryptographically secure random data.
pub fn generate_api_key() -> String {
    // Generate 32 bytes (256 bits) of cryptographically secure random data
    let mut key_bytes = [0u8; 32];
    thread_rng().fill(&mut key_bytes);

    format!("nk-{}", general_purpose::URL_SAFE_NO_PAD.encode(key_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_api_key_format() {
        let key = generate_api_key();
        assert!(key.starts_with("nk-"));
        // "nk-" + 43 base64url chars for 32 bytes without padding
        assert_eq!(key.len(), 46);
        assert!(!key.contains('='));
    }

    #[test]
    fn test_generate_api_key_unique() {
        let key1 = generate_api_key();
        let key2 = generate_api_key();
        assert_ne!(key1, key2);
    }
}
