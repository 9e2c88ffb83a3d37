use sha2::{Digest, Sha256};

/// Hash a plaintext password into its stored digest form.
///
/// SHA-256, hex-encoded. Deterministic: the same password always maps to
/// the same digest, so login can compare digests directly. The plaintext
/// is not retained after hashing.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        assert_eq!(hash_password("hunter2"), hash_password("hunter2"));
    }

    #[test]
    fn test_hash_differs_per_password() {
        assert_ne!(hash_password("hunter2"), hash_password("hunter3"));
    }

    #[test]
    fn test_hash_is_hex_sha256() {
        let digest = hash_password("pw1");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_known_vector() {
        // SHA-256 of the empty string
        assert_eq!(
            hash_password(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
