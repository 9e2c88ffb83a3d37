/// Constant-time equality for hex-encoded credential digests.
///
/// Login compares the digest of the submitted password against the stored
/// one. A short-circuiting `==` bails at the first differing byte, which
/// leaks how much of a prefix matched through response timing; the XOR fold
/// below touches every byte pair no matter where the mismatch sits. Lengths
/// are equal for any two well-formed digests, so the length check only
/// rejects malformed input early.
pub fn verify_digest(provided: &str, expected: &str) -> bool {
    provided.as_bytes().len() == expected.as_bytes().len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;

    #[test]
    fn test_matching_digests() {
        let digest = hash_password("pw1");
        assert!(verify_digest(&digest, &digest));
    }

    #[test]
    fn test_differing_digests() {
        assert!(!verify_digest(
            &hash_password("pw1"),
            &hash_password("pw2")
        ));
    }

    #[test]
    fn test_single_byte_difference() {
        assert!(!verify_digest("deadbeef", "deadbeee"));
        assert!(!verify_digest("deadbeef", "eeadbeef"));
    }

    #[test]
    fn test_length_mismatch() {
        assert!(!verify_digest("dead", "deadbeef"));
        assert!(!verify_digest("deadbeef", ""));
    }

    #[test]
    fn test_hex_case_matters() {
        // Digests are produced lowercase; uppercase input must not pass
        assert!(!verify_digest("DEADBEEF", "deadbeef"));
    }
}
