use rand::RngCore;

/// Token byte length before hex encoding (32 bytes = 64 hex chars = 256 bits).
pub const TOKEN_BYTES: usize = 32;

/// Issue a fresh session token.
///
/// Drawn from the thread-local CSPRNG. 256 bits of entropy makes guessing
/// or accidental collision computationally infeasible; the store still
/// rejects a colliding token outright so lookup-by-token stays unambiguous.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length() {
        assert_eq!(generate_token().len(), TOKEN_BYTES * 2);
    }

    #[test]
    fn test_token_is_hex() {
        assert!(generate_token().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }
}
