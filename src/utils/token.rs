//! Tracking token helpers

use uuid::Uuid;

/// Generate a fresh globally-unique tracking token
///
/// Canonical hyphenated UUIDv4; generated once per send and never reused.
pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}

/// Cheap shape check before touching the database
///
/// Tokens are hyphenated UUIDs; anything else is rejected without a
/// lookup so random probing never reaches the storage layer. Callers
/// still respond identically for malformed and unknown tokens.
pub fn is_valid_token(token: &str) -> bool {
    token.len() == 36
        && token
            .bytes()
            .all(|b| b == b'-' || b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_shape() {
        let token = new_token();
        assert!(is_valid_token(&token));

        // Two generations never collide
        assert_ne!(token, new_token());
    }

    #[test]
    fn test_is_valid_token_rejects_garbage() {
        assert!(is_valid_token("2b0c9a4e-7a13-4a5f-9b2e-0d8f3c6a1e57"));
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("short"));
        assert!(!is_valid_token("2b0c9a4e-7a13-4a5f-9b2e-0d8f3c6a1e5'; --"));
        assert!(!is_valid_token("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz"));
    }
}
