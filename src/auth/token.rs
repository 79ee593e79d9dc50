//! Login token
//!
//! The token is `base64(email|unix_seconds)`. It is not signed and nothing
//! verifies it; it only identifies who logged in and when.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Issue a token for `email` at `issued_at` (unix seconds)
pub fn issue_token(email: &str, issued_at: i64) -> String {
    STANDARD.encode(format!("{}|{}", email, issued_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_encodes_email_and_time() {
        let token = issue_token("ivan@example.com", 1_700_000_000);
        let decoded = STANDARD.decode(token).unwrap();
        assert_eq!(decoded, b"ivan@example.com|1700000000");
    }
}
