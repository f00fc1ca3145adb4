//! Authentication integration tests
//!
//! Tests for credential validation and token round-trips

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

use shared::validation::{normalize_bd_phone, validate_bd_phone, validate_password};

/// Claims mirroring the backend's access token payload
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
    iat: i64,
}

fn make_token(secret: &str, sub: &str, expires_in: i64) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: sub.to_string(),
        exp: (now + Duration::seconds(expires_in)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn decode_token(secret: &str, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Common Bangladeshi mobile formats are accepted
    #[test]
    fn test_valid_phone_formats() {
        assert!(validate_bd_phone("01712345678").is_ok());
        assert!(validate_bd_phone("+8801712345678").is_ok());
        assert!(validate_bd_phone("017-1234-5678").is_ok());
    }

    /// Landline and malformed numbers are rejected
    #[test]
    fn test_invalid_phone_formats() {
        assert!(validate_bd_phone("029876543").is_err());
        assert!(validate_bd_phone("12345").is_err());
        assert!(validate_bd_phone("not-a-number").is_err());
    }

    /// Every accepted format normalizes to the same local form
    #[test]
    fn test_phone_normalization_converges() {
        let forms = ["01712345678", "+8801712345678", "017-1234-5678", "1712345678"];
        for form in forms {
            assert_eq!(normalize_bd_phone(form).unwrap(), "01712345678");
        }
    }

    /// Password length floor
    #[test]
    fn test_password_validation() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    /// A token signed and decoded with the same secret round-trips
    #[test]
    fn test_token_round_trip() {
        let secret = "test-secret";
        let token = make_token(secret, "farmer-123", 3600);
        let claims = decode_token(secret, &token).unwrap();
        assert_eq!(claims.sub, "farmer-123");
        assert!(claims.exp > claims.iat);
    }

    /// A token decoded with the wrong secret fails
    #[test]
    fn test_token_wrong_secret() {
        let token = make_token("secret-a", "farmer-123", 3600);
        assert!(decode_token("secret-b", &token).is_err());
    }

    /// An expired token fails validation
    #[test]
    fn test_expired_token() {
        let secret = "test-secret";
        // Expired an hour ago; default validation has 60s leeway
        let token = make_token(secret, "farmer-123", -3600);
        assert!(decode_token(secret, &token).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Any 9-digit suffix after the 01 prefix is a valid mobile
        #[test]
        fn prop_local_mobile_accepted(suffix in proptest::string::string_regex("[0-9]{9}").unwrap()) {
            let phone = format!("01{}", suffix);
            prop_assert!(validate_bd_phone(&phone).is_ok());
            prop_assert_eq!(normalize_bd_phone(&phone).unwrap(), phone);
        }

        /// International form normalizes to the local form
        #[test]
        fn prop_international_normalizes(suffix in proptest::string::string_regex("1[0-9]{9}").unwrap()) {
            let international = format!("880{}", suffix);
            let local = format!("0{}", suffix);
            prop_assert!(validate_bd_phone(&international).is_ok());
            prop_assert_eq!(normalize_bd_phone(&international).unwrap(), local);
        }

        /// Normalization output always validates
        #[test]
        fn prop_normalization_idempotent(suffix in proptest::string::string_regex("[0-9]{9}").unwrap()) {
            let phone = format!("01{}", suffix);
            let normalized = normalize_bd_phone(&phone).unwrap();
            prop_assert!(validate_bd_phone(&normalized).is_ok());
            prop_assert_eq!(normalize_bd_phone(&normalized).unwrap(), normalized);
        }

        /// Passwords of 8 or more characters pass, shorter fail
        #[test]
        fn prop_password_length_floor(len in 0usize..=32) {
            let password = "x".repeat(len);
            prop_assert_eq!(validate_password(&password).is_ok(), len >= 8);
        }

        /// Claims survive an encode/decode round-trip
        #[test]
        fn prop_token_round_trip(sub in proptest::string::string_regex("[a-f0-9-]{8,36}").unwrap()) {
            let secret = "prop-secret";
            let token = make_token(secret, &sub, 3600);
            let claims = decode_token(secret, &token).unwrap();
            prop_assert_eq!(claims.sub, sub);
        }
    }
}
