//! Token codec: HS256-signed claim sets over an injected secret.
//!
//! Verification is a pure cryptographic check; it never consults the
//! credential store. Session binding happens one layer up.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};

use gatehouse_core::{DomainError, UserId};

use crate::{AuthError, AuthResult, Claims, Role};

pub struct TokenCodec {
    header: Header,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Option<Duration>,
}

impl TokenCodec {
    /// Codec issuing tokens without expiry: session superseding is the only
    /// invalidation mechanism, matching the source design.
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is optional on our claims; validate it only when present.
        validation.required_spec_claims.clear();
        validation.validate_exp = true;

        Self {
            header: Header::new(Algorithm::HS256),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: None,
        }
    }

    /// Codec stamping an expiry on every issued token, as defense in depth
    /// on top of session superseding.
    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        let mut codec = Self::new(secret);
        codec.ttl = Some(ttl);
        codec
    }

    pub fn issue(&self, subject: UserId, role: Role) -> AuthResult<String> {
        let claims = match self.ttl {
            Some(ttl) => Claims::with_expiry(subject, role, (Utc::now() + ttl).timestamp()),
            None => Claims::new(subject, role),
        };

        jsonwebtoken::encode(&self.header, &claims, &self.encoding)
            .map_err(|e| AuthError::Store(DomainError::storage(format!("token encode: {e}"))))
    }

    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use proptest::prelude::*;

    use super::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"unit-test-secret")
    }

    #[test]
    fn issue_then_verify_round_trips_claims() {
        let codec = codec();
        let subject = UserId::new();

        let token = codec.issue(subject, Role::ContentAdmin).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, subject);
        assert_eq!(claims.role, Role::ContentAdmin);
        assert_eq!(claims.exp, None);
    }

    #[test]
    fn repeated_issue_yields_distinct_tokens() {
        let codec = codec();
        let subject = UserId::new();

        let first = codec.issue(subject, Role::ContentAdmin).unwrap();
        let second = codec.issue(subject, Role::ContentAdmin).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = TokenCodec::new(b"some-other-secret");
        let token = other.issue(UserId::new(), Role::SuperAdmin).unwrap();

        assert_eq!(codec().verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert_eq!(codec().verify("not-a-token"), Err(AuthError::InvalidToken));
        assert_eq!(codec().verify(""), Err(AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = TokenCodec::with_ttl(b"unit-test-secret", Duration::seconds(-90));
        let token = codec.issue(UserId::new(), Role::ContentAdmin).unwrap();

        assert_eq!(codec.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn unexpired_ttl_token_verifies() {
        let codec = TokenCodec::with_ttl(b"unit-test-secret", Duration::minutes(10));
        let token = codec.issue(UserId::new(), Role::ContentAdmin).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert!(claims.exp.is_some());
    }

    proptest! {
        /// Flipping any single bit of the signature must invalidate the
        /// token, independent of claim content.
        #[test]
        fn flipped_signature_bit_never_verifies(bit in 0usize..256) {
            let codec = codec();
            let token = codec.issue(UserId::new(), Role::SuperAdmin).unwrap();

            let (head, sig_b64) = token.rsplit_once('.').unwrap();
            let mut sig = URL_SAFE_NO_PAD.decode(sig_b64).unwrap();
            let bit = bit % (sig.len() * 8);
            sig[bit / 8] ^= 1 << (bit % 8);

            let tampered = format!("{head}.{}", URL_SAFE_NO_PAD.encode(&sig));
            prop_assert_eq!(codec.verify(&tampered), Err(AuthError::InvalidToken));
        }
    }
}
