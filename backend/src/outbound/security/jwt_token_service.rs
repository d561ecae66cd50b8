//! HS256 JSON Web Token implementation of the `TokenService` port.
//!
//! Access and reset tokens share the signing secret and are told apart by
//! the `purpose` claim. Expiry is checked against the caller-supplied `now`
//! with zero leeway instead of the system clock.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{IssuedToken, ResetClaims, TokenService, TokenServiceError};
use crate::domain::{EmailAddress, UserAccount};

use super::SigningSecret;

const ACCESS_PURPOSE: &str = "access";
const RESET_PURPOSE: &str = "password_reset";

/// Token issuance parameters.
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// `iss` claim written and required.
    pub issuer: String,
    /// `aud` claim written and required.
    pub audience: String,
    /// Lifetime of access tokens.
    pub access_ttl: Duration,
    /// Lifetime of password reset tokens.
    pub reset_ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    email: String,
    iss: String,
    aud: String,
    iat: i64,
    exp: i64,
    purpose: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    jti: Option<String>,
}

/// Signs and verifies tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    settings: JwtSettings,
}

impl JwtTokenService {
    /// Create a service signing with `secret`.
    pub fn new(secret: &SigningSecret, settings: JwtSettings) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.expose()),
            decoding: DecodingKey::from_secret(secret.expose()),
            settings,
        }
    }

    fn issue(
        &self,
        account: &UserAccount,
        now: DateTime<Utc>,
        ttl: Duration,
        purpose: &str,
        jti: Option<String>,
    ) -> Result<IssuedToken, TokenServiceError> {
        let exp = (now + ttl).timestamp();
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| TokenServiceError::signing("token expiry out of range"))?;
        let claims = Claims {
            sub: account.id().to_string(),
            email: account.email().to_string(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            iat: now.timestamp(),
            exp,
            purpose: purpose.to_owned(),
            jti,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenServiceError::signing(err.to_string()))?;
        Ok(IssuedToken { token, expires_at })
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.settings.issuer]);
        validation.set_audience(&[&self.settings.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation
    }
}

impl TokenService for JwtTokenService {
    fn issue_access_token(
        &self,
        account: &UserAccount,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenServiceError> {
        self.issue(account, now, self.settings.access_ttl, ACCESS_PURPOSE, None)
    }

    fn issue_reset_token(
        &self,
        account: &UserAccount,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenServiceError> {
        let jti = Uuid::new_v4().to_string();
        self.issue(account, now, self.settings.reset_ttl, RESET_PURPOSE, Some(jti))
    }

    fn verify_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<ResetClaims, TokenServiceError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation())
            .map_err(|err| TokenServiceError::invalid(err.to_string()))?
            .claims;

        if claims.purpose != RESET_PURPOSE {
            return Err(TokenServiceError::invalid("token is not a password reset token"));
        }
        if now.timestamp() >= claims.exp {
            return Err(TokenServiceError::invalid("token has expired"));
        }
        let email = EmailAddress::parse(&claims.email)
            .map_err(|err| TokenServiceError::invalid(err.to_string()))?;
        Ok(ResetClaims { email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountId, PasswordHash};
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

    fn settings(issuer: &str) -> JwtSettings {
        JwtSettings {
            issuer: issuer.to_owned(),
            audience: "addressbook-clients".to_owned(),
            access_ttl: Duration::minutes(60),
            reset_ttl: Duration::minutes(15),
        }
    }

    fn service_with(secret: &[u8], issuer: &str) -> JwtTokenService {
        JwtTokenService::new(
            &SigningSecret::from_bytes(secret).expect("valid secret"),
            settings(issuer),
        )
    }

    #[fixture]
    fn service() -> JwtTokenService {
        service_with(SECRET, "addressbook")
    }

    #[fixture]
    fn account() -> UserAccount {
        UserAccount::new(
            AccountId::new(5).expect("positive id"),
            EmailAddress::parse("mae@example.com").expect("valid email"),
            PasswordHash::new("$argon2id$stub").expect("non-empty"),
            None,
        )
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    fn reset_token_verifies_before_expiry(service: JwtTokenService, account: UserAccount) {
        let issued = service.issue_reset_token(&account, now()).expect("issued");

        assert_eq!(issued.expires_at, now() + Duration::minutes(15));
        let claims = service
            .verify_reset_token(&issued.token, now() + Duration::minutes(14))
            .expect("valid token");
        assert_eq!(claims.email, *account.email());
    }

    #[rstest]
    #[case::at_expiry(Duration::minutes(15))]
    #[case::after_expiry(Duration::minutes(16))]
    fn reset_token_expires_without_leeway(
        service: JwtTokenService,
        account: UserAccount,
        #[case] elapsed: Duration,
    ) {
        let issued = service.issue_reset_token(&account, now()).expect("issued");

        let error = service
            .verify_reset_token(&issued.token, now() + elapsed)
            .expect_err("expired");
        assert!(matches!(error, TokenServiceError::Invalid { .. }));
    }

    #[rstest]
    fn access_token_is_not_a_reset_token(service: JwtTokenService, account: UserAccount) {
        let issued = service.issue_access_token(&account, now()).expect("issued");

        assert_eq!(issued.expires_at, now() + Duration::minutes(60));
        assert!(service.verify_reset_token(&issued.token, now()).is_err());
    }

    #[rstest]
    fn reset_tokens_are_unique(service: JwtTokenService, account: UserAccount) {
        let first = service.issue_reset_token(&account, now()).expect("issued");
        let second = service.issue_reset_token(&account, now()).expect("issued");

        assert_ne!(first.token, second.token);
    }

    #[rstest]
    #[case::other_secret(service_with(b"ffffffffffffffffffffffffffffffff", "addressbook"))]
    #[case::other_issuer(service_with(SECRET, "someone-else"))]
    fn foreign_tokens_are_rejected(
        service: JwtTokenService,
        account: UserAccount,
        #[case] foreign: JwtTokenService,
    ) {
        let issued = foreign.issue_reset_token(&account, now()).expect("issued");

        assert!(service.verify_reset_token(&issued.token, now()).is_err());
    }

    #[rstest]
    fn garbage_is_rejected(service: JwtTokenService) {
        assert!(service.verify_reset_token("not.a.jwt", now()).is_err());
    }
}
