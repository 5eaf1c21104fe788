use crate::error::ApiError;
use crate::models::Claims;
use actix_web::http::header;
use actix_web::{dev::ServiceRequest, web, Error};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

/// Issues and validates signed bearer tokens. Stateless: validity is a pure
/// function of the token string, the fixed signing secret and the clock.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validity: Duration,
}

impl TokenService {
    /// Tokens expire 24 hours after issuance. Fixed policy, no refresh.
    pub fn new(secret: &str) -> Self {
        Self::with_validity(secret, Duration::hours(24))
    }

    pub fn with_validity(secret: &str, validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            validity,
        }
    }

    /// Signs a claim for `username`. The caller is responsible for having
    /// checked the credentials first.
    pub fn issue(&self, username: &str) -> Result<String, ApiError> {
        let expiration = Utc::now()
            .checked_add_signed(self.validity)
            .ok_or(ApiError::TokenCreation)?
            .timestamp() as usize;

        let claims = Claims {
            sub: username.to_owned(),
            exp: expiration,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|_| ApiError::TokenCreation)
    }

    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        self.validate_at(token, Utc::now())
    }

    /// Validates against an explicit clock. Malformed tokens, bad signatures
    /// and passed expiries all collapse into the same error.
    pub fn validate_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, ApiError> {
        let mut validation = Validation::default();
        // expiry is checked below against the supplied clock
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| ApiError::InvalidToken)?;

        if data.claims.exp as i64 <= now.timestamp() {
            return Err(ApiError::InvalidToken);
        }
        Ok(data.claims)
    }
}

/// Request interceptor for protected routes, used with
/// `HttpAuthentication::with_fn`. Expects the raw token in the
/// `Authorization` header, with no scheme prefix, so the unit extractor is
/// used instead of `BearerAuth` and the header is read here. The validated
/// claim is dropped; downstream handlers see the request unmodified.
pub async fn authenticate(
    req: ServiceRequest,
    _credentials: (),
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let token = match req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    {
        Some(token) if !token.is_empty() => token.to_owned(),
        _ => return Err((ApiError::MissingToken.into(), req)),
    };

    let tokens = match req.app_data::<web::Data<TokenService>>() {
        Some(tokens) => tokens,
        None => return Err((ApiError::Internal.into(), req)),
    };

    match tokens.validate(&token) {
        Ok(_claims) => Ok(req),
        Err(err) => Err((err.into(), req)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let tokens = TokenService::new("test-secret");
        let token = tokens.issue("user1").unwrap();

        let claims = tokens.validate(&token).unwrap();
        assert_eq!(claims.sub, "user1");
    }

    #[test]
    fn token_is_compact_three_segment() {
        let tokens = TokenService::new("test-secret");
        let token = tokens.issue("user1").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired_issuer = TokenService::with_validity("test-secret", Duration::hours(-1));
        let token = expired_issuer.issue("user1").unwrap();

        let tokens = TokenService::new("test-secret");
        assert!(tokens.validate(&token).is_err());
    }

    #[test]
    fn token_expires_once_clock_passes_window() {
        let tokens = TokenService::new("test-secret");
        let token = tokens.issue("user1").unwrap();

        let soon = Utc::now() + Duration::hours(1);
        assert!(tokens.validate_at(&token, soon).is_ok());

        let later = Utc::now() + Duration::hours(25);
        assert!(tokens.validate_at(&token, later).is_err());
    }

    #[test]
    fn garbage_token_is_rejected() {
        let tokens = TokenService::new("test-secret");
        assert!(tokens.validate("not-a-token").is_err());
        assert!(tokens.validate("").is_err());
    }

    #[test]
    fn truncated_token_is_rejected() {
        let tokens = TokenService::new("test-secret");
        let token = tokens.issue("user1").unwrap();
        assert!(tokens.validate(&token[..token.len() - 5]).is_err());
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let foreign = TokenService::new("other-secret");
        let token = foreign.issue("user1").unwrap();

        let tokens = TokenService::new("test-secret");
        assert!(tokens.validate(&token).is_err());
    }

    #[test]
    fn failure_modes_are_indistinguishable() {
        let tokens = TokenService::new("test-secret");
        let expired = TokenService::with_validity("test-secret", Duration::hours(-1))
            .issue("user1")
            .unwrap();

        let expired_err = tokens.validate(&expired).unwrap_err();
        let garbage_err = tokens.validate("not-a-token").unwrap_err();
        assert_eq!(expired_err.to_string(), garbage_err.to_string());
    }
}
