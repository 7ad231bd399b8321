// src/infrastructure/security/token.rs
use crate::application::{
    dto::{TokenClaims, TokenKind, TokenPair, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::{security::TokenIssuer, time::Clock},
};
use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::{sync::Arc, time::Duration};
use uuid::Uuid;

/// Secrets and lifetimes for the two token kinds.
#[derive(Clone)]
pub struct SigningConfig {
    pub access_secret: String,
    pub access_ttl: Duration,
    pub refresh_secret: String,
    pub refresh_ttl: Duration,
}

struct KindKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: ChronoDuration,
}

impl KindKeys {
    fn new(secret: &str, ttl: Duration) -> ApplicationResult<Self> {
        let ttl = ChronoDuration::from_std(ttl)
            .map_err(|err| ApplicationError::infrastructure(format!("token ttl: {err}")))?;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }
}

/// HS256 JWT issuer; access and refresh tokens are signed with different
/// secrets so one can never pass for the other.
pub struct JwtTokenIssuer {
    access: KindKeys,
    refresh: KindKeys,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    pub fn new(config: SigningConfig, clock: Arc<dyn Clock>) -> ApplicationResult<Self> {
        Ok(Self {
            access: KindKeys::new(&config.access_secret, config.access_ttl)?,
            refresh: KindKeys::new(&config.refresh_secret, config.refresh_ttl)?,
            clock,
        })
    }

    fn keys(&self, kind: TokenKind) -> &KindKeys {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }

    fn claims_for(&self, subject: &TokenSubject, kind: TokenKind) -> ApplicationResult<TokenClaims> {
        let keys = self.keys(kind);
        let issued_at = self.clock.now();
        let expires_at = issued_at
            .checked_add_signed(keys.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token expiration overflow"))?;

        Ok(TokenClaims {
            sub: subject.user_id.to_string(),
            username: subject.username.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    fn seal(&self, claims: &TokenClaims, kind: TokenKind) -> ApplicationResult<String> {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &self.keys(kind).encoding,
        )
        .map_err(|err| ApplicationError::infrastructure(format!("failed to sign {kind} token: {err}")))
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        validation
    }
}

#[async_trait]
impl TokenIssuer for JwtTokenIssuer {
    async fn issue(&self, subject: &TokenSubject) -> ApplicationResult<TokenPair> {
        let access_claims = self.claims_for(subject, TokenKind::Access)?;
        let refresh_claims = self.claims_for(subject, TokenKind::Refresh)?;

        let (access_token, refresh_token) = tokio::try_join!(
            async { self.seal(&access_claims, TokenKind::Access) },
            async { self.seal(&refresh_claims, TokenKind::Refresh) }
        )?;

        // Derive the reported lifetimes from what was actually signed.
        let access = self.decode(&access_token)?;
        let refresh = self.decode(&refresh_token)?;

        Ok(TokenPair {
            access_token,
            access_expires_in: access.exp - access.iat,
            refresh_token,
            refresh_expires_at: refresh.expires_at()?,
        })
    }

    fn verify(&self, token: &str, kind: TokenKind) -> ApplicationResult<TokenClaims> {
        let mut validation = self.validation();
        // Expiry is judged against the injected clock, not the OS time.
        validation.validate_exp = false;

        let claims = decode::<TokenClaims>(token, &self.keys(kind).decoding, &validation)
            .map_err(|err| ApplicationError::unauthorized(format!("invalid {kind} token: {err}")))?
            .claims;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(ApplicationError::unauthorized(format!("{kind} token expired")));
        }

        Ok(claims)
    }

    fn decode(&self, token: &str) -> ApplicationResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)
            .map(|data| data.claims)
            .map_err(|err| ApplicationError::unauthorized(format!("malformed token: {err}")))
    }
}
