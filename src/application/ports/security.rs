// src/application/ports/security.rs
use crate::application::{
    ApplicationResult,
    dto::{TokenClaims, TokenKind, TokenPair, TokenSubject},
};
use async_trait::async_trait;

/// Salted, memory-hard one-way hashing for secrets the server must re-verify
/// later without storing them: passwords and refresh tokens alike.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, plaintext: &str) -> ApplicationResult<String>;

    /// `Ok(false)` on mismatch; errors are reserved for the hashing machinery itself.
    async fn verify(&self, digest: &str, plaintext: &str) -> ApplicationResult<bool>;
}

#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Sign an access/refresh pair for the subject.
    async fn issue(&self, subject: &TokenSubject) -> ApplicationResult<TokenPair>;

    /// Check signature, structure and expiry against the secret for `kind`.
    fn verify(&self, token: &str, kind: TokenKind) -> ApplicationResult<TokenClaims>;

    /// Read claims without any verification. Only for tokens this issuer just produced.
    fn decode(&self, token: &str) -> ApplicationResult<TokenClaims>;
}
