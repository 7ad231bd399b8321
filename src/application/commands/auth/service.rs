use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::application::{
    ApplicationResult,
    dto::{TokenPair, TokenSubject},
    ports::{
        security::{CredentialHasher, TokenIssuer},
        session::SessionStore,
        time::Clock,
    },
};
use crate::domain::user::{RefreshTokenHash, User, UserRepository};

/// Throwaway secret hashed once so failure paths can burn a real verification.
const TIMING_DECOY_SECRET: &str = "thingbox-timing-decoy";

pub struct AuthCommandService {
    pub(super) user_repo: Arc<dyn UserRepository>,
    pub(super) hasher: Arc<dyn CredentialHasher>,
    pub(super) token_issuer: Arc<dyn TokenIssuer>,
    pub(super) session_store: Arc<dyn SessionStore>,
    pub(super) clock: Arc<dyn Clock>,
    decoy_digest: OnceCell<String>,
}

impl AuthCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
        session_store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            token_issuer,
            session_store,
            clock,
            decoy_digest: OnceCell::new(),
        }
    }

    /// Issue a fresh pair for `user` and make its refresh half the only one
    /// the account accepts.
    pub(super) async fn issue_and_store(&self, user: &User) -> ApplicationResult<TokenPair> {
        let tokens = self.token_issuer.issue(&TokenSubject::from(user)).await?;
        let hash = self.hash_refresh_token(&tokens.refresh_token).await?;
        self.session_store.store(user.id, hash).await?;
        Ok(tokens)
    }

    pub(super) async fn hash_refresh_token(
        &self,
        refresh_token: &str,
    ) -> ApplicationResult<RefreshTokenHash> {
        let digest = self.hasher.hash(refresh_token).await?;
        Ok(RefreshTokenHash::new(digest)?)
    }

    /// Hash the decoy digest up front. Until this runs, the first failure
    /// that needs the decoy also pays for building it.
    pub async fn warm_up(&self) -> ApplicationResult<()> {
        self.decoy_digest().await.map(|_| ())
    }

    async fn decoy_digest(&self) -> ApplicationResult<&str> {
        self.decoy_digest
            .get_or_try_init(|| self.hasher.hash(TIMING_DECOY_SECRET))
            .await
            .map(String::as_str)
    }

    /// Run one full verification against a decoy digest so that "no such
    /// account" and "no session" cost the same as a real mismatch.
    pub(super) async fn burn_verification(&self, presented: &str) -> ApplicationResult<()> {
        let digest = self.decoy_digest().await?;
        let _ = self.hasher.verify(digest, presented).await?;
        Ok(())
    }
}
