use crate::application::ApplicationResult;
use crate::application::ports::session::SessionStore;
use crate::domain::user::{RefreshTokenHash, UserId, UserRepository};
use async_trait::async_trait;
use std::sync::Arc;

/// Keeps the refresh-token hash on the account record itself.
pub struct AccountSessionStore {
    user_repo: Arc<dyn UserRepository>,
}

impl AccountSessionStore {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl SessionStore for AccountSessionStore {
    async fn store(&self, user_id: UserId, hash: RefreshTokenHash) -> ApplicationResult<()> {
        self.user_repo
            .set_refresh_token_hash(user_id, Some(hash))
            .await?;
        Ok(())
    }

    async fn clear(&self, user_id: UserId) -> ApplicationResult<()> {
        self.user_repo.set_refresh_token_hash(user_id, None).await?;
        Ok(())
    }

    async fn rotate(
        &self,
        user_id: UserId,
        expected: &RefreshTokenHash,
        replacement: RefreshTokenHash,
    ) -> ApplicationResult<bool> {
        Ok(self
            .user_repo
            .compare_and_swap_refresh_token_hash(user_id, expected, replacement)
            .await?)
    }
}
