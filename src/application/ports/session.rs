use crate::application::ApplicationResult;
use crate::domain::user::{RefreshTokenHash, UserId};
use async_trait::async_trait;

/// Persistence of the single refresh-token hash each account may hold.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Overwrite whatever hash is stored (sign-up / sign-in).
    async fn store(&self, user_id: UserId, hash: RefreshTokenHash) -> ApplicationResult<()>;

    /// Drop the stored hash; idempotent.
    async fn clear(&self, user_id: UserId) -> ApplicationResult<()>;

    /// Atomically replace `expected` with `replacement`.
    ///
    /// Returns `Ok(false)` when the stored hash no longer equals `expected`,
    /// i.e. another rotation got there first.
    async fn rotate(
        &self,
        user_id: UserId,
        expected: &RefreshTokenHash,
        replacement: RefreshTokenHash,
    ) -> ApplicationResult<bool>;
}
