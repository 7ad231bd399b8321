use crate::domain::errors::DomainResult;
use crate::domain::user::{
    entity::{NewUser, User, UserUpdate},
    value_objects::{RefreshTokenHash, UserId, Username},
};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User>;

    async fn list(&self) -> DomainResult<Vec<User>>;

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>>;

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>>;

    /// Fails with `NotFound` when the user does not exist.
    async fn update(&self, update: UserUpdate) -> DomainResult<User>;

    /// Returns `false` when there was nothing to delete.
    async fn delete(&self, id: UserId) -> DomainResult<bool>;

    /// Blind overwrite of the stored refresh-token hash. Missing users are ignored.
    async fn set_refresh_token_hash(
        &self,
        id: UserId,
        hash: Option<RefreshTokenHash>,
    ) -> DomainResult<()>;

    /// Replace the stored hash only if it still equals `expected`.
    ///
    /// Returns `Ok(false)` and leaves the record untouched when the stored value
    /// differs (or the user is gone).
    async fn compare_and_swap_refresh_token_hash(
        &self,
        id: UserId,
        expected: &RefreshTokenHash,
        replacement: RefreshTokenHash,
    ) -> DomainResult<bool>;
}
