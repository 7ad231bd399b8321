use super::{AuthCommandService, credentials::refresh_denied};
use crate::{
    application::{
        dto::{TokenPair, TokenSubject},
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::{RefreshTokenHash, User, UserId},
};

pub struct RefreshTokensCommand {
    pub user_id: UserId,
    pub refresh_token: String,
}

impl AuthCommandService {
    /// Exchange the account's current refresh token for a new pair.
    ///
    /// A missing account, a signed-out account and a superseded token all
    /// yield the same `Forbidden`, including an account deleted while the
    /// refresh is in flight. Losing a race against a concurrent rotation of
    /// the same token yields `Conflict`.
    pub async fn refresh_tokens(
        &self,
        command: RefreshTokensCommand,
    ) -> ApplicationResult<TokenPair> {
        let (user, stored) = self
            .load_session(command.user_id, &command.refresh_token)
            .await?;

        if !self
            .hasher
            .verify(stored.as_str(), &command.refresh_token)
            .await?
        {
            tracing::warn!(user_id = %user.id, "refresh rejected: token does not match stored hash");
            return Err(refresh_denied());
        }

        self.rotate(&user, &stored).await
    }

    async fn load_session(
        &self,
        user_id: UserId,
        presented: &str,
    ) -> ApplicationResult<(User, RefreshTokenHash)> {
        let Some(user) = self.user_repo.find_by_id(user_id).await? else {
            self.burn_verification(presented).await?;
            tracing::warn!(user_id = %user_id, "refresh rejected: account does not exist");
            return Err(refresh_denied());
        };

        let Some(stored) = user.refresh_token_hash.clone() else {
            self.burn_verification(presented).await?;
            tracing::warn!(user_id = %user_id, "refresh rejected: no active session");
            return Err(refresh_denied());
        };

        Ok((user, stored))
    }

    async fn rotate(&self, user: &User, expected: &RefreshTokenHash) -> ApplicationResult<TokenPair> {
        let tokens = self
            .token_issuer
            .issue(&TokenSubject::from(user))
            .await?;
        let replacement = self.hash_refresh_token(&tokens.refresh_token).await?;

        if !self
            .session_store
            .rotate(user.id, expected, replacement)
            .await?
        {
            // The swap also fails when the account vanished in the meantime.
            if self.user_repo.find_by_id(user.id).await?.is_none() {
                tracing::warn!(user_id = %user.id, "refresh rejected: account deleted during rotation");
                return Err(refresh_denied());
            }
            tracing::warn!(user_id = %user.id, "refresh rejected: concurrent rotation won");
            return Err(ApplicationError::conflict(
                "refresh token was rotated concurrently",
            ));
        }

        tracing::info!(user_id = %user.id, "refresh token rotated");
        Ok(tokens)
    }
}
