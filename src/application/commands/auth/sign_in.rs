use super::{AuthCommandService, credentials::invalid_credentials};
use crate::{
    application::{dto::TokenPair, error::ApplicationResult},
    domain::user::Username,
};

pub struct SignInCommand {
    pub username: String,
    pub password: String,
}

impl AuthCommandService {
    /// Malformed or unknown usernames and wrong passwords fail identically.
    pub async fn sign_in(&self, command: SignInCommand) -> ApplicationResult<TokenPair> {
        let Ok(username) = Username::new(command.username) else {
            self.burn_verification(&command.password).await?;
            tracing::warn!("sign-in rejected: malformed username");
            return Err(invalid_credentials());
        };

        let Some(user) = self.user_repo.find_by_username(&username).await? else {
            self.burn_verification(&command.password).await?;
            tracing::warn!(username = %username, "sign-in rejected: unknown username");
            return Err(invalid_credentials());
        };

        if !self
            .hasher
            .verify(user.password_hash.as_str(), &command.password)
            .await?
        {
            tracing::warn!(user_id = %user.id, "sign-in rejected: password mismatch");
            return Err(invalid_credentials());
        }

        let tokens = self.issue_and_store(&user).await?;
        tracing::info!(user_id = %user.id, "signed in");
        Ok(tokens)
    }
}
