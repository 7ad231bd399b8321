use super::{AuthCommandService, credentials::validate_password};
use crate::{
    application::{
        dto::TokenPair,
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        user::{Email, NewUser, PasswordHash, Username},
    },
};

pub struct SignUpCommand {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AuthCommandService {
    pub async fn sign_up(&self, command: SignUpCommand) -> ApplicationResult<TokenPair> {
        let username = Username::new(command.username)?;
        let email = Email::new(command.email)?;
        validate_password(&command.password)?;

        if self.user_repo.find_by_username(&username).await?.is_some() {
            tracing::warn!(username = %username, "sign-up rejected: user already exists");
            return Err(ApplicationError::already_exists("user already exists"));
        }

        let hashed = self.hasher.hash(&command.password).await?;
        let new_user = NewUser::new(username, email, PasswordHash::new(hashed)?, self.clock.now());

        // A concurrent sign-up (or a reused email) can still trip the store's
        // uniqueness constraints after the lookup above.
        let user = self.user_repo.insert(new_user).await.map_err(|err| match err {
            DomainError::Conflict(msg) => {
                tracing::warn!(reason = %msg, "sign-up rejected by store");
                ApplicationError::already_exists("user already exists")
            }
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, username = %user.username, "account created");
        self.issue_and_store(&user).await
    }
}
