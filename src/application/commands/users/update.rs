use super::{UserCommandService, access::ensure_self};
use crate::{
    application::{
        dto::{AuthenticatedUser, UserDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::{
        errors::DomainError,
        user::{Email, UserId, UserUpdate, Username},
    },
};

pub struct UpdateUserCommand {
    pub user_id: UserId,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl UserCommandService {
    pub async fn update_user(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateUserCommand,
    ) -> ApplicationResult<UserDto> {
        if command.username.is_none() && command.email.is_none() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        ensure_self(actor, command.user_id)?;

        let mut update = UserUpdate::new(command.user_id);

        if let Some(username) = command.username {
            update = update.with_username(Username::new(username)?);
        }

        if let Some(email) = command.email {
            update = update.with_email(Email::new(email)?);
        }

        let user = self.user_repo.update(update).await.map_err(|err| match err {
            DomainError::Conflict(_) => ApplicationError::already_exists("user already exists"),
            other => other.into(),
        })?;

        tracing::info!(user_id = %user.id, "account updated");
        Ok(user.into())
    }
}
