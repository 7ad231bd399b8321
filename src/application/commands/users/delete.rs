use super::{UserCommandService, access::ensure_self};
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::UserId,
};

pub struct DeleteUserCommand {
    pub user_id: UserId,
}

impl UserCommandService {
    /// Remove the account together with its things and session.
    pub async fn delete_user(
        &self,
        actor: &AuthenticatedUser,
        command: DeleteUserCommand,
    ) -> ApplicationResult<()> {
        ensure_self(actor, command.user_id)?;

        if !self.user_repo.delete(command.user_id).await? {
            return Err(ApplicationError::not_found("user not found"));
        }

        tracing::info!(user_id = %command.user_id, "account deleted");
        Ok(())
    }
}
