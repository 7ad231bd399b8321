use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::UserId,
};

/// Accounts may only be changed by their owner.
pub(super) fn ensure_self(actor: &AuthenticatedUser, target: UserId) -> ApplicationResult<()> {
    if actor.id == target {
        Ok(())
    } else {
        tracing::warn!(actor = %actor.id, target = %target, "account modification denied");
        Err(ApplicationError::forbidden(
            "accounts can only be modified by their owner",
        ))
    }
}
