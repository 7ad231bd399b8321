use super::AuthCommandService;
use crate::{application::error::ApplicationResult, domain::user::UserId};

impl AuthCommandService {
    /// Invalidate every outstanding refresh token of the account. Access
    /// tokens already handed out stay valid until they expire.
    pub async fn sign_out(&self, user_id: UserId) -> ApplicationResult<()> {
        self.session_store.clear(user_id).await?;
        tracing::info!(user_id = %user_id, "signed out");
        Ok(())
    }
}
