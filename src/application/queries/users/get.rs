use super::UserQueryService;
use crate::{
    application::{
        dto::UserDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::user::UserId,
};

impl UserQueryService {
    pub async fn get_user(&self, id: UserId) -> ApplicationResult<UserDto> {
        self.user_repo
            .find_by_id(id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("user not found"))
    }
}
