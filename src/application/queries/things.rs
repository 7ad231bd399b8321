// src/application/queries/things.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, ThingDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::thing::{ThingId, ThingRepository},
};

pub struct ThingQueryService {
    thing_repo: Arc<dyn ThingRepository>,
}

impl ThingQueryService {
    pub fn new(thing_repo: Arc<dyn ThingRepository>) -> Self {
        Self { thing_repo }
    }

    pub async fn list_things(&self, actor: &AuthenticatedUser) -> ApplicationResult<Vec<ThingDto>> {
        let things = self.thing_repo.list_by_owner(actor.id).await?;
        Ok(things.into_iter().map(Into::into).collect())
    }

    /// Things owned by someone else are reported as missing.
    pub async fn get_thing(
        &self,
        actor: &AuthenticatedUser,
        id: ThingId,
    ) -> ApplicationResult<ThingDto> {
        self.thing_repo
            .find_by_id(actor.id, id)
            .await?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("thing not found"))
    }
}
