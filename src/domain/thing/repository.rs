use crate::domain::errors::DomainResult;
use crate::domain::thing::{
    entity::{NewThing, Thing, ThingUpdate},
    value_objects::ThingId,
};
use crate::domain::user::UserId;
use async_trait::async_trait;

/// Every lookup is scoped to an owner; a thing owned by someone else is
/// indistinguishable from one that does not exist.
#[async_trait]
pub trait ThingRepository: Send + Sync {
    async fn insert(&self, new_thing: NewThing) -> DomainResult<Thing>;

    async fn list_by_owner(&self, owner_id: UserId) -> DomainResult<Vec<Thing>>;

    async fn find_by_id(&self, owner_id: UserId, id: ThingId) -> DomainResult<Option<Thing>>;

    async fn update(&self, update: ThingUpdate) -> DomainResult<Thing>;

    async fn delete(&self, owner_id: UserId, id: ThingId) -> DomainResult<bool>;
}
