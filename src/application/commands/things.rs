// src/application/commands/things.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::{AuthenticatedUser, ThingDto},
        error::{ApplicationError, ApplicationResult},
        ports::time::Clock,
    },
    domain::{
        errors::DomainError,
        thing::{NewThing, ThingDescription, ThingId, ThingName, ThingRepository, ThingUpdate},
    },
};

pub struct CreateThingCommand {
    pub name: String,
    pub description: Option<String>,
}

pub struct UpdateThingCommand {
    pub id: ThingId,
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
}

pub struct ThingCommandService {
    thing_repo: Arc<dyn ThingRepository>,
    clock: Arc<dyn Clock>,
}

impl ThingCommandService {
    pub fn new(thing_repo: Arc<dyn ThingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { thing_repo, clock }
    }

    pub async fn create_thing(
        &self,
        actor: &AuthenticatedUser,
        command: CreateThingCommand,
    ) -> ApplicationResult<ThingDto> {
        let name = ThingName::new(command.name)?;
        let description = command.description.map(ThingDescription::new).transpose()?;

        let new_thing = NewThing::new(actor.id, name, description, self.clock.now());
        let thing = self
            .thing_repo
            .insert(new_thing)
            .await
            .map_err(duplicate_name)?;

        tracing::info!(user_id = %actor.id, thing_id = %thing.id, "thing created");
        Ok(thing.into())
    }

    pub async fn update_thing(
        &self,
        actor: &AuthenticatedUser,
        command: UpdateThingCommand,
    ) -> ApplicationResult<ThingDto> {
        let mut update = ThingUpdate::new(command.id, actor.id);

        if let Some(name) = command.name {
            update = update.with_name(ThingName::new(name)?);
        }

        match command.description {
            Some(Some(description)) => {
                update = update.with_description(ThingDescription::new(description)?);
            }
            Some(None) => update = update.clear_description(),
            None => {}
        }

        if update.is_empty() {
            return Err(ApplicationError::validation(
                "at least one field must be provided",
            ));
        }

        let thing = self
            .thing_repo
            .update(update)
            .await
            .map_err(duplicate_name)?;

        tracing::info!(user_id = %actor.id, thing_id = %thing.id, "thing updated");
        Ok(thing.into())
    }

    pub async fn delete_thing(
        &self,
        actor: &AuthenticatedUser,
        id: ThingId,
    ) -> ApplicationResult<()> {
        if !self.thing_repo.delete(actor.id, id).await? {
            return Err(ApplicationError::not_found("thing not found"));
        }

        tracing::info!(user_id = %actor.id, thing_id = %id, "thing deleted");
        Ok(())
    }
}

fn duplicate_name(err: DomainError) -> ApplicationError {
    match err {
        DomainError::Conflict(_) => {
            ApplicationError::already_exists("a thing with this name already exists")
        }
        other => other.into(),
    }
}
