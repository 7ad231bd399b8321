// src/infrastructure/repositories/memory.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::thing::{NewThing, Thing, ThingId, ThingRepository, ThingUpdate};
use crate::domain::user::{
    NewUser, RefreshTokenHash, User, UserId, UserRepository, UserUpdate, Username,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, User>,
    things: HashMap<ThingId, Thing>,
}

impl Tables {
    fn ensure_unique_user(
        &self,
        except: Option<UserId>,
        username: Option<&str>,
        email: Option<&str>,
    ) -> DomainResult<()> {
        for user in self.users.values().filter(|u| Some(u.id) != except) {
            if username.is_some_and(|name| user.username.as_str() == name) {
                return Err(DomainError::Conflict("username already exists".into()));
            }
            if email.is_some_and(|email| user.email.as_str() == email) {
                return Err(DomainError::Conflict("email already exists".into()));
            }
        }
        Ok(())
    }

    fn ensure_unique_thing(
        &self,
        owner_id: UserId,
        except: Option<ThingId>,
        name: &str,
    ) -> DomainResult<()> {
        let taken = self.things.values().any(|thing| {
            thing.owner_id == owner_id && Some(thing.id) != except && thing.name.as_str() == name
        });
        if taken {
            return Err(DomainError::Conflict("thing name already exists".into()));
        }
        Ok(())
    }
}

/// Process-local store backing both repositories, enforcing the same
/// uniqueness and cascade rules as the database schema.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> DomainResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| DomainError::Persistence("in-memory store lock poisoned".into()))
    }
}

fn ordered<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(key);
    items
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, new_user: NewUser) -> DomainResult<User> {
        let mut tables = self.lock()?;
        tables.ensure_unique_user(
            None,
            Some(new_user.username.as_str()),
            Some(new_user.email.as_str()),
        )?;

        let user = new_user.into_user();
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn list(&self) -> DomainResult<Vec<User>> {
        let tables = self.lock()?;
        let users = tables.users.values().cloned().collect();
        Ok(ordered(users, |u: &User| (u.created_at, u.id.as_uuid())))
    }

    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> DomainResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.username.as_str() == username.as_str())
            .cloned())
    }

    async fn update(&self, update: UserUpdate) -> DomainResult<User> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&update.id) {
            return Err(DomainError::NotFound("user not found".into()));
        }
        tables.ensure_unique_user(
            Some(update.id),
            update.username.as_ref().map(Username::as_str),
            update.email.as_ref().map(|email| email.as_str()),
        )?;

        let user = tables
            .users
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("user not found".into()))?;
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> DomainResult<bool> {
        let mut tables = self.lock()?;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.things.retain(|_, thing| thing.owner_id != id);
        Ok(true)
    }

    async fn set_refresh_token_hash(
        &self,
        id: UserId,
        hash: Option<RefreshTokenHash>,
    ) -> DomainResult<()> {
        if let Some(user) = self.lock()?.users.get_mut(&id) {
            user.refresh_token_hash = hash;
        }
        Ok(())
    }

    async fn compare_and_swap_refresh_token_hash(
        &self,
        id: UserId,
        expected: &RefreshTokenHash,
        replacement: RefreshTokenHash,
    ) -> DomainResult<bool> {
        let mut tables = self.lock()?;
        match tables.users.get_mut(&id) {
            Some(user) if user.refresh_token_hash.as_ref() == Some(expected) => {
                user.refresh_token_hash = Some(replacement);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[async_trait]
impl ThingRepository for InMemoryStore {
    async fn insert(&self, new_thing: NewThing) -> DomainResult<Thing> {
        let mut tables = self.lock()?;
        if !tables.users.contains_key(&new_thing.owner_id) {
            return Err(DomainError::NotFound("owner not found".into()));
        }
        tables.ensure_unique_thing(new_thing.owner_id, None, new_thing.name.as_str())?;

        let thing = new_thing.into_thing();
        tables.things.insert(thing.id, thing.clone());
        Ok(thing)
    }

    async fn list_by_owner(&self, owner_id: UserId) -> DomainResult<Vec<Thing>> {
        let tables = self.lock()?;
        let things = tables
            .things
            .values()
            .filter(|thing| thing.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(ordered(things, |t: &Thing| (t.created_at, t.id.as_uuid())))
    }

    async fn find_by_id(&self, owner_id: UserId, id: ThingId) -> DomainResult<Option<Thing>> {
        Ok(self
            .lock()?
            .things
            .get(&id)
            .filter(|thing| thing.owner_id == owner_id)
            .cloned())
    }

    async fn update(&self, update: ThingUpdate) -> DomainResult<Thing> {
        let mut tables = self.lock()?;
        let owned = tables
            .things
            .get(&update.id)
            .is_some_and(|thing| thing.owner_id == update.owner_id);
        if !owned {
            return Err(DomainError::NotFound("thing not found".into()));
        }
        if let Some(name) = update.name.as_ref() {
            tables.ensure_unique_thing(update.owner_id, Some(update.id), name.as_str())?;
        }

        let thing = tables
            .things
            .get_mut(&update.id)
            .ok_or_else(|| DomainError::NotFound("thing not found".into()))?;
        if let Some(name) = update.name {
            thing.name = name;
        }
        if let Some(description) = update.description {
            thing.description = description;
        }
        Ok(thing.clone())
    }

    async fn delete(&self, owner_id: UserId, id: ThingId) -> DomainResult<bool> {
        let mut tables = self.lock()?;
        let owned = tables
            .things
            .get(&id)
            .is_some_and(|thing| thing.owner_id == owner_id);
        if owned {
            tables.things.remove(&id);
        }
        Ok(owned)
    }
}
