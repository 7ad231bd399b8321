// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        commands::{auth::AuthCommandService, things::ThingCommandService, users::UserCommandService},
        ports::{
            security::{CredentialHasher, TokenIssuer},
            session::SessionStore,
            time::Clock,
        },
        queries::{things::ThingQueryService, users::UserQueryService},
    },
    domain::{thing::ThingRepository, user::UserRepository},
};

pub struct ApplicationServices {
    pub auth: Arc<AuthCommandService>,
    pub user_commands: Arc<UserCommandService>,
    pub user_queries: Arc<UserQueryService>,
    pub thing_commands: Arc<ThingCommandService>,
    pub thing_queries: Arc<ThingQueryService>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl ApplicationServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        thing_repo: Arc<dyn ThingRepository>,
        hasher: Arc<dyn CredentialHasher>,
        token_issuer: Arc<dyn TokenIssuer>,
        session_store: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let auth = Arc::new(AuthCommandService::new(
            Arc::clone(&user_repo),
            hasher,
            Arc::clone(&token_issuer),
            session_store,
            Arc::clone(&clock),
        ));

        let user_commands = Arc::new(UserCommandService::new(Arc::clone(&user_repo)));
        let user_queries = Arc::new(UserQueryService::new(user_repo));

        let thing_commands = Arc::new(ThingCommandService::new(Arc::clone(&thing_repo), clock));
        let thing_queries = Arc::new(ThingQueryService::new(thing_repo));

        Self {
            auth,
            user_commands,
            user_queries,
            thing_commands,
            thing_queries,
            token_issuer,
        }
    }

    /// Shared with the token guards so they verify against the same keys
    /// the auth service signs with.
    pub fn token_issuer(&self) -> Arc<dyn TokenIssuer> {
        Arc::clone(&self.token_issuer)
    }
}
