// src/infrastructure/repositories/mod.rs
mod error;
mod memory;
mod postgres_thing;
mod postgres_user;

pub use error::map_sqlx;
pub use memory::InMemoryStore;
pub use postgres_thing::PostgresThingRepository;
pub use postgres_user::PostgresUserRepository;
