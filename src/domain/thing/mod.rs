// src/domain/thing/mod.rs
pub mod entity;
pub mod repository;
pub mod value_objects;

pub use entity::{NewThing, Thing, ThingUpdate};
pub use repository::ThingRepository;
pub use value_objects::{ThingDescription, ThingId, ThingName};
