// src/domain/mod.rs
pub mod errors;
pub mod thing;
pub mod user;
