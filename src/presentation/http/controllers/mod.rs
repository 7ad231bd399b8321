// src/presentation/http/controllers/mod.rs
pub mod auth;
pub mod things;
pub mod users;
