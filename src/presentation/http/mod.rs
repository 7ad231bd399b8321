// src/presentation/http/mod.rs
pub mod controllers;
pub mod cookies;
pub mod error;
pub mod guards;
pub mod openapi;
pub mod routes;
pub mod state;
