pub mod auth;
pub mod things;
pub mod users;
