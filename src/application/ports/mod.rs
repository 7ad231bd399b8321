pub mod security;
pub mod session;
pub mod time;
