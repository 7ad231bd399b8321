pub mod auth;
pub mod things;
pub mod users;

pub use auth::{AuthenticatedUser, TokenClaims, TokenKind, TokenPair, TokenSubject};
pub use things::ThingDto;
pub use users::UserDto;
