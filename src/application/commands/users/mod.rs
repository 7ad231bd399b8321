mod access;
mod delete;
mod service;
mod update;

pub use delete::DeleteUserCommand;
pub use service::UserCommandService;
pub use update::UpdateUserCommand;
