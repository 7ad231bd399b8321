pub mod things;
pub mod users;
