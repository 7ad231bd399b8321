// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    /// Also return the refresh token in JSON bodies, not only in the cookie.
    pub refresh_token_in_body: bool,
}
