// tests/support/mocks.rs
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use thingbox::application::ApplicationResult;
use thingbox::application::ports::{
    security::CredentialHasher, session::SessionStore, time::Clock,
};
use thingbox::domain::user::{RefreshTokenHash, UserId, UserRepository};
use thingbox::infrastructure::repositories::InMemoryStore;

/// Deterministic, instant hasher: `hash(x) == "hash::x"`. Counts calls so
/// tests can check that failure paths still do the work.
#[derive(Default)]
pub struct StrictCredentialHasher {
    hashes: AtomicUsize,
    verifications: AtomicUsize,
}

impl StrictCredentialHasher {
    pub fn hashes(&self) -> usize {
        self.hashes.load(Ordering::SeqCst)
    }

    pub fn verifications(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialHasher for StrictCredentialHasher {
    async fn hash(&self, plaintext: &str) -> ApplicationResult<String> {
        self.hashes.fetch_add(1, Ordering::SeqCst);
        Ok(format!("hash::{plaintext}"))
    }

    async fn verify(&self, digest: &str, plaintext: &str) -> ApplicationResult<bool> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        Ok(digest == format!("hash::{plaintext}"))
    }
}

/// Session store that always loses the rotation race.
pub struct LosingSessionStore;

#[async_trait]
impl SessionStore for LosingSessionStore {
    async fn store(&self, _user_id: UserId, _hash: RefreshTokenHash) -> ApplicationResult<()> {
        Ok(())
    }

    async fn clear(&self, _user_id: UserId) -> ApplicationResult<()> {
        Ok(())
    }

    async fn rotate(
        &self,
        _user_id: UserId,
        _expected: &RefreshTokenHash,
        _replacement: RefreshTokenHash,
    ) -> ApplicationResult<bool> {
        Ok(false)
    }
}

/// Persists like the real adapter, but the account is deleted right before
/// the rotation swap runs.
pub struct VanishingSessionStore {
    store: Arc<InMemoryStore>,
}

impl VanishingSessionStore {
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionStore for VanishingSessionStore {
    async fn store(&self, user_id: UserId, hash: RefreshTokenHash) -> ApplicationResult<()> {
        self.store
            .set_refresh_token_hash(user_id, Some(hash))
            .await
            .map_err(Into::into)
    }

    async fn clear(&self, user_id: UserId) -> ApplicationResult<()> {
        self.store
            .set_refresh_token_hash(user_id, None)
            .await
            .map_err(Into::into)
    }

    async fn rotate(
        &self,
        user_id: UserId,
        expected: &RefreshTokenHash,
        replacement: RefreshTokenHash,
    ) -> ApplicationResult<bool> {
        UserRepository::delete(self.store.as_ref(), user_id).await?;
        self.store
            .compare_and_swap_refresh_token_hash(user_id, expected, replacement)
            .await
            .map_err(Into::into)
    }
}

static FIXED_NOW: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub fn fixed_now() -> DateTime<Utc> {
    *FIXED_NOW
}

/// Clock frozen at [`fixed_now`], close enough to real time for tokens to verify.
pub struct FixedClock;
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}
