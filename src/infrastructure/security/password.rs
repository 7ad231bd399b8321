use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::CredentialHasher,
};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use async_trait::async_trait;

/// Argon2id with a fresh random salt per digest. All work runs on the
/// blocking pool.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    params: Params,
}

impl Argon2CredentialHasher {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn engine(params: Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, plaintext: &str) -> ApplicationResult<String> {
        let plaintext = plaintext.to_owned();
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Self::engine(params)
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| ApplicationError::infrastructure(err.to_string()))
        })
        .await
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))?
    }

    async fn verify(&self, digest: &str, plaintext: &str) -> ApplicationResult<bool> {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || {
            // Digests carry their own parameters; `params` only seeds the engine.
            let Ok(parsed) = PasswordHash::new(&digest) else {
                tracing::warn!("stored digest is not a valid PHC string");
                return false;
            };
            Self::engine(params)
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok()
        })
        .await
        .map_err(|err| ApplicationError::infrastructure(err.to_string()))
    }
}
