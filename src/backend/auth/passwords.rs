/**
 * Password Hashing
 *
 * bcrypt digests with a configurable cost. Hashing is CPU-bound, so every
 * call runs on the blocking thread pool.
 */

use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("Password hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Credential store backed by bcrypt
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Digest checked when a login names an unknown user
    fallback_digest: Arc<str>,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        let fallback_digest = bcrypt::hash("", cost)?;
        Ok(Self {
            cost,
            fallback_digest: fallback_digest.into(),
        })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    pub async fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        let plaintext = plaintext.to_owned();
        let cost = self.cost;
        let digest = tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost)).await??;
        Ok(digest)
    }

    /// Check a plaintext password against a stored digest
    pub async fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, PasswordError> {
        let plaintext = plaintext.to_owned();
        let digest = digest.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest)).await??;
        Ok(matches)
    }

    /// Verify against `digest`, or burn the same work against the fallback
    /// digest when there is no user. Always `false` in the latter case.
    pub async fn verify_or_fallback(
        &self,
        plaintext: &str,
        digest: Option<&str>,
    ) -> Result<bool, PasswordError> {
        match digest {
            Some(digest) => self.verify(plaintext, digest).await,
            None => {
                let fallback = self.fallback_digest.clone();
                self.verify(plaintext, &fallback).await?;
                Ok(false)
            }
        }
    }
}
