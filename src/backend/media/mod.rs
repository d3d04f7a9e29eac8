//! Media Store
//!
//! Images (profile, cover and post images) are handed to an external media
//! service which returns a stable URL. The service is reached through the
//! [`MediaStore`] trait so handlers never know which backend is configured:
//!
//! - [`cloudinary::CloudinaryMediaStore`] - signed uploads to Cloudinary
//! - [`memory::MemoryMediaStore`] - in-process store for development and tests
//!
//! Uploads and deletions are awaited on the request path. Any failure aborts
//! the surrounding operation.

use async_trait::async_trait;
use thiserror::Error;

/// Cloudinary upload API client
pub mod cloudinary;

/// In-memory media store
pub mod memory;

pub use cloudinary::CloudinaryMediaStore;
pub use memory::MemoryMediaStore;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Media upload failed: {0}")]
    Upload(String),

    #[error("Media deletion failed: {0}")]
    Destroy(String),

    #[error("Media service returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Media service request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// External image storage
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store an image payload (data URI or remote URL), returning its URL
    async fn upload(&self, payload: &str) -> Result<String, MediaError>;

    /// Delete a stored image by its public ID
    async fn destroy(&self, public_id: &str) -> Result<(), MediaError>;
}

/// Derive the public ID of a stored image from its URL: the last path
/// segment without its extension.
pub fn public_id_from_url(url: &str) -> Option<&str> {
    let segment = url.rsplit('/').next()?;
    let id = match segment.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => segment,
    };
    (!id.is_empty()).then_some(id)
}

/// Destroy the image behind `url`, if an ID can be derived from it
pub async fn destroy_url(store: &dyn MediaStore, url: &str) -> Result<(), MediaError> {
    match public_id_from_url(url) {
        Some(public_id) => store.destroy(public_id).await,
        None => {
            tracing::warn!(url, "Cannot derive media public id, skipping deletion");
            Ok(())
        }
    }
}
