use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{MediaError, MediaStore};

/// Keeps uploaded payloads in memory and issues `memory://media/<id>.img` URLs
#[derive(Debug, Default)]
pub struct MemoryMediaStore {
    objects: RwLock<HashMap<String, String>>,
}

impl MemoryMediaStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, public_id: &str) -> bool {
        self.objects.read().await.contains_key(public_id)
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl MediaStore for MemoryMediaStore {
    async fn upload(&self, payload: &str) -> Result<String, MediaError> {
        if payload.trim().is_empty() {
            return Err(MediaError::Upload("empty payload".to_string()));
        }

        let public_id = Uuid::new_v4().simple().to_string();
        self.objects
            .write()
            .await
            .insert(public_id.clone(), payload.to_string());
        Ok(format!("memory://media/{public_id}.img"))
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        // Unknown IDs are not an error, matching the remote service.
        self.objects.write().await.remove(public_id);
        Ok(())
    }
}
