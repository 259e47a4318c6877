use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read-through cache in front of another `Storage`.
///
/// Only successful reads are kept, so a file that appears later is still
/// picked up. Documents edited on disk stay stale until `clear` is called.
pub struct CachedStorage<S: Storage> {
    inner: S,
    documents: RwLock<HashMap<String, Arc<Vec<u8>>>>,
}

impl<S: Storage> CachedStorage<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            documents: RwLock::new(HashMap::new()),
        }
    }

    pub async fn clear(&self) {
        self.documents.write().await.clear();
    }

    pub async fn cached_paths(&self) -> usize {
        self.documents.read().await.len()
    }
}

impl<S: Storage> Storage for CachedStorage<S> {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        if let Some(data) = self.documents.read().await.get(path) {
            tracing::trace!("Cache hit: {}", path);
            return Ok((**data).clone());
        }

        let data = self.inner.read_file(path).await?;
        self.documents
            .write()
            .await
            .insert(path.to_string(), Arc::new(data.clone()));
        Ok(data)
    }
}
