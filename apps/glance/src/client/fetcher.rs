//! `ImageFetcher` backed by the file endpoint, warming bytes into an in-memory cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::runtime::Handle;

use super::ApiClient;
use crate::ignore_poison::IgnorePoison;
use crate::viewer::ImageFetcher;

/// Image bytes fetched ahead of display, keyed by request path.
#[derive(Debug, Default)]
pub struct WarmCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl WarmCache {
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.entries.lock_ignore_poison().get(path).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.lock_ignore_poison().contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.lock_ignore_poison().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn insert(&self, path: String, bytes: Vec<u8>) {
        self.entries.lock_ignore_poison().insert(path, bytes);
    }
}

/// Fetches images over HTTP on a tokio runtime without blocking the caller.
pub struct HttpImageFetcher {
    client: ApiClient,
    runtime: Handle,
    /// Swapped out on reset. Fetches still in flight hold the old one.
    cache: Mutex<Arc<WarmCache>>,
}

impl HttpImageFetcher {
    pub fn new(client: ApiClient, runtime: Handle) -> Self {
        Self {
            client,
            runtime,
            cache: Mutex::new(Arc::new(WarmCache::default())),
        }
    }

    /// The cache for the current session.
    pub fn cache(&self) -> Arc<WarmCache> {
        self.cache.lock_ignore_poison().clone()
    }

    /// Warmed bytes for `path`, if the background fetch has finished.
    pub fn cached(&self, path: &str) -> Option<Vec<u8>> {
        self.cache().get(path)
    }
}

impl ImageFetcher for HttpImageFetcher {
    fn warm(&self, path: &str) {
        let cache = self.cache();
        let client = self.client.clone();
        let path = path.to_string();
        self.runtime.spawn(async move {
            match client.file(&path).await {
                Ok(fetched) => cache.insert(path, fetched.bytes),
                // A failed warm only means the viewer loads it on demand later
                Err(e) => log::debug!("prefetch: warming {} failed: {}", path, e),
            }
        });
    }

    fn reset(&self) {
        *self.cache.lock_ignore_poison() = Arc::new(WarmCache::default());
    }
}
