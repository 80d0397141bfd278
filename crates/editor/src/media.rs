//! Media lookup boundary and signed-URL caching.
//!
//! Widgets only hold media ids. Rendering a driven channel needs the media's
//! URL and dimensions, which come from an external [`MediaResolver`]. Signed
//! URLs expire, so [`SignedUrlCache`] keeps resolved descriptors for a fixed
//! TTL and [`CachingResolver`] puts that cache in front of any resolver.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use genscape_core::types::MediaId;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::EditorConfig;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Audio,
}

/// What the renderer needs to display one media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    pub id: MediaId,
    pub url: String,
    pub kind: MediaKind,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Media service unavailable: {0}")]
    Unavailable(String),
}

/// An external service that resolves media ids.
#[async_trait]
pub trait MediaResolver: Send + Sync {
    /// Resolve `id`, or `Ok(None)` if the media does not exist.
    async fn resolve(&self, id: &str) -> Result<Option<MediaDescriptor>, MediaError>;
}

// ---------------------------------------------------------------------------
// SignedUrlCache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct CachedEntry {
    descriptor: MediaDescriptor,
    expires_at: Instant,
}

/// Resolved descriptors keyed by media id, each valid for a fixed TTL.
///
/// Time is passed in explicitly so expiry is deterministic.
#[derive(Debug)]
pub struct SignedUrlCache {
    ttl: Duration,
    entries: HashMap<MediaId, CachedEntry>,
}

impl SignedUrlCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The cached descriptor for `id`, unless it has expired at `now`.
    pub fn get(&self, id: &str, now: Instant) -> Option<&MediaDescriptor> {
        self.entries
            .get(id)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| &entry.descriptor)
    }

    /// Cache `descriptor` as resolved at `now`.
    pub fn insert(&mut self, descriptor: MediaDescriptor, now: Instant) {
        let expires_at = now + self.ttl;
        self.entries.insert(
            descriptor.id.clone(),
            CachedEntry {
                descriptor,
                expires_at,
            },
        );
    }

    /// Drop every entry that has expired at `now`. Returns how many went.
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| now < entry.expires_at);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CachingResolver
// ---------------------------------------------------------------------------

/// A [`MediaResolver`] that serves repeat lookups from a [`SignedUrlCache`].
///
/// Misses and not-found results always go to the inner resolver.
pub struct CachingResolver<R> {
    inner: R,
    cache: Mutex<SignedUrlCache>,
}

impl<R> CachingResolver<R> {
    pub fn new(inner: R, ttl: Duration) -> Self {
        Self {
            inner,
            cache: Mutex::new(SignedUrlCache::new(ttl)),
        }
    }

    /// Wrap `inner` using the configured signed-URL lifetime.
    pub fn from_config(inner: R, config: &EditorConfig) -> Self {
        Self::new(inner, config.media_url_ttl)
    }

    pub async fn ttl(&self) -> Duration {
        self.cache.lock().await.ttl()
    }

    /// Number of live cache entries.
    pub async fn cached(&self) -> usize {
        self.cache.lock().await.len()
    }
}

#[async_trait]
impl<R: MediaResolver> MediaResolver for CachingResolver<R> {
    async fn resolve(&self, id: &str) -> Result<Option<MediaDescriptor>, MediaError> {
        let now = Instant::now();
        {
            let mut cache = self.cache.lock().await;
            let evicted = cache.evict_expired(now);
            if evicted > 0 {
                tracing::debug!(evicted, "Evicted expired media URLs");
            }
            if let Some(hit) = cache.get(id, now) {
                return Ok(Some(hit.clone()));
            }
        }

        let resolved = self.inner.resolve(id).await?;
        if let Some(descriptor) = &resolved {
            self.cache.lock().await.insert(descriptor.clone(), now);
        }
        Ok(resolved)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(id: &str) -> MediaDescriptor {
        MediaDescriptor {
            id: id.into(),
            url: format!("https://media.example/{id}?sig=abc"),
            kind: MediaKind::Image,
            width: Some(1080),
            height: Some(1350),
        }
    }

    #[test]
    fn entries_expire_after_ttl() {
        let start = Instant::now();
        let mut cache = SignedUrlCache::new(Duration::from_secs(60));
        cache.insert(descriptor("m1"), start);

        assert!(cache.get("m1", start + Duration::from_secs(59)).is_some());
        assert!(cache.get("m1", start + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn evict_expired_removes_only_stale_entries() {
        let start = Instant::now();
        let mut cache = SignedUrlCache::new(Duration::from_secs(10));
        cache.insert(descriptor("old"), start);
        cache.insert(descriptor("new"), start + Duration::from_secs(5));

        let evicted = cache.evict_expired(start + Duration::from_secs(12));

        assert_eq!(evicted, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("new", start + Duration::from_secs(12)).is_some());
    }

    #[test]
    fn reinsert_refreshes_expiry() {
        let start = Instant::now();
        let mut cache = SignedUrlCache::new(Duration::from_secs(10));
        cache.insert(descriptor("m1"), start);
        cache.insert(descriptor("m1"), start + Duration::from_secs(8));
        assert!(cache.get("m1", start + Duration::from_secs(15)).is_some());
    }
}
