//! In-memory store for rendered images.
//!
//! DESIGN
//! ======
//! A mutex-guarded map from artifact handle to PNG bytes. Handles are
//! insert-once: a stored image is never mutated, only read until its
//! retention window lapses. Expired entries are pruned on every access,
//! and a capacity bound rejects inserts when the store is full — the
//! caller surfaces that as back-pressure instead of queueing.
//!
//! Time is injected through the `*_at` internals so expiry is testable
//! without sleeping.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ArtifactError {
    #[error("artifact store is full ({capacity} images retained)")]
    Saturated { capacity: usize },
    #[error("artifact handle already in use: {0}")]
    DuplicateHandle(Uuid),
}

struct StoredImage {
    png: Vec<u8>,
    stored_at: Instant,
}

/// Concurrency-safe artifact store with time-based eviction.
#[derive(Clone)]
pub struct ArtifactStore {
    inner: Arc<Mutex<HashMap<Uuid, StoredImage>>>,
    ttl: Duration,
    capacity: usize,
}

impl ArtifactStore {
    #[must_use]
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self { inner: Arc::new(Mutex::new(HashMap::new())), ttl, capacity }
    }

    /// Store an image under a fresh handle.
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactError::Saturated`] when the store is at
    /// capacity after pruning, or [`ArtifactError::DuplicateHandle`] if
    /// the handle is already taken.
    pub fn insert(&self, handle: Uuid, png: Vec<u8>) -> Result<(), ArtifactError> {
        self.insert_at(handle, png, Instant::now())
    }

    fn insert_at(&self, handle: Uuid, png: Vec<u8>, now: Instant) -> Result<(), ArtifactError> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        prune(&mut inner, now, self.ttl);

        if inner.contains_key(&handle) {
            return Err(ArtifactError::DuplicateHandle(handle));
        }
        if inner.len() >= self.capacity {
            return Err(ArtifactError::Saturated { capacity: self.capacity });
        }
        inner.insert(handle, StoredImage { png, stored_at: now });
        Ok(())
    }

    /// Fetch a stored image; `None` once the handle expires.
    #[must_use]
    pub fn get(&self, handle: Uuid) -> Option<Vec<u8>> {
        self.get_at(handle, Instant::now())
    }

    fn get_at(&self, handle: Uuid, now: Instant) -> Option<Vec<u8>> {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        prune(&mut inner, now, self.ttl);
        inner.get(&handle).map(|image| image.png.clone())
    }

    /// Number of live artifacts (after pruning).
    #[must_use]
    pub fn len(&self) -> usize {
        let mut inner = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        prune(&mut inner, Instant::now(), self.ttl);
        inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn prune(map: &mut HashMap<Uuid, StoredImage>, now: Instant, ttl: Duration) {
    map.retain(|_, image| now.duration_since(image.stored_at) <= ttl);
}

#[cfg(test)]
#[path = "artifact_test.rs"]
mod tests;
