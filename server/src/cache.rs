//! Rendered page cache.
//!
//! Pages are immutable once rendered, so entries are `Bytes` handed out by
//! cheap clone. The lock is never held across an await.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;

#[derive(Debug, Clone, Default)]
pub struct PageCache {
    pages: Arc<Mutex<HashMap<String, Bytes>>>,
}

impl PageCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Bytes>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.lock().get(key).cloned()
    }

    pub fn set(&self, key: impl Into<String>, page: Bytes) {
        self.lock().insert(key.into(), page);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
