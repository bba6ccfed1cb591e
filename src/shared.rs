//! Shared store handle
//!
//! Lets several threads use one `Store` by taking a lock around every call.
//! The engine itself stays single-threaded.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::Result;
use crate::store::Store;

/// Cloneable, thread-safe handle to a single store
///
/// Every operation holds the lock for its full duration, so calls are
/// serialized exactly as if one thread made them in lock order.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.inner.lock().get(key)
    }

    pub fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.inner.lock().set(key, value)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with exclusive access to the store
    pub fn with<T>(&self, f: impl FnOnce(&mut Store) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }

    /// Recover the store if this is the last handle
    ///
    /// Returns `Err(self)` while other clones are still alive.
    pub fn try_unwrap(self) -> std::result::Result<Store, Self> {
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner })
    }
}
