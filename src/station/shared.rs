//! Thread-safe station handle

use super::Station;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A [`Station`] behind one mutex
///
/// Clones refer to the same station. Every operation runs with the lock held,
/// so operations from different threads are serialized exactly as if they had
/// been issued one after another.
#[derive(Debug, Clone)]
pub struct SharedStation {
    inner: Arc<Mutex<Station>>,
}

impl SharedStation {
    pub fn new(station: Station) -> Self {
        Self {
            inner: Arc::new(Mutex::new(station)),
        }
    }

    /// Lock the station for a sequence of operations
    pub fn lock(&self) -> MutexGuard<'_, Station> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the station
    pub fn with<T>(&self, f: impl FnOnce(&mut Station) -> T) -> T {
        f(&mut self.lock())
    }
}

impl From<Station> for SharedStation {
    fn from(station: Station) -> Self {
        Self::new(station)
    }
}
