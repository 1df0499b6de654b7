//! Load-once access to an immutable case library.
//!
//! The library is fetched lazily on first use. Callers racing on the first
//! load share the single in-flight load instead of fetching twice; a failed
//! load memoizes nothing, so the next explicit call is the retry.

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use log::{debug, warn};

/// A memoized, deduplicated library handle. Immutable once loaded.
pub struct LazyLibrary<T> {
    cell: OnceLock<Arc<T>>,
    gate: Mutex<()>,
}

impl<T> LazyLibrary<T> {
    pub const fn new() -> LazyLibrary<T> {
        LazyLibrary {
            cell: OnceLock::new(),
            gate: Mutex::new(()),
        }
    }

    /// The library, if a load already succeeded.
    pub fn get(&self) -> Option<Arc<T>> {
        self.cell.get().map(Arc::clone)
    }

    /// Returns the memoized library, or runs `load` to produce it. At most
    /// one load runs at a time; a concurrent caller blocks on the gate and
    /// then picks up the winner's result.
    pub fn get_or_load<E>(&self, load: impl FnOnce() -> Result<T, E>) -> Result<Arc<T>, E> {
        if let Some(library) = self.cell.get() {
            return Ok(Arc::clone(library));
        }

        let _guard = self.gate.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(library) = self.cell.get() {
            return Ok(Arc::clone(library));
        }

        debug!("loading case library");
        match load() {
            Ok(library) => {
                let library = Arc::new(library);
                let _ = self.cell.set(Arc::clone(&library));
                Ok(library)
            }
            Err(err) => {
                warn!("case library load failed; the next call will retry");
                Err(err)
            }
        }
    }
}

impl<T> Default for LazyLibrary<T> {
    fn default() -> LazyLibrary<T> {
        LazyLibrary::new()
    }
}
