//! Memoized, clearable single-value cell.
//!
//! A [`Lazy`] does not own its lock: the computation runs under an external
//! re-entrant mutex shared by every cell of one lock domain, so that clearing
//! a group of cells and swapping their inputs can be made atomic by holding
//! that same mutex.

use std::sync::Arc;

use parking_lot::{ReentrantMutex, RwLock};

/// A lazily computed value.
///
/// Reads of an already computed value never block on the domain lock.
/// A failed computation is not cached; the next call retries.
pub struct Lazy<T> {
    slot: RwLock<Option<Arc<T>>>,
}

impl<T> Lazy<T> {
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Cached value, without computing.
    pub fn peek(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    pub fn is_computed(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Drop the cached value. Idempotent.
    ///
    /// A computation already in flight is not aborted and stores its result
    /// when it finishes.
    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    /// Return the cached value or compute it under `lock`.
    ///
    /// Callers arriving while another thread computes block on `lock` and then
    /// observe the stored value; `compute` runs at most once per clear.
    pub fn get_or_compute<G, E>(
        &self,
        lock: &ReentrantMutex<G>,
        compute: impl FnOnce() -> Result<T, E>,
    ) -> Result<Arc<T>, E> {
        if let Some(value) = self.peek() {
            return Ok(value);
        }

        let _guard = lock.lock();
        if let Some(value) = self.peek() {
            return Ok(value);
        }

        let value = Arc::new(compute()?);
        *self.slot.write() = Some(Arc::clone(&value));
        Ok(value)
    }
}

impl<T> Default for Lazy<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Lazy").field(&self.peek()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    fn counting(counter: &AtomicUsize) -> Result<usize, ()> {
        Ok(counter.fetch_add(1, Ordering::SeqCst) + 1)
    }

    #[test]
    fn test_computes_once() {
        let lock = ReentrantMutex::new(());
        let cell = Lazy::new();
        let counter = AtomicUsize::new(0);

        assert_eq!(*cell.get_or_compute(&lock, || counting(&counter)).unwrap(), 1);
        assert_eq!(*cell.get_or_compute(&lock, || counting(&counter)).unwrap(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clear_recomputes() {
        let lock = ReentrantMutex::new(());
        let cell = Lazy::new();
        let counter = AtomicUsize::new(0);

        cell.get_or_compute(&lock, || counting(&counter)).unwrap();
        cell.clear();
        cell.clear();
        assert!(cell.peek().is_none());
        assert_eq!(*cell.get_or_compute(&lock, || counting(&counter)).unwrap(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_peek_does_not_compute() {
        let cell: Lazy<u32> = Lazy::new();
        assert!(cell.peek().is_none());
        assert!(!cell.is_computed());
    }

    #[test]
    fn test_failure_is_not_cached() {
        let lock = ReentrantMutex::new(());
        let cell: Lazy<u32> = Lazy::new();

        let result: Result<_, &str> = cell.get_or_compute(&lock, || Err("boom"));
        assert_eq!(result.unwrap_err(), "boom");
        assert!(!cell.is_computed());

        let result: Result<_, &str> = cell.get_or_compute(&lock, || Ok(7));
        assert_eq!(*result.unwrap(), 7);
    }

    #[test]
    fn test_reentrant_computation() {
        let lock = ReentrantMutex::new(());
        let outer: Lazy<u32> = Lazy::new();
        let inner: Lazy<u32> = Lazy::new();

        let value = outer
            .get_or_compute(&lock, || {
                inner
                    .get_or_compute(&lock, || Ok::<_, ()>(20))
                    .map(|v| *v + 1)
            })
            .unwrap();
        assert_eq!(*value, 21);
        assert!(inner.is_computed());
    }

    #[test]
    fn test_concurrent_callers_compute_once() {
        const THREADS: usize = 8;
        let lock = ReentrantMutex::new(());
        let cell = Lazy::new();
        let counter = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);

        let values: Vec<usize> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        *cell
                            .get_or_compute(&lock, || {
                                thread::sleep(Duration::from_millis(20));
                                counting(&counter)
                            })
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(values.iter().all(|v| *v == 1));
    }
}
