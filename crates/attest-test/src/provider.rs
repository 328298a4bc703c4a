//! Value providers for retry tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Returns `failing` until the `succeed_on`-th call, then `passing`.
///
/// Clones share the call counter.
#[derive(Debug, Clone)]
pub struct FlakyProvider<T> {
    calls: Arc<AtomicUsize>,
    succeed_on: usize,
    failing: T,
    passing: T,
}

impl<T: Clone> FlakyProvider<T> {
    /// `succeed_on` counts from 1; 0 never succeeds.
    pub fn new(succeed_on: usize, failing: T, passing: T) -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            succeed_on,
            failing,
            passing,
        }
    }

    pub fn next(&self) -> T {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.succeed_on != 0 && call >= self.succeed_on {
            self.passing.clone()
        } else {
            self.failing.clone()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Yields the given values in order, repeating the last one.
#[derive(Debug)]
pub struct SequenceProvider<T> {
    values: Vec<T>,
    calls: AtomicUsize,
}

impl<T: Clone> SequenceProvider<T> {
    pub fn new(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        assert!(!values.is_empty(), "SequenceProvider needs at least one value");
        Self {
            values,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn next(&self) -> T {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let index = call.min(self.values.len() - 1);
        self.values[index].clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
