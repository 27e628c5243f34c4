//! Read-only access to values owned by the producer.

use std::sync::{Arc, PoisonError, RwLock};

/// A value a component observes when it renders.
pub trait Source<T>: Send + Sync {
    fn read(&self) -> T;
}

impl<T, F> Source<T> for F
where
    F: Fn() -> T + Send + Sync,
{
    fn read(&self) -> T {
        self()
    }
}

/// A cloneable cell: the producer keeps one clone to update the value, the
/// component holds another and reads the latest value at render time.
#[derive(Debug, Default)]
pub struct Shared<T>(Arc<RwLock<T>>);

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    pub fn set(&self, value: T) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.0.write().unwrap_or_else(PoisonError::into_inner));
    }
}

impl<T: Clone> Shared<T> {
    pub fn get(&self) -> T {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl<T> Source<T> for Shared<T>
where
    T: Clone + Send + Sync,
{
    fn read(&self) -> T {
        self.get()
    }
}
