//! Reader/writer lock backend for [`ConcurrentHashSet`](super::ConcurrentHashSet).
//!
//! Normal builds use [`parking_lot::RwLock`], which never poisons. With the
//! `loom` feature the lock is swapped for `loom::sync::RwLock` so that the
//! model checker can explore every interleaving of readers and writers.
//! Both backends expose the same surface: `new`, `read`, `write`,
//! `get_mut` and `into_inner`.

#[cfg(not(feature = "loom"))]
mod backend {
    pub type ReadGuard<'a, T> = parking_lot::RwLockReadGuard<'a, T>;
    pub type WriteGuard<'a, T> = parking_lot::RwLockWriteGuard<'a, T>;

    /// A reader/writer lock backed by `parking_lot`.
    pub struct RwLock<T> {
        inner: parking_lot::RwLock<T>,
    }

    impl<T> RwLock<T> {
        #[inline]
        pub const fn new(value: T) -> Self {
            Self {
                inner: parking_lot::RwLock::new(value),
            }
        }

        #[inline]
        pub fn read(&self) -> ReadGuard<'_, T> {
            self.inner.read()
        }

        #[inline]
        pub fn write(&self) -> WriteGuard<'_, T> {
            self.inner.write()
        }

        #[inline]
        pub fn get_mut(&mut self) -> &mut T {
            self.inner.get_mut()
        }

        #[inline]
        pub fn into_inner(self) -> T {
            self.inner.into_inner()
        }
    }
}

#[cfg(feature = "loom")]
mod backend {
    use std::sync::PoisonError;

    pub type ReadGuard<'a, T> = loom::sync::RwLockReadGuard<'a, T>;
    pub type WriteGuard<'a, T> = loom::sync::RwLockWriteGuard<'a, T>;

    /// A reader/writer lock backed by loom's model-checked `RwLock`.
    ///
    /// Every critical section in the set leaves the storage consistent, so a
    /// poisoned lock is recovered instead of propagated.
    pub struct RwLock<T> {
        inner: loom::sync::RwLock<T>,
    }

    impl<T> RwLock<T> {
        #[inline]
        pub fn new(value: T) -> Self {
            Self {
                inner: loom::sync::RwLock::new(value),
            }
        }

        #[inline]
        pub fn read(&self) -> ReadGuard<'_, T> {
            self.inner.read().unwrap_or_else(PoisonError::into_inner)
        }

        #[inline]
        pub fn write(&self) -> WriteGuard<'_, T> {
            self.inner.write().unwrap_or_else(PoisonError::into_inner)
        }

        #[inline]
        pub fn get_mut(&mut self) -> &mut T {
            self.inner.get_mut().unwrap_or_else(PoisonError::into_inner)
        }

        #[inline]
        pub fn into_inner(self) -> T {
            self.inner
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner)
        }
    }
}

pub(super) use backend::RwLock;

#[cfg(all(test, not(feature = "loom")))]
mod tests {
    use super::RwLock;
    use rstest::rstest;

    #[rstest]
    fn test_get_mut_writes_through() {
        let mut lock = RwLock::new(vec![1]);
        lock.get_mut().push(2);
        assert_eq!(*lock.read(), vec![1, 2]);

        lock.write().push(3);
        assert_eq!(lock.into_inner(), vec![1, 2, 3]);
    }
}
