use std::borrow::Borrow;
use std::ops::{Deref, DerefMut};

/// A newtype asserting that `T`'s encoded form respects a maximum size
/// (`MAX` scalar values for strings, max byte count for byte slices). The
/// bound is enforced by the `Encode`/`Decode` impls of the wrapped type, not
/// by this wrapper itself.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Bounded<T, const MAX: usize>(pub T);

impl<T, const MAX: usize> Deref for Bounded<T, MAX> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T, const MAX: usize> DerefMut for Bounded<T, MAX> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T, const MAX: usize> AsRef<T> for Bounded<T, MAX> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T, const MAX: usize> Borrow<T> for Bounded<T, MAX> {
    fn borrow(&self) -> &T {
        &self.0
    }
}

impl<T, const MAX: usize> From<T> for Bounded<T, MAX> {
    fn from(v: T) -> Self {
        Bounded(v)
    }
}
