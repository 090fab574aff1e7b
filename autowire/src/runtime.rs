//! Runtime type definitions for shared ownership and interior mutability.
//!
//! This module provides conditional type aliases based on the `thread-safe` feature flag:
//!
//! - When `thread-safe` is enabled: Uses thread-safe types (`Arc` and `RwLock`)
//! - When `thread-safe` is disabled: Uses single-threaded types (`Rc` and `RefCell`)
//!
//! # Type Aliases
//!
//! - [`Shared<T>`]: Smart pointer for shared ownership
//! - [`Store<T>`]: Container providing interior mutability
//! - [`DynAny`]: The type-erased object stored by the container
//!
//! # Examples
//!
//! ```
//! use autowire::runtime::{Shared, Store};
//!
//! // Create a shared reference to a store
//! let value = Store::new(42);
//! let shared = Shared::new(value);
//! ```

#[cfg(feature = "thread-safe")]
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(not(feature = "thread-safe"))]
use std::{
    cell::{Ref, RefCell, RefMut},
    rc::Rc,
};

use std::any::Any;

/// Type alias for shared ownership of data.
///
/// When the `thread-safe` feature is enabled, this is [`Arc<T>`] (thread-safe reference counting).
/// When disabled, this is [`Rc<T>`] (single-threaded reference counting).
///
/// # Examples
///
/// ```
/// use autowire::runtime::Shared;
///
/// let data = Shared::new(vec![1, 2, 3]);
/// let clone = Shared::clone(&data);
/// ```
#[cfg(feature = "thread-safe")]
pub type Shared<T> = Arc<T>;
#[cfg(not(feature = "thread-safe"))]
pub type Shared<T> = Rc<T>;

/// Type alias for interior mutability with runtime borrow checking.
///
/// When the `thread-safe` feature is enabled, this is [`RwLock<T>`].
/// When disabled, this is [`RefCell<T>`].
#[cfg(feature = "thread-safe")]
pub type Store<T> = RwLock<T>;
#[cfg(not(feature = "thread-safe"))]
pub type Store<T> = RefCell<T>;

/// The erased object type held by [`Value`](crate::Value).
#[cfg(feature = "thread-safe")]
pub type DynAny = dyn Any + Send + Sync;
#[cfg(not(feature = "thread-safe"))]
pub type DynAny = dyn Any;

/// Marker for types that may live inside the container.
///
/// With `thread-safe` this requires `Send + Sync`; otherwise every type qualifies.
#[cfg(feature = "thread-safe")]
pub trait Sendable: Send + Sync {}
#[cfg(feature = "thread-safe")]
impl<T: ?Sized + Send + Sync> Sendable for T {}

/// Marker for types that may live inside the container.
///
/// With `thread-safe` this requires `Send + Sync`; otherwise every type qualifies.
#[cfg(not(feature = "thread-safe"))]
pub trait Sendable {}
#[cfg(not(feature = "thread-safe"))]
impl<T: ?Sized> Sendable for T {}

#[cfg(feature = "thread-safe")]
pub(crate) fn read<T>(store: &Store<T>) -> RwLockReadGuard<'_, T> {
    store.read().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(feature = "thread-safe")]
pub(crate) fn write<T>(store: &Store<T>) -> RwLockWriteGuard<'_, T> {
    store.write().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(not(feature = "thread-safe"))]
pub(crate) fn read<T>(store: &Store<T>) -> Ref<'_, T> {
    store.borrow()
}

#[cfg(not(feature = "thread-safe"))]
pub(crate) fn write<T>(store: &Store<T>) -> RefMut<'_, T> {
    store.borrow_mut()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_can_be_cloned() {
        let data = Shared::new(100);
        let clone = Shared::clone(&data);
        assert_eq!(Shared::strong_count(&data), 2);

        drop(clone);
        assert_eq!(Shared::strong_count(&data), 1);
    }

    #[test]
    fn store_helpers_allow_mutation() {
        let store = Store::new(42);

        assert_eq!(*read(&store), 42);
        *write(&store) = 100;
        assert_eq!(*read(&store), 100);
    }

    #[test]
    fn dyn_any_downcasts() {
        let erased: Shared<DynAny> = Shared::new(String::from("Hello"));
        assert_eq!(erased.downcast_ref::<String>().map(String::as_str), Some("Hello"));
        assert!(erased.downcast_ref::<u32>().is_none());
    }
}
