//! The default container instance.

use crate::container::Container;
use crate::runtime::Shared;

#[cfg(feature = "thread-safe")]
use once_cell::sync::Lazy;

// Created on first access.
#[cfg(feature = "thread-safe")]
static GLOBAL_CONTAINER: Lazy<Shared<Container>> = Lazy::new(|| Shared::new(Container::new()));

// `Rc` cannot cross threads, so without `thread-safe` each thread gets its own.
#[cfg(not(feature = "thread-safe"))]
thread_local! {
    static GLOBAL_CONTAINER: Shared<Container> = Shared::new(Container::new());
}

/// Provides the default container.
///
/// With the `thread-safe` feature this is one container for the whole process;
/// otherwise it is one container per thread.
///
/// # Examples
///
/// ```
/// use autowire::{Arguments, Class, Error, global};
///
/// struct Clock;
///
/// impl Class for Clock {
///     fn construct(_args: Arguments) -> Result<Self, Error> {
///         Ok(Clock)
///     }
/// }
///
/// global().singleton_self::<Clock>().unwrap();
/// assert!(global().is_singleton::<Clock>());
/// ```
#[cfg(feature = "thread-safe")]
pub fn global() -> Shared<Container> {
    GLOBAL_CONTAINER.clone()
}

/// Provides the default container.
///
/// With the `thread-safe` feature this is one container for the whole process;
/// otherwise it is one container per thread.
#[cfg(not(feature = "thread-safe"))]
pub fn global() -> Shared<Container> {
    GLOBAL_CONTAINER.with(Shared::clone)
}
