//! Thread-local stack guard for circular dependency detection.
//!
//! This module provides [`ResolveGuard`], which tracks the chain of types being
//! made during dependency injection. It uses a thread-local stack to detect
//! and report circular dependencies, returning the full chain if a cycle is found.
//!
//! # Example
//! ```
//! use autowire::{ErrorKind, ResolveGuard, TypeKey};
//!
//! struct A;
//! struct B;
//!
//! let _g1 = ResolveGuard::push(TypeKey::of::<A>()).unwrap();
//! let _g2 = ResolveGuard::push(TypeKey::of::<B>()).unwrap();
//! // Pushing A again triggers a circular dependency error
//! let err = ResolveGuard::push(TypeKey::of::<A>()).unwrap_err();
//! assert!(matches!(err.kind, ErrorKind::CircularDependency));
//! ```

use std::cell::RefCell;

use crate::error::Error;
use crate::key::TypeKey;

thread_local! {
    // Types currently being made on this thread, outermost first.
    static RESOLVE_STACK: RefCell<Vec<TypeKey>> = const { RefCell::new(Vec::new()) };
}

/// Guard that pops the last pushed type from the thread-local stack on drop.
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct ResolveGuard {
    pub key: TypeKey,
}

impl ResolveGuard {
    /// Try to push a type onto the thread-local stack.
    ///
    /// Returns `Err(Error::circular_dependency(..))` if the type is already on the stack.
    /// Otherwise, returns a guard that will pop the type on drop.
    pub fn push(key: TypeKey) -> Result<Self, Error> {
        RESOLVE_STACK.with(|stack| {
            let mut v = stack.borrow_mut();
            if v.contains(&key) {
                let mut chain: Vec<&str> = v.iter().map(TypeKey::name).collect();
                chain.push(key.name());
                return Err(Error::circular_dependency(&chain));
            }
            v.push(key);
            Ok(ResolveGuard { key })
        })
    }

    /// Number of types currently being made on this thread.
    pub fn depth() -> usize {
        RESOLVE_STACK.with(|stack| stack.borrow().len())
    }
}

impl Drop for ResolveGuard {
    fn drop(&mut self) {
        RESOLVE_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    struct A;
    struct B;

    #[test]
    fn push_and_pop_stack() {
        let a = TypeKey::of::<A>();
        let b = TypeKey::of::<B>();
        {
            let _g1 = ResolveGuard::push(a).unwrap();
            {
                let _g2 = ResolveGuard::push(b).unwrap();
                assert_eq!(ResolveGuard::depth(), 2);
                let err = ResolveGuard::push(a).unwrap_err();
                assert!(matches!(err.kind, ErrorKind::CircularDependency));
            }
            // B popped, only A remains
            assert!(ResolveGuard::push(a).is_err());
            assert!(ResolveGuard::push(b).is_ok());
        }
        assert_eq!(ResolveGuard::depth(), 0);
        let _g = ResolveGuard::push(a).unwrap();
    }

    #[test]
    fn chain_lists_every_type() {
        let _g1 = ResolveGuard::push(TypeKey::of::<A>()).unwrap();
        let _g2 = ResolveGuard::push(TypeKey::of::<B>()).unwrap();
        let err = ResolveGuard::push(TypeKey::of::<A>()).unwrap_err();

        let a = std::any::type_name::<A>();
        let b = std::any::type_name::<B>();
        assert!(err.message.ends_with(&format!("{} -> {} -> {}", a, b, a)));
    }
}
