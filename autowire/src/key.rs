//! Identity of classes and interfaces known to the container.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A runtime handle for a type: its `TypeId` plus the name used in messages.
///
/// Equality and hashing look only at the `TypeId`.
///
/// ```
/// use autowire::TypeKey;
///
/// trait Greeter {}
///
/// let key = TypeKey::of::<dyn Greeter>();
/// assert!(key.name().contains("Greeter"));
/// assert_eq!(key, TypeKey::of::<dyn Greeter>());
/// ```
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
