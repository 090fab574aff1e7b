//! Binding records.
//!
//! A [`Binding`] pairs an abstract type with the concrete class used to satisfy it,
//! plus the shared (singleton) flag.

use crate::error::Error;
use crate::key::TypeKey;
use crate::registry::Registry;

/// An immutable abstract-to-concrete rule.
///
/// ```
/// use autowire::{Arguments, Binding, Class, Error, Registry, TypeKey};
///
/// struct Cache;
///
/// impl Class for Cache {
///     fn construct(_args: Arguments) -> Result<Self, Error> {
///         Ok(Cache)
///     }
/// }
///
/// let registry = Registry::new();
/// registry.register::<Cache>();
///
/// let key = TypeKey::of::<Cache>();
/// let binding = Binding::new(&registry, key, key, true).unwrap();
/// assert!(binding.is_shared());
/// assert!(!binding.is_interface());
/// ```
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Binding {
    abstract_type: TypeKey,
    concrete: TypeKey,
    interface: bool,
    shared: bool,
}

impl Binding {
    /// Fails if either type is unknown to `registry`.
    ///
    /// Whether `concrete` actually satisfies `abstract_type` is checked by the
    /// container, not here.
    pub fn new(
        registry: &Registry,
        abstract_type: TypeKey,
        concrete: TypeKey,
        shared: bool,
    ) -> Result<Self, Error> {
        if !registry.contains(abstract_type) {
            return Err(Error::class_not_found(abstract_type.name()));
        }
        if !registry.contains(concrete) {
            return Err(Error::class_not_found(concrete.name()));
        }

        Ok(Self {
            abstract_type,
            concrete,
            interface: registry.is_interface(abstract_type),
            shared,
        })
    }

    /// The same binding with the shared flag set.
    pub fn into_shared(self) -> Self {
        Self {
            shared: true,
            ..self
        }
    }

    pub fn abstract_type(&self) -> TypeKey {
        self.abstract_type
    }

    /// The class instantiated to satisfy the abstract type.
    pub fn concrete(&self) -> TypeKey {
        self.concrete
    }

    pub fn is_interface(&self) -> bool {
        self.interface
    }

    pub fn is_shared(&self) -> bool {
        self.shared
    }
}
