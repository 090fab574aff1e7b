//! Type-erased values passed between the container, the resolver and constructors.
//!
//! A [`Value`] wraps a shared, erased object. Services travel as values that hold
//! `Shared<A>` for the abstract type `A`; plain constructor arguments hold the
//! argument itself.

use std::any::Any;
use std::collections::HashMap;

use crate::runtime::{DynAny, Sendable, Shared};

/// A cloneable, reference-counted, type-erased value.
///
/// ```
/// use autowire::Value;
///
/// let value = Value::new(3u32);
/// assert_eq!(value.get::<u32>(), Some(3));
/// assert_eq!(value.get::<String>(), None);
/// ```
#[derive(Clone)]
pub struct Value {
    inner: Shared<DynAny>,
    type_name: &'static str,
}

impl Value {
    pub fn new<T: Any + Sendable>(value: T) -> Self {
        Self {
            inner: Shared::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Clones the held value out if it is a `T`.
    pub fn get<T: Any + Clone>(&self) -> Option<T> {
        self.inner.downcast_ref::<T>().cloned()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Name of the held type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

#[cfg(feature = "debug")]
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Value")
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Named values handed to [`Container::make_with`](crate::Container::make_with).
///
/// Overrides satisfy constructor parameters that have no type hint. They apply to
/// the requested type only, not to its dependencies.
///
/// ```
/// use autowire::Overrides;
///
/// let overrides = Overrides::new().with("retries", 5u32);
/// assert!(overrides.contains("retries"));
/// assert_eq!(overrides.get("retries").and_then(|v| v.get::<u32>()), Some(5));
/// ```
#[derive(Clone, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Overrides {
    values: HashMap<String, Value>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Any + Sendable>(mut self, name: impl Into<String>, value: T) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert<T: Any + Sendable>(&mut self, name: impl Into<String>, value: T) {
        self.values.insert(name.into(), Value::new(value));
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_clones_share_the_object() {
        let value = Value::new(Shared::new(String::from("shared")));
        let first = value.get::<Shared<String>>().unwrap();
        let second = value.clone().get::<Shared<String>>().unwrap();
        assert!(Shared::ptr_eq(&first, &second));
    }

    #[test]
    fn value_reports_type() {
        let value = Value::new(String::from("x"));
        assert!(value.is::<String>());
        assert!(!value.is::<u32>());
        assert_eq!(value.type_name(), std::any::type_name::<String>());
    }

    #[test]
    fn overrides_insert_and_replace() {
        let mut overrides = Overrides::new();
        assert!(overrides.is_empty());

        overrides.insert("name", String::from("first"));
        overrides.insert("name", String::from("second"));

        assert_eq!(overrides.len(), 1);
        assert_eq!(
            overrides.get("name").and_then(|v| v.get::<String>()),
            Some(String::from("second"))
        );
        assert!(overrides.get("missing").is_none());
    }
}
