//! Constructor descriptions for classes the container can instantiate.
//!
//! A type becomes instantiable by implementing [`Class`]: it lists its constructor
//! [`Parameter`]s in declaration order and builds itself from the resolved
//! [`Arguments`].
//!
//! # Examples
//!
//! ```
//! use autowire::{Arguments, Class, Container, Error, Parameter, Shared, implements};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "Hello".to_string()
//!     }
//! }
//!
//! impl Class for English {
//!     fn construct(_args: Arguments) -> Result<Self, Error> {
//!         Ok(English)
//!     }
//! }
//!
//! struct Welcome {
//!     greeter: Shared<dyn Greeter>,
//!     name: String,
//! }
//!
//! impl Class for Welcome {
//!     fn parameters() -> Vec<Parameter> {
//!         vec![
//!             Parameter::interface::<dyn Greeter>("greeter"),
//!             Parameter::optional("name", "world".to_string()),
//!         ]
//!     }
//!
//!     fn construct(args: Arguments) -> Result<Self, Error> {
//!         Ok(Welcome {
//!             greeter: args.service::<dyn Greeter>("greeter")?,
//!             name: args.get("name")?,
//!         })
//!     }
//! }
//!
//! let container = Container::new();
//! implements!(container, English => dyn Greeter);
//! container.bind::<dyn Greeter, English>().unwrap();
//!
//! // `make_class` registers `Welcome` on the way; `make` alone only knows
//! // registered types.
//! let welcome = container.make_class::<Welcome>().unwrap();
//! assert_eq!(format!("{}, {}", welcome.greeter.greet(), welcome.name), "Hello, world");
//! ```

use std::any::Any;

use crate::error::Error;
use crate::key::TypeKey;
use crate::registry::Registry;
use crate::runtime::{Sendable, Shared};
use crate::value::Value;

/// A type the container can construct.
pub trait Class: Any + Sendable + Sized {
    /// Constructor parameters, in declaration order.
    fn parameters() -> Vec<Parameter> {
        Vec::new()
    }

    /// Builds the instance from arguments resolved for [`parameters`](Class::parameters).
    fn construct(args: Arguments) -> Result<Self, Error>;
}

/// The declared type of a type-hinted parameter.
#[derive(Clone, Copy)]
pub struct TypeHint {
    key: TypeKey,
    load: Option<fn(&Registry)>,
}

#[cfg(feature = "debug")]
impl std::fmt::Debug for TypeHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeHint")
            .field("key", &self.key)
            .field("autoload", &self.load.is_some())
            .finish()
    }
}

impl TypeHint {
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Makes the hinted class known to `registry` before it is resolved.
    pub(crate) fn load(&self, registry: &Registry) {
        if let Some(load) = self.load {
            load(registry);
        }
    }
}

/// One constructor parameter.
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Parameter {
    name: &'static str,
    hint: Option<TypeHint>,
    default: Option<Value>,
}

impl Parameter {
    /// A parameter whose declared type is the class `C`.
    ///
    /// `C` is registered on first resolution.
    pub fn class<C: Class>(name: &'static str) -> Self {
        Self {
            name,
            hint: Some(TypeHint {
                key: TypeKey::of::<C>(),
                load: Some(Registry::autoload::<C> as fn(&Registry)),
            }),
            default: None,
        }
    }

    /// A parameter whose declared type is the interface `I`, e.g. `dyn Logger`.
    pub fn interface<I: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            name,
            hint: Some(TypeHint {
                key: TypeKey::of::<I>(),
                load: None,
            }),
            default: None,
        }
    }

    /// An untyped parameter that must be supplied as an override.
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            hint: None,
            default: None,
        }
    }

    /// An untyped parameter with a default value.
    pub fn optional<T: Any + Sendable>(name: &'static str, default: T) -> Self {
        Self {
            name,
            hint: None,
            default: Some(Value::new(default)),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn hint(&self) -> Option<TypeHint> {
        self.hint
    }

    pub fn is_type_hinted(&self) -> bool {
        self.hint.is_some()
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Resolved constructor arguments, in parameter order.
#[derive(Clone, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Arguments {
    entries: Vec<(&'static str, Value)>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: Value) {
        self.entries.push((name, value));
    }

    pub fn value(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, value)| value)
    }

    pub fn at(&self, index: usize) -> Option<&Value> {
        self.entries.get(index).map(|(_, value)| value)
    }

    /// Clones out the argument `name` as a `T`.
    pub fn get<T: Any + Clone>(&self, name: &str) -> Result<T, Error> {
        let value = self
            .value(name)
            .ok_or_else(|| Error::parameter_not_found(name))?;
        value
            .get::<T>()
            .ok_or_else(|| Error::type_mismatch(std::any::type_name::<T>()))
    }

    /// The service resolved for a type-hinted parameter.
    pub fn service<T: ?Sized + 'static>(&self, name: &str) -> Result<Shared<T>, Error> {
        self.get::<Shared<T>>(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    trait Sink {}

    struct Plain;

    impl Class for Plain {
        fn construct(_args: Arguments) -> Result<Self, Error> {
            Ok(Plain)
        }
    }

    #[test]
    fn default_parameters_are_empty() {
        assert!(Plain::parameters().is_empty());
    }

    #[test]
    fn parameter_kinds() {
        let class = Parameter::class::<Plain>("plain");
        assert!(class.is_type_hinted());
        assert_eq!(class.hint().map(|h| h.key()), Some(TypeKey::of::<Plain>()));

        let interface = Parameter::interface::<dyn Sink>("sink");
        assert_eq!(interface.hint().map(|h| h.key()), Some(TypeKey::of::<dyn Sink>()));

        let required = Parameter::required("name");
        assert!(!required.is_type_hinted());
        assert!(!required.has_default());

        let optional = Parameter::optional("retries", 3u32);
        assert_eq!(optional.name(), "retries");
        assert_eq!(optional.default().and_then(|v| v.get::<u32>()), Some(3));
    }

    #[test]
    fn class_hint_loads_into_registry() {
        let registry = Registry::new();
        let hint = Parameter::class::<Plain>("plain").hint().unwrap();
        assert!(!registry.contains(hint.key()));

        hint.load(&registry);
        assert!(registry.is_class(hint.key()));
    }

    #[test]
    fn arguments_lookup() {
        let mut args = Arguments::new();
        args.push("count", Value::new(2usize));
        args.push("label", Value::new(String::from("x")));

        assert_eq!(args.len(), 2);
        assert_eq!(args.names().collect::<Vec<_>>(), vec!["count", "label"]);
        assert_eq!(args.get::<usize>("count").unwrap(), 2);
        assert_eq!(args.at(1).and_then(|v| v.get::<String>()), Some(String::from("x")));
    }

    #[test]
    fn arguments_errors() {
        let mut args = Arguments::new();
        args.push("count", Value::new(2usize));

        let err = args.get::<usize>("missing").unwrap_err();
        assert!(err.kind == ErrorKind::ParameterNotFound);

        let err = args.get::<String>("count").unwrap_err();
        assert!(err.kind == ErrorKind::TypeMismatch);
    }
}
