//! The runtime type registry.
//!
//! Rust keeps no record of constructors or of which types implement which traits
//! at runtime, so the container keeps its own. The [`Registry`] knows:
//!
//! - which classes exist, and how to construct the ones that implement [`Class`],
//! - which interfaces (trait object types such as `dyn Logger`) exist,
//! - which classes implement which interfaces, with the upcast between them.
//!
//! A type missing from the registry is unresolvable: binding or making it fails.
//!
//! # Examples
//!
//! ```
//! use autowire::{Registry, Shared, TypeKey};
//!
//! trait Clock: Send + Sync {}
//! struct SystemClock;
//! impl Clock for SystemClock {}
//!
//! let registry = Registry::new();
//! registry.register_implementation::<SystemClock, dyn Clock>(|clock| clock as Shared<dyn Clock>);
//!
//! assert!(registry.is_class(TypeKey::of::<SystemClock>()));
//! assert!(registry.is_interface(TypeKey::of::<dyn Clock>()));
//! assert!(registry.implements(TypeKey::of::<SystemClock>(), TypeKey::of::<dyn Clock>()));
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::class::{Arguments, Class, Parameter};
use crate::error::Error;
use crate::key::TypeKey;
use crate::runtime::{Sendable, Shared, Store, read, write};
use crate::value::Value;

#[cfg(feature = "tracing")]
use tracing::debug;

#[cfg(feature = "thread-safe")]
type Cast = Shared<dyn Fn(&Value) -> Option<Value> + Send + Sync>;
#[cfg(not(feature = "thread-safe"))]
type Cast = Shared<dyn Fn(&Value) -> Option<Value>>;

/// Whether a registered type is a class or an interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TypeKind {
    Class,
    Interface,
}

#[derive(Clone, Copy)]
struct Constructor {
    parameters: fn() -> Vec<Parameter>,
    construct: fn(Arguments) -> Result<Value, Error>,
}

#[derive(Clone, Copy)]
struct TypeInfo {
    key: TypeKey,
    kind: TypeKind,
    constructor: Option<Constructor>,
}

fn instantiate<C: Class>(args: Arguments) -> Result<Value, Error> {
    C::construct(args).map(|object| Value::new(Shared::new(object)))
}

/// Known classes, interfaces and the implementations between them.
#[derive(Default)]
pub struct Registry {
    types: Store<HashMap<TypeId, TypeInfo>>,
    names: Store<HashMap<&'static str, TypeKey>>,
    casts: Store<HashMap<(TypeId, TypeId), Cast>>,
}

#[cfg(feature = "debug")]
impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&'static str> = read(&self.names).keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("Registry")
            .field("types", &names)
            .field("implementations", &read(&self.casts).len())
            .finish()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `C` a known, instantiable class.
    ///
    /// Registering again replaces the previous descriptor, so a type first seen
    /// through [`register_type`](Self::register_type) gains its constructor.
    pub fn register<C: Class>(&self) {
        self.insert(
            TypeInfo {
                key: TypeKey::of::<C>(),
                kind: TypeKind::Class,
                constructor: Some(Constructor {
                    parameters: C::parameters,
                    construct: instantiate::<C>,
                }),
            },
            true,
        );
    }

    /// Registers `C` unless it is already known with a constructor.
    pub(crate) fn autoload<C: Class>(&self) {
        let constructed = self
            .info(TypeKey::of::<C>())
            .is_some_and(|info| info.constructor.is_some());
        if !constructed {
            self.register::<C>();
        }
    }

    /// Makes `T` a known class without a constructor, unless `T` is already known.
    pub fn register_type<T: Any + Sendable>(&self) {
        self.insert(
            TypeInfo {
                key: TypeKey::of::<T>(),
                kind: TypeKind::Class,
                constructor: None,
            },
            false,
        );
    }

    /// Makes the interface `I` (a trait object type) known.
    pub fn register_interface<I: ?Sized + 'static>(&self) {
        self.insert(
            TypeInfo {
                key: TypeKey::of::<I>(),
                kind: TypeKind::Interface,
                constructor: None,
            },
            false,
        );
    }

    /// Records that class `C` implements interface `I`.
    ///
    /// `cast` performs the unsizing coercion, usually `|c| c as Shared<dyn I>`;
    /// the [`implements!`](crate::implements) macro writes it for you. Unknown
    /// types are registered along the way.
    pub fn register_implementation<C, I>(&self, cast: fn(Shared<C>) -> Shared<I>)
    where
        C: Any + Sendable,
        I: ?Sized + Sendable + 'static,
    {
        self.register_type::<C>();
        self.register_interface::<I>();

        let upcast: Cast = Shared::new(move |object: &Value| {
            object.get::<Shared<C>>().map(|class| Value::new(cast(class)))
        });

        #[cfg(feature = "tracing")]
        debug!(
            "Registered {} as implementation of {}",
            std::any::type_name::<C>(),
            std::any::type_name::<I>()
        );

        write(&self.casts).insert((TypeId::of::<C>(), TypeId::of::<I>()), upcast);
    }

    fn insert(&self, info: TypeInfo, replace: bool) {
        let mut types = write(&self.types);
        if !replace && types.contains_key(&info.key.id()) {
            return;
        }

        #[cfg(feature = "tracing")]
        debug!("Registered {:?} {}", info.kind, info.key);

        write(&self.names).insert(info.key.name(), info.key);
        types.insert(info.key.id(), info);
    }

    fn info(&self, key: TypeKey) -> Option<TypeInfo> {
        read(&self.types).get(&key.id()).copied()
    }

    pub fn contains(&self, key: TypeKey) -> bool {
        read(&self.types).contains_key(&key.id())
    }

    pub fn kind(&self, key: TypeKey) -> Option<TypeKind> {
        self.info(key).map(|info| info.kind)
    }

    pub fn is_class(&self, key: TypeKey) -> bool {
        self.kind(key) == Some(TypeKind::Class)
    }

    pub fn is_interface(&self, key: TypeKey) -> bool {
        self.kind(key) == Some(TypeKind::Interface)
    }

    pub fn implements(&self, class: TypeKey, interface: TypeKey) -> bool {
        read(&self.casts).contains_key(&(class.id(), interface.id()))
    }

    /// Finds a registered type by its full type name.
    pub fn lookup(&self, name: &str) -> Option<TypeKey> {
        read(&self.names).get(name).copied()
    }

    pub fn len(&self) -> usize {
        read(&self.types).len()
    }

    pub fn is_empty(&self) -> bool {
        read(&self.types).is_empty()
    }

    fn class_info(&self, class: TypeKey) -> Result<TypeInfo, Error> {
        self.info(class)
            .filter(|info| info.kind == TypeKind::Class)
            .ok_or_else(|| Error::class_not_found(class.name()))
    }

    /// Constructor parameters of a known type; empty when it has no constructor,
    /// which includes every interface.
    pub(crate) fn parameters(&self, class: TypeKey) -> Result<Vec<Parameter>, Error> {
        let info = self
            .info(class)
            .ok_or_else(|| Error::class_not_found(class.name()))?;
        Ok(info
            .constructor
            .map(|constructor| (constructor.parameters)())
            .unwrap_or_default())
    }

    /// Runs the constructor of `class`. The result holds a `Shared<class>`.
    pub(crate) fn instantiate(&self, class: TypeKey, args: Arguments) -> Result<Value, Error> {
        let info = self.class_info(class)?;
        let constructor = info
            .constructor
            .ok_or_else(|| Error::not_instantiable(class.name()))?;
        (constructor.construct)(args)
    }

    /// Converts an object holding `Shared<class>` into one holding `Shared<target>`.
    pub(crate) fn cast(&self, object: Value, class: TypeKey, target: TypeKey) -> Result<Value, Error> {
        if class == target {
            return Ok(object);
        }

        let upcast = read(&self.casts).get(&(class.id(), target.id())).cloned();
        let upcast = upcast.ok_or_else(|| Error::not_implemented(class.name(), target.name()))?;
        upcast(&object).ok_or_else(|| Error::type_mismatch(target.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    trait Shape: Send + Sync {
        fn area(&self) -> u32;
    }

    struct Square {
        side: u32,
    }

    impl Shape for Square {
        fn area(&self) -> u32 {
            self.side * self.side
        }
    }

    impl Class for Square {
        fn parameters() -> Vec<Parameter> {
            vec![Parameter::optional("side", 2u32)]
        }

        fn construct(args: Arguments) -> Result<Self, Error> {
            Ok(Square {
                side: args.get("side")?,
            })
        }
    }

    struct Opaque;

    #[test]
    fn unknown_types_are_not_contained() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains(TypeKey::of::<Square>()));
        assert_eq!(registry.kind(TypeKey::of::<dyn Shape>()), None);
    }

    #[test]
    fn register_class_and_interface() {
        let registry = Registry::new();
        registry.register::<Square>();
        registry.register_interface::<dyn Shape>();

        assert_eq!(registry.len(), 2);
        assert!(registry.is_class(TypeKey::of::<Square>()));
        assert!(registry.is_interface(TypeKey::of::<dyn Shape>()));
        assert!(!registry.implements(TypeKey::of::<Square>(), TypeKey::of::<dyn Shape>()));
    }

    #[test]
    fn lookup_by_name() {
        let registry = Registry::new();
        registry.register::<Square>();

        let key = registry.lookup(std::any::type_name::<Square>());
        assert_eq!(key, Some(TypeKey::of::<Square>()));
        assert_eq!(registry.lookup("unknown.class"), None);
    }

    #[test]
    fn register_type_keeps_existing_constructor() {
        let registry = Registry::new();
        registry.register::<Square>();
        registry.register_type::<Square>();

        let object = registry.instantiate(TypeKey::of::<Square>(), {
            let mut args = Arguments::new();
            args.push("side", Value::new(3u32));
            args
        });
        assert_eq!(object.unwrap().get::<Shared<Square>>().unwrap().side, 3);
    }

    #[test]
    fn register_upgrades_plain_type() {
        let registry = Registry::new();
        registry.register_type::<Square>();
        assert!(registry.parameters(TypeKey::of::<Square>()).unwrap().is_empty());

        registry.register::<Square>();
        assert_eq!(registry.parameters(TypeKey::of::<Square>()).unwrap().len(), 1);
    }

    #[test]
    fn instantiate_without_constructor_fails() {
        let registry = Registry::new();
        registry.register_type::<Opaque>();

        let err = registry
            .instantiate(TypeKey::of::<Opaque>(), Arguments::new())
            .err()
            .unwrap();
        assert!(err.kind == ErrorKind::NotInstantiable);
    }

    #[test]
    fn interfaces_have_no_parameters() {
        let registry = Registry::new();
        registry.register_interface::<dyn Shape>();

        assert!(registry.parameters(TypeKey::of::<dyn Shape>()).unwrap().is_empty());
    }

    #[test]
    fn interfaces_are_not_instantiable_classes() {
        let registry = Registry::new();
        registry.register_interface::<dyn Shape>();

        let err = registry
            .instantiate(TypeKey::of::<dyn Shape>(), Arguments::new())
            .err()
            .unwrap();
        assert!(err.kind == ErrorKind::ClassNotFound);
        assert!(err.message.contains("Shape"));
    }

    #[test]
    fn autoload_registers_once() {
        let registry = Registry::new();
        registry.register_type::<Square>();
        registry.autoload::<Square>();
        assert_eq!(registry.parameters(TypeKey::of::<Square>()).unwrap().len(), 1);

        registry.autoload::<Square>();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn cast_to_implemented_interface() {
        let registry = Registry::new();
        registry.register::<Square>();
        registry.register_implementation::<Square, dyn Shape>(|square| square as Shared<dyn Shape>);

        let object = Value::new(Shared::new(Square { side: 4 }));
        let shape = registry
            .cast(object, TypeKey::of::<Square>(), TypeKey::of::<dyn Shape>())
            .unwrap()
            .get::<Shared<dyn Shape>>()
            .unwrap();
        assert_eq!(shape.area(), 16);
    }

    #[test]
    fn cast_without_implementation_fails() {
        let registry = Registry::new();
        registry.register::<Square>();
        registry.register_interface::<dyn Shape>();

        let object = Value::new(Shared::new(Square { side: 1 }));
        let err = registry
            .cast(object, TypeKey::of::<Square>(), TypeKey::of::<dyn Shape>())
            .err()
            .unwrap();
        assert!(err.kind == ErrorKind::NotImplemented);
    }
}
