//! The dependency injection container.
//!
//! Public API:
//! - `bind` / `bind_self` / `bind_key`: register a rule mapping an abstract type to a concrete class
//! - `singleton` / `singleton_self`: the same, with the made instance cached and shared
//! - `instance` / `instance_shared`: register an already-created object as the shared instance
//! - `make` / `make_with` / `make_key`: build (or fetch) an instance, autowiring constructor arguments
//! - `make_class` / `make_class_with`: `make` for a class that may not be registered yet
//! - `forget` / `clear`: drop bindings and cached instances
//!
//! Abstract types are classes (sized types) or interfaces (trait object types such as
//! `dyn Logger`). Both must be known to the container's [`Registry`] before they can
//! be bound or made; classes named through the typed API are registered on the way.
//!
//! # Examples
//!
//! ```
//! use autowire::{Arguments, Class, Container, Error, Shared, implements};
//!
//! trait Logger: Send + Sync {
//!     fn log(&self, message: &str) -> String;
//! }
//!
//! struct Console;
//!
//! impl Logger for Console {
//!     fn log(&self, message: &str) -> String {
//!         format!("[console] {}", message)
//!     }
//! }
//!
//! impl Class for Console {
//!     fn construct(_args: Arguments) -> Result<Self, Error> {
//!         Ok(Console)
//!     }
//! }
//!
//! let container = Container::new();
//! implements!(container, Console => dyn Logger);
//! container.singleton::<dyn Logger, Console>().unwrap();
//!
//! let first = container.make::<dyn Logger>().unwrap();
//! let second = container.make::<dyn Logger>().unwrap();
//! assert!(Shared::ptr_eq(&first, &second));
//! assert_eq!(first.log("ready"), "[console] ready");
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;

use crate::binding::Binding;
use crate::class::Class;
use crate::error::Error;
use crate::key::TypeKey;
use crate::registry::Registry;
use crate::resolve_guard::ResolveGuard;
use crate::resolver::Resolver;
use crate::runtime::{Sendable, Shared, Store, read, write};
use crate::value::{Overrides, Value};

#[cfg(feature = "tracing")]
use tracing::{debug, info};

/// The DI container.
#[derive(Default)]
pub struct Container {
    registry: Registry,
    bindings: Store<HashMap<TypeId, Binding>>,
    instances: Store<HashMap<TypeId, Value>>,
}

#[cfg(feature = "debug")]
impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("registry", &self.registry)
            .field("bindings", &read(&self.bindings).len())
            .field("instances", &read(&self.instances).len())
            .finish()
    }
}

impl Container {
    /// Create a new, empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// The type registry consulted for existence, implementations and constructors.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Shortcut for [`Registry::register`].
    pub fn register<C: Class>(&self) {
        self.registry.register::<C>();
    }

    /// Shortcut for [`Registry::register_interface`].
    pub fn register_interface<I: ?Sized + 'static>(&self) {
        self.registry.register_interface::<I>();
    }

    /// Shortcut for [`Registry::register_implementation`].
    pub fn register_implementation<C, I>(&self, cast: fn(Shared<C>) -> Shared<I>)
    where
        C: Any + Sendable,
        I: ?Sized + Sendable + 'static,
    {
        self.registry.register_implementation::<C, I>(cast);
    }

    /// Removes every binding and cached instance. Registered types stay known.
    pub fn clear(&self) {
        write(&self.bindings).clear();
        write(&self.instances).clear();

        #[cfg(feature = "tracing")]
        debug!("Cleared container bindings and instances");
    }

    /// All bindings, in no particular order.
    pub fn bindings(&self) -> Vec<Binding> {
        read(&self.bindings).values().cloned().collect()
    }

    pub fn binding<A: ?Sized + 'static>(&self) -> Option<Binding> {
        self.binding_key(TypeKey::of::<A>())
    }

    pub fn binding_key(&self, abstract_type: TypeKey) -> Option<Binding> {
        read(&self.bindings).get(&abstract_type.id()).cloned()
    }

    /// Check if a binding exists for `A`.
    pub fn has<A: ?Sized + 'static>(&self) -> bool {
        self.has_key(TypeKey::of::<A>())
    }

    pub fn has_key(&self, abstract_type: TypeKey) -> bool {
        read(&self.bindings).contains_key(&abstract_type.id())
    }

    /// Check if a shared instance of `A` has been made or registered.
    pub fn has_instance<A: ?Sized + 'static>(&self) -> bool {
        self.has_instance_key(TypeKey::of::<A>())
    }

    pub fn has_instance_key(&self, abstract_type: TypeKey) -> bool {
        read(&self.instances).contains_key(&abstract_type.id())
    }

    /// Whether `A` is bound as shared. Unbound types are not shared.
    pub fn is_shared<A: ?Sized + 'static>(&self) -> bool {
        self.is_shared_key(TypeKey::of::<A>())
    }

    pub fn is_shared_key(&self, abstract_type: TypeKey) -> bool {
        self.binding_key(abstract_type)
            .is_some_and(|binding| binding.is_shared())
    }

    /// Alias of [`is_shared`](Self::is_shared).
    pub fn is_singleton<A: ?Sized + 'static>(&self) -> bool {
        self.is_shared::<A>()
    }

    /// Removes the binding for `A` and any cached instance.
    pub fn forget<A: ?Sized + 'static>(&self) {
        self.forget_key(TypeKey::of::<A>());
    }

    pub fn forget_key(&self, abstract_type: TypeKey) {
        write(&self.bindings).remove(&abstract_type.id());
        write(&self.instances).remove(&abstract_type.id());

        #[cfg(feature = "tracing")]
        debug!("Forgot {}", abstract_type);
    }

    /// Binds `A` to the class `C`. Every `make::<A>()` constructs a new `C`.
    pub fn bind<A: ?Sized + 'static, C: Class>(&self) -> Result<(), Error> {
        self.registry.register::<C>();
        self.bind_key(TypeKey::of::<A>(), Some(TypeKey::of::<C>()), false)
    }

    /// Binds the class `C` to itself.
    pub fn bind_self<C: Class>(&self) -> Result<(), Error> {
        self.registry.register::<C>();
        self.bind_key(TypeKey::of::<C>(), None, false)
    }

    /// Binds `A` to the class `C`, sharing one instance.
    pub fn singleton<A: ?Sized + 'static, C: Class>(&self) -> Result<(), Error> {
        self.registry.register::<C>();
        self.bind_key(TypeKey::of::<A>(), Some(TypeKey::of::<C>()), true)
    }

    /// Binds the class `C` to itself, sharing one instance.
    pub fn singleton_self<C: Class>(&self) -> Result<(), Error> {
        self.registry.register::<C>();
        self.bind_key(TypeKey::of::<C>(), None, true)
    }

    /// Registers a binding by key. `concrete` defaults to `abstract_type`.
    ///
    /// Fails if `abstract_type` is already bound or unknown, if `concrete` is not a
    /// known class, or if `concrete` does not implement (for interfaces) or equal
    /// (for classes) `abstract_type`.
    pub fn bind_key(
        &self,
        abstract_type: TypeKey,
        concrete: Option<TypeKey>,
        shared: bool,
    ) -> Result<(), Error> {
        if self.has_key(abstract_type) {
            return Err(Error::already_bound(abstract_type.name()));
        }

        self.validate_type(abstract_type)?;
        let concrete = concrete.unwrap_or(abstract_type);
        self.validate_concrete(abstract_type, concrete)?;

        let binding = Binding::new(&self.registry, abstract_type, concrete, shared)?;

        #[cfg(feature = "tracing")]
        info!(
            "Bound {} to {} ({})",
            abstract_type,
            concrete,
            if shared { "shared" } else { "unshared" }
        );

        write(&self.bindings).insert(abstract_type.id(), binding);
        Ok(())
    }

    /// Registers `object` as the shared instance of `A`.
    ///
    /// If `A` is not bound yet it is bound as a singleton to `C`; an existing
    /// binding is marked shared.
    pub fn instance<A, C>(&self, object: C) -> Result<(), Error>
    where
        A: ?Sized + Sendable + 'static,
        C: Any + Sendable,
    {
        self.instance_shared::<A, C>(Shared::new(object))
    }

    /// Like [`instance`](Self::instance), for an object that is already shared.
    pub fn instance_shared<A, C>(&self, object: Shared<C>) -> Result<(), Error>
    where
        A: ?Sized + Sendable + 'static,
        C: Any + Sendable,
    {
        let abstract_type = TypeKey::of::<A>();
        let class = TypeKey::of::<C>();

        self.registry.register_type::<C>();
        self.validate_type(abstract_type)?;
        self.validate_concrete(abstract_type, class)?;

        if !self.has_key(abstract_type) {
            self.bind_key(abstract_type, Some(class), true)?;
        }

        let object = self.registry.cast(Value::new(object), class, abstract_type)?;

        {
            let mut bindings = write(&self.bindings);
            if let Some(binding) = bindings.remove(&abstract_type.id()) {
                bindings.insert(abstract_type.id(), binding.into_shared());
            }
        }

        #[cfg(feature = "tracing")]
        info!("Registered instance of {} for {}", class, abstract_type);

        write(&self.instances).insert(abstract_type.id(), object);
        Ok(())
    }

    /// Makes an instance of `A`.
    pub fn make<A: ?Sized + 'static>(&self) -> Result<Shared<A>, Error> {
        self.make_with::<A>(&Overrides::new())
    }

    /// Makes an instance of `A`, satisfying untyped constructor parameters from
    /// `overrides` first.
    pub fn make_with<A: ?Sized + 'static>(&self, overrides: &Overrides) -> Result<Shared<A>, Error> {
        let abstract_type = TypeKey::of::<A>();
        self.make_key(abstract_type, overrides)?
            .get::<Shared<A>>()
            .ok_or_else(|| Error::type_mismatch(abstract_type.name()))
    }

    /// Makes an instance of the class `C`, registering it first if needed.
    ///
    /// Unlike [`make`](Self::make), this works for a class the container has
    /// never seen.
    pub fn make_class<C: Class>(&self) -> Result<Shared<C>, Error> {
        self.make_class_with::<C>(&Overrides::new())
    }

    /// Like [`make_class`](Self::make_class), with overrides.
    pub fn make_class_with<C: Class>(&self, overrides: &Overrides) -> Result<Shared<C>, Error> {
        self.registry.autoload::<C>();
        self.make_with::<C>(overrides)
    }

    /// Makes an instance by key. The returned value holds a `Shared<A>` for the
    /// abstract type `A` behind `abstract_type`.
    ///
    /// A shared binding returns its cached instance when present; otherwise the
    /// concrete class's constructor arguments are resolved and the class is
    /// constructed, then cached if shared. Unbound types are made as themselves.
    pub fn make_key(&self, abstract_type: TypeKey, overrides: &Overrides) -> Result<Value, Error> {
        let _guard = ResolveGuard::push(abstract_type)?;

        let (shared, concrete) = match self.binding_key(abstract_type) {
            Some(binding) => (binding.is_shared(), binding.concrete()),
            None => (false, abstract_type),
        };

        self.validate_type(abstract_type)?;
        self.validate_concrete(abstract_type, concrete)?;

        if shared {
            if let Some(instance) = read(&self.instances).get(&abstract_type.id()).cloned() {
                #[cfg(feature = "tracing")]
                debug!("Returning shared instance of {}", abstract_type);

                return Ok(instance);
            }
        }

        #[cfg(feature = "tracing")]
        debug!("Making {} as {}", abstract_type, concrete);

        let arguments = Resolver::resolve_constructor(self, concrete, overrides)?;
        let object = self.registry.instantiate(concrete, arguments)?;
        let object = self.registry.cast(object, concrete, abstract_type)?;

        if shared {
            // Another thread may have cached an instance while this one was
            // constructing; the first one stored wins.
            let object = write(&self.instances)
                .entry(abstract_type.id())
                .or_insert(object)
                .clone();
            return Ok(object);
        }

        Ok(object)
    }

    fn validate_type(&self, abstract_type: TypeKey) -> Result<(), Error> {
        if self.registry.contains(abstract_type) {
            Ok(())
        } else {
            Err(Error::type_not_found(abstract_type.name()))
        }
    }

    fn validate_concrete(&self, abstract_type: TypeKey, concrete: TypeKey) -> Result<(), Error> {
        if !self.registry.is_class(concrete) {
            return Err(Error::class_not_found(concrete.name()));
        }

        if self.registry.is_interface(abstract_type)
            && !self.registry.implements(concrete, abstract_type)
        {
            return Err(Error::not_implemented(concrete.name(), abstract_type.name()));
        }

        if self.registry.is_class(abstract_type) && abstract_type != concrete {
            return Err(Error::not_extended(concrete.name(), abstract_type.name()));
        }

        Ok(())
    }
}
