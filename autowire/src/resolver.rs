//! Constructor argument resolution.
//!
//! [`Resolver`] walks a class's constructor parameters in declaration order and
//! produces the [`Arguments`] its constructor is called with. For each parameter:
//!
//! 1. a class or interface type hint is made through the container (or, when type
//!    hints are not resolved, replaced by the hinted type's name as a `String`);
//! 2. otherwise an override with the parameter's name is used;
//! 3. otherwise the parameter's default value is used;
//! 4. otherwise resolution fails with "Parameter NAME not found.".

use crate::class::{Arguments, Parameter};
use crate::container::Container;
use crate::error::Error;
use crate::key::TypeKey;
use crate::value::{Overrides, Value};

#[cfg(feature = "tracing")]
use tracing::debug;

pub struct Resolver;

impl Resolver {
    /// Resolves the constructor arguments of `class`, making type-hinted
    /// dependencies through `container`.
    ///
    /// Any registered type is accepted. Types without a constructor, interfaces
    /// included, resolve to no arguments; unregistered types fail with
    /// `ClassNotFound`.
    pub fn resolve_constructor(
        container: &Container,
        class: TypeKey,
        overrides: &Overrides,
    ) -> Result<Arguments, Error> {
        Self::resolve_constructor_with(container, class, overrides, true)
    }

    /// Like [`resolve_constructor`](Self::resolve_constructor). With
    /// `resolve_type_hints` off, type-hinted parameters resolve to the hinted
    /// type's name instead of an instance.
    ///
    /// ```
    /// use autowire::{Arguments, Class, Container, Error, Overrides, Parameter, Resolver, TypeKey};
    ///
    /// trait Mailer {}
    ///
    /// struct Signup;
    ///
    /// impl Class for Signup {
    ///     fn parameters() -> Vec<Parameter> {
    ///         vec![Parameter::interface::<dyn Mailer>("mailer"), Parameter::required("test")]
    ///     }
    ///
    ///     fn construct(_args: Arguments) -> Result<Self, Error> {
    ///         Ok(Signup)
    ///     }
    /// }
    ///
    /// let container = Container::new();
    /// container.register::<Signup>();
    ///
    /// let overrides = Overrides::new().with("test", "check".to_string());
    /// let args = Resolver::resolve_constructor_with(
    ///     &container,
    ///     TypeKey::of::<Signup>(),
    ///     &overrides,
    ///     false,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(args.get::<String>("mailer").unwrap(), std::any::type_name::<dyn Mailer>());
    /// assert_eq!(args.get::<String>("test").unwrap(), "check");
    /// ```
    pub fn resolve_constructor_with(
        container: &Container,
        class: TypeKey,
        overrides: &Overrides,
        resolve_type_hints: bool,
    ) -> Result<Arguments, Error> {
        let parameters = container.registry().parameters(class)?;

        #[cfg(feature = "tracing")]
        debug!(
            "Resolving {} constructor parameter(s) of {}",
            parameters.len(),
            class
        );

        Self::resolve_parameters(container, &parameters, overrides, resolve_type_hints)
    }

    fn resolve_parameters(
        container: &Container,
        parameters: &[Parameter],
        overrides: &Overrides,
        resolve_type_hints: bool,
    ) -> Result<Arguments, Error> {
        let mut arguments = Arguments::new();
        for parameter in parameters {
            let name = parameter.name();

            let value = if let Some(hint) = parameter.hint() {
                if resolve_type_hints {
                    hint.load(container.registry());
                    container.make_key(hint.key(), &Overrides::new())?
                } else {
                    Value::new(hint.key().name().to_string())
                }
            } else if let Some(value) = overrides.get(name) {
                value.clone()
            } else if let Some(default) = parameter.default() {
                default.clone()
            } else {
                return Err(Error::parameter_not_found(name));
            };

            arguments.push(name, value);
        }
        Ok(arguments)
    }
}
