//! Macros for declaring implementations and building overrides.
//!
//! - [`implements!`] macro: Record which classes implement an interface.
//! - [`overrides!`] macro: Build [`Overrides`](crate::Overrides) inline.
//!
//! # Example
//! ```
//! use autowire::{Container, implements, overrides};
//!
//! trait Store: Send + Sync {}
//! struct Memory;
//! struct Disk;
//! impl Store for Memory {}
//! impl Store for Disk {}
//!
//! let container = Container::new();
//! implements!(container, Memory => dyn Store, Disk => dyn Store);
//!
//! let overrides = overrides! { "path" => "/tmp".to_string(), "retries" => 3u32 };
//! assert_eq!(overrides.len(), 2);
//! ```

/// Records that each class implements the given interface.
///
/// Works on anything with a `register_implementation` method: a
/// [`Container`](crate::Container) or a [`Registry`](crate::Registry).
///
/// - `Class => dyn Trait`: one implementation.
/// - `A => dyn Trait, B => dyn Other`: several at once.
#[macro_export]
macro_rules! implements {
    ($target:expr, $($class:ty => dyn $interface:path),+ $(,)?) => {{
        $(
            $target.register_implementation::<$class, dyn $interface>(|object| {
                object as $crate::Shared<dyn $interface>
            });
        )+
    }};
}

/// Builds [`Overrides`](crate::Overrides) from `"name" => value` pairs.
#[macro_export]
macro_rules! overrides {
    () => {
        $crate::Overrides::new()
    };

    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut overrides = $crate::Overrides::new();
        $(
            overrides.insert($name, $value);
        )+
        overrides
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Registry, Shared, TypeKey};

    trait Animal: Send + Sync {
        fn sound(&self) -> &'static str;
    }

    struct Dog;
    struct Cat;

    impl Animal for Dog {
        fn sound(&self) -> &'static str {
            "woof"
        }
    }

    impl Animal for Cat {
        fn sound(&self) -> &'static str {
            "meow"
        }
    }

    #[test]
    fn implements_registers_every_pair() {
        let registry = Registry::new();
        implements!(registry, Dog => dyn Animal, Cat => dyn Animal);

        let animal = TypeKey::of::<dyn Animal>();
        assert!(registry.implements(TypeKey::of::<Dog>(), animal));
        assert!(registry.implements(TypeKey::of::<Cat>(), animal));
        assert!(registry.is_interface(animal));
    }

    #[test]
    fn implements_casts_through_the_interface() {
        let registry = Registry::new();
        implements!(registry, Dog => dyn Animal);

        let object = crate::Value::new(Shared::new(Dog));
        let animal = registry
            .cast(object, TypeKey::of::<Dog>(), TypeKey::of::<dyn Animal>())
            .unwrap()
            .get::<Shared<dyn Animal>>()
            .unwrap();
        assert_eq!(animal.sound(), "woof");
    }

    #[test]
    fn overrides_macro() {
        let empty = overrides!();
        assert!(empty.is_empty());

        let filled = overrides! { "name" => "x".to_string(), "count" => 2usize, };
        assert_eq!(filled.len(), 2);
        assert_eq!(filled.get("count").and_then(|v| v.get::<usize>()), Some(2));
    }
}
