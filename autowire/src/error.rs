//! Error types for the autowire container.
//!
//! This module defines a lightweight error model used across the container to
//! describe failures that can occur while declaring types, binding them, and
//! resolving constructor arguments.
//!
//! # Design
//!
//! - `ErrorKind` captures the error category.
//! - `Error` stores the category and a human-readable message.
//!
//! The helpers in `Error` are provided to keep call sites concise and to
//! maintain consistent error messages.
//!
//! # Feature Flags
//!
//! - `tracing`: logs errors when they are created.
//! - `debug`: enables extra diagnostic formatting in `Display`.
//!
//! # Examples
//!
//! ```
//! use autowire::error::Error;
//!
//! let err = Error::parameter_not_found("retries");
//! assert_eq!(err.message, "Parameter retries not found.");
//! ```

use core::fmt;

#[cfg(feature = "tracing")]
use tracing::error;

/// Error categories for the container.
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum ErrorKind {
    /// Neither a class nor an interface with this name is known.
    TypeNotFound,
    /// The type is not a known class.
    ClassNotFound,
    /// A binding already exists for the abstract type.
    AlreadyBound,
    /// The concrete class does not implement the interface.
    NotImplemented,
    /// The concrete class does not stand in for the abstract class.
    NotExtended,
    /// A constructor parameter could not be satisfied.
    ParameterNotFound,
    /// The class has no constructor.
    NotInstantiable,
    /// Type mismatch during downcast or resolution.
    TypeMismatch,
    /// Circular dependency detected in resolution chain.
    CircularDependency,
    /// A constructor reported a failure.
    ConstructionFailed,
}

/// Container error structure.
///
/// `kind` enables programmatic handling, while `message` is human-readable.
#[derive(Clone)]
#[cfg_attr(feature = "debug", derive(Debug))]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    /// Creates a new error with the given kind and message.
    ///
    /// If the `tracing` feature is enabled, the error is automatically logged.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let error = Self {
            kind,
            message: message.into(),
        };

        #[cfg(feature = "tracing")]
        error!("{}", error);

        error
    }

    /// Neither a class nor an interface is registered under this name.
    pub fn type_not_found(type_name: &str) -> Self {
        Self::new(
            ErrorKind::TypeNotFound,
            format!("Class or interface {} does not exist.", type_name),
        )
    }

    /// The type is unknown or is an interface where a class is required.
    pub fn class_not_found(type_name: &str) -> Self {
        Self::new(
            ErrorKind::ClassNotFound,
            format!("Class {} does not exist.", type_name),
        )
    }

    pub fn already_bound(type_name: &str) -> Self {
        Self::new(
            ErrorKind::AlreadyBound,
            format!("Class or interface {} already bound.", type_name),
        )
    }

    pub fn not_implemented(class: &str, interface: &str) -> Self {
        Self::new(
            ErrorKind::NotImplemented,
            format!("Class {} does not implement {}", class, interface),
        )
    }

    /// Structs have no inheritance, so any class other than the abstract one ends up here.
    pub fn not_extended(class: &str, parent: &str) -> Self {
        Self::new(
            ErrorKind::NotExtended,
            format!("Class {} does not extend {}", class, parent),
        )
    }

    /// No type hint, override or default value satisfied the parameter.
    pub fn parameter_not_found(name: &str) -> Self {
        Self::new(
            ErrorKind::ParameterNotFound,
            format!("Parameter {} not found.", name),
        )
    }

    pub fn not_instantiable(type_name: &str) -> Self {
        Self::new(
            ErrorKind::NotInstantiable,
            format!("Class {} has no constructor and cannot be instantiated.", type_name),
        )
    }

    /// Type mismatch during downcast.
    ///
    /// This covers arguments of the wrong type as well as cached instances that
    /// do not match the requested abstract type.
    pub fn type_mismatch(type_name: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("Type mismatch when resolving: {}", type_name),
        )
    }

    /// Circular dependency detected in resolution chain.
    pub fn circular_dependency(dependency_chain: &[&str]) -> Self {
        Self::new(
            ErrorKind::CircularDependency,
            format!(
                "Circular dependency detected: {}",
                dependency_chain.join(" -> ")
            ),
        )
    }

    /// For use inside [`Class::construct`](crate::Class::construct).
    pub fn construction_failed(type_name: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::ConstructionFailed,
            format!("Failed to construct {}: {}", type_name, reason),
        )
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(feature = "debug")]
        {
            write!(f, "({:?}) - {}", self.kind, self.message)
        }
        #[cfg(not(feature = "debug"))]
        {
            write!(f, "{}", self.message)
        }
    }
}

#[cfg(feature = "debug")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_not_found_error() {
        let err = Error::type_not_found("unknown.class");
        assert!(err.kind == ErrorKind::TypeNotFound);
        assert_eq!(err.message, "Class or interface unknown.class does not exist.");
    }

    #[test]
    fn class_not_found_error() {
        let err = Error::class_not_found("not.a.class");
        assert!(err.kind == ErrorKind::ClassNotFound);
        assert_eq!(err.message, "Class not.a.class does not exist.");
    }

    #[test]
    fn already_bound_error() {
        let err = Error::already_bound("Foo");
        assert!(err.kind == ErrorKind::AlreadyBound);
        assert_eq!(err.message, "Class or interface Foo already bound.");
    }

    #[test]
    fn relation_errors() {
        let err = Error::not_implemented("Plain", "dyn Greeter");
        assert!(err.kind == ErrorKind::NotImplemented);
        assert_eq!(err.message, "Class Plain does not implement dyn Greeter");

        let err = Error::not_extended("Plain", "Base");
        assert!(err.kind == ErrorKind::NotExtended);
        assert_eq!(err.message, "Class Plain does not extend Base");
    }

    #[test]
    fn parameter_not_found_error() {
        let err = Error::parameter_not_found("test");
        assert!(err.kind == ErrorKind::ParameterNotFound);
        assert_eq!(err.message, "Parameter test not found.");
    }

    #[test]
    fn circular_dependency_error() {
        let chain = ["A", "B", "A"];
        let err = Error::circular_dependency(&chain);
        assert!(err.kind == ErrorKind::CircularDependency);
        assert!(err.message.contains("A -> B -> A"));
    }

    #[test]
    fn construction_failed_error() {
        let err = Error::construction_failed("BadClass", "fail.on.purpose");
        assert!(err.kind == ErrorKind::ConstructionFailed);
        assert!(err.message.contains("fail.on.purpose"));
    }

    #[test]
    fn display_trait() {
        let err = Error::class_not_found("X");
        let s = format!("{}", err);
        #[cfg(feature = "debug")]
        assert!(s.contains("ClassNotFound"));
        assert!(s.contains("X"));
    }

    #[test]
    fn error_kind_equality() {
        let err1 = Error::type_mismatch("A");
        let err2 = Error::type_mismatch("B");
        assert!(err1.kind == err2.kind);
        assert_ne!(err1.message, err2.message);
    }
}
