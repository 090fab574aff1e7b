//! # autowire
//!
//! An inversion-of-control container that maps abstract types to concrete classes,
//! resolves constructor arguments recursively, and optionally caches one shared
//! instance per abstract type.
//!
//! ## Core Concepts
//!
//! - **Registry**: the runtime record of known classes, interfaces (trait object
//!   types) and which classes implement which interfaces.
//! - **Class**: a type the container can construct. It lists its constructor
//!   parameters and builds itself from the resolved arguments.
//! - **Binding**: maps an abstract type to the concrete class that satisfies it,
//!   shared or not.
//! - **Container**: holds bindings and shared instances; `make` builds instances.
//! - **Resolver**: turns constructor parameters into arguments, calling back into
//!   the container for type-hinted parameters.
//!
//! ## Quick Start
//!
//! ```
//! use autowire::{Arguments, Class, Container, Error, Overrides, Parameter, Shared, implements};
//!
//! trait Repository: Send + Sync {
//!     fn find(&self, id: u32) -> String;
//! }
//!
//! struct MemoryRepository;
//!
//! impl Repository for MemoryRepository {
//!     fn find(&self, id: u32) -> String {
//!         format!("user-{}", id)
//!     }
//! }
//!
//! impl Class for MemoryRepository {
//!     fn construct(_args: Arguments) -> Result<Self, Error> {
//!         Ok(MemoryRepository)
//!     }
//! }
//!
//! struct UserService {
//!     repository: Shared<dyn Repository>,
//!     prefix: String,
//! }
//!
//! impl Class for UserService {
//!     fn parameters() -> Vec<Parameter> {
//!         vec![
//!             Parameter::interface::<dyn Repository>("repository"),
//!             Parameter::required("prefix"),
//!         ]
//!     }
//!
//!     fn construct(args: Arguments) -> Result<Self, Error> {
//!         Ok(UserService {
//!             repository: args.service::<dyn Repository>("repository")?,
//!             prefix: args.get("prefix")?,
//!         })
//!     }
//! }
//!
//! let container = Container::new();
//! implements!(container, MemoryRepository => dyn Repository);
//! container.singleton::<dyn Repository, MemoryRepository>().unwrap();
//! container.bind_self::<UserService>().unwrap();
//!
//! let service = container
//!     .make_with::<UserService>(&Overrides::new().with("prefix", "> ".to_string()))
//!     .unwrap();
//! assert_eq!(format!("{}{}", service.prefix, service.repository.find(7)), "> user-7");
//! ```
//!
//! ## Feature Flags
//!
//! - `thread-safe`: `Arc` and `RwLock` instead of `Rc` and `RefCell`; stored types must be `Send + Sync`.
//! - `tracing`: logs registration, resolution and errors.
//! - `debug`: `Debug` impls and kind-prefixed error messages.

pub mod binding;
pub mod class;
pub mod container;
pub mod error;
pub mod global;
pub mod key;
mod macros;
pub mod registry;
pub mod resolve_guard;
pub mod resolver;
pub mod runtime;
pub mod value;

pub use binding::*;
pub use class::*;
pub use container::*;
pub use error::*;
pub use global::*;
pub use key::*;
pub use registry::*;
pub use resolve_guard::*;
pub use resolver::*;
pub use runtime::*;
pub use value::*;
