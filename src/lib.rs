#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod cache;
pub(crate) mod container;
pub(crate) mod dependency_resolver;
pub(crate) mod errors;
pub(crate) mod global;
pub(crate) mod inject;
pub(crate) mod injected;
pub(crate) mod instantiator;
pub(crate) mod registry;
pub(crate) mod service;

pub use any::ServiceKey;
pub use container::Container;
pub use dependency_resolver::DependencyResolver;
pub use errors::{InstantiateErrorKind, InstantiatorErrorKind, ResolveErrorKind};
pub use global::{global, init_global, try_global};
pub use inject::Inject;
pub use injected::Injected;
pub use instantiator::Instantiator;
pub use registry::Registry;
