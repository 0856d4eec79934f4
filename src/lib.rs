//! # Service Container
//!
//! A minimal dependency injection container mapping keys to services.
//! Designed for single-threaded, in-process application wiring.
//!
//! A service is registered either as a plain value or as a callable that
//! receives the container, and is activated according to how it was registered.
//!
//! ## Quick Start
//!
//! ```rust
//! use service_container::{Container, Service};
//! use std::rc::Rc;
//!
//! let mut app = Container::new();
//! app.set("name", Service::value("service-container".to_string()))
//!     .set_fn("banner", |c: &mut Container| {
//!         format!("** {} **", c.fetch::<String, _>("name").unwrap())
//!     })
//!     .factory_fn("scratch", |_| Vec::<u8>::with_capacity(16));
//!
//! let banner: Rc<String> = app.fetch("banner").unwrap();
//! assert_eq!(&*banner, "** service-container **");
//! assert_eq!(app.keys().copied().collect::<Vec<_>>(), ["name", "banner", "scratch"]);
//! ```
//!
//! ## Activation kinds
//!
//! - [`Container::set`] - values are stored as-is, callables become lazy singletons
//! - [`Container::factory`] - callables run on every [`Container::get`]
//! - [`Container::protect`] - callables are stored and returned, never invoked
//! - [`Container::extend`] - decorates an existing service, keeping factories factories
//!
//! ## Main Functions
//!
//! - [`Container::get`] - Retrieve a type-erased [`Object`], or `None`
//! - [`Container::fetch`] - Retrieve a value as `Rc<T>`
//! - [`Container::includes`] - Check if a key is registered
//! - [`Container::keys`] / [`Container::each`] - Enumerate keys in registration order
//! - [`Container::set_trace_callback`] - Observe container operations

mod container;
mod container_error;
mod container_event;
mod service;

pub use container::{Container, TraceCallback};
pub use container_error::ContainerError;
pub use container_event::ContainerEvent;
pub use service::{Callable, EntryKind, ExtenderFn, Extension, Object, Service};
