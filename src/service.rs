//! Values and callables accepted by the container.
//!
//! Whether something is "callable" is decided by the argument's type, not by
//! inspecting a stored value: a [`Service::Callable`] is a service constructor,
//! a [`Service::Value`] is stored as-is.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::Container;

/// An opaque, reference-counted service value.
pub type Object = Rc<dyn Any>;

/// A service constructor, invoked with the container that owns it.
pub type Callable<K> = Rc<dyn Fn(&mut Container<K>) -> Object>;

/// A decorator receiving the container and the previous value of the key,
/// or `None` when the key had no entry.
pub type ExtenderFn<K> = Rc<dyn Fn(&mut Container<K>, Option<Object>) -> Object>;

/// Argument of [`Container::set`], [`Container::factory`] and [`Container::protect`].
pub enum Service<K> {
    /// Stored verbatim.
    Value(Object),
    /// Activated according to the registration method.
    Callable(Callable<K>),
}

impl<K: 'static> Service<K> {
    /// Wraps a plain value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use service_container::{Container, Service};
    ///
    /// let mut app: Container = Container::new();
    /// app.set("port", Service::value(8080u16));
    /// assert_eq!(*app.fetch::<u16, _>("port").unwrap(), 8080);
    /// ```
    pub fn value<T: 'static>(value: T) -> Self {
        Service::Value(Rc::new(value))
    }

    /// Wraps an already reference-counted value without adding a layer.
    pub fn object(value: Object) -> Self {
        Service::Value(value)
    }

    /// Wraps a closure whose result becomes the service value.
    pub fn from_fn<T, F>(f: F) -> Self
    where
        T: 'static,
        F: Fn(&mut Container<K>) -> T + 'static,
    {
        Service::Callable(Rc::new(move |c: &mut Container<K>| Rc::new(f(c)) as Object))
    }
}

impl<K> Clone for Service<K> {
    fn clone(&self) -> Self {
        match self {
            Service::Value(value) => Service::Value(Rc::clone(value)),
            Service::Callable(f) => Service::Callable(Rc::clone(f)),
        }
    }
}

impl<K> fmt::Debug for Service<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Value(_) => f.write_str("Service::Value(..)"),
            Service::Callable(_) => f.write_str("Service::Callable(..)"),
        }
    }
}

/// Argument of [`Container::extend`].
pub enum Extension<K> {
    /// Overwrites the key like [`Container::set`] would.
    Value(Object),
    /// Decorates the previous value of the key.
    Extender(ExtenderFn<K>),
}

impl<K: 'static> Extension<K> {
    /// Wraps a plain replacement value.
    pub fn value<T: 'static>(value: T) -> Self {
        Extension::Value(Rc::new(value))
    }

    /// Wraps a decorator closure.
    ///
    /// The closure receives the previous value type-erased and returns the new
    /// one. Returning the (mutated) old value keeps its identity.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&mut Container<K>, Option<Object>) -> Object + 'static,
    {
        Extension::Extender(Rc::new(f))
    }
}

impl<K> fmt::Debug for Extension<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extension::Value(_) => f.write_str("Extension::Value(..)"),
            Extension::Extender(_) => f.write_str("Extension::Extender(..)"),
        }
    }
}

/// Activation kind of a registered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Returned verbatim on every access.
    Value,
    /// Resolved on first access, then cached as a value.
    PendingSingleton,
    /// Invoked on every access.
    Factory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Value => write!(f, "value"),
            EntryKind::PendingSingleton => write!(f, "singleton"),
            EntryKind::Factory => write!(f, "factory"),
        }
    }
}
