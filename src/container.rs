//! The service container.
//!
//! A [`Container`] maps keys to entries of three activation kinds:
//!
//! - **value**: returned verbatim on every access,
//! - **pending singleton**: a callable resolved on first access and cached,
//! - **factory**: a callable invoked on every access.
//!
//! Keys keep the order of their first registration. Re-registering a key
//! replaces its entry in place.
//!
//! # Examples
//!
//! ```
//! use service_container::{Container, Service};
//! use std::rc::Rc;
//!
//! let mut app = Container::new();
//! app.set("greeting", Service::value("Hello".to_string()))
//!     .set_fn("message", |c: &mut Container| {
//!         let greeting = c.fetch::<String, _>("greeting").unwrap();
//!         format!("{greeting}, World!")
//!     });
//!
//! let message: Rc<String> = app.fetch("message").unwrap();
//! assert_eq!(&*message, "Hello, World!");
//! ```

use std::{any::type_name, borrow::Borrow, fmt, hash::Hash, rc::Rc};

use indexmap::IndexMap;

use crate::{
    Callable, ContainerError, ContainerEvent, EntryKind, Extension, Object, Service,
};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives every [`ContainerEvent`] emitted by the container it
/// is installed on.
pub type TraceCallback = dyn Fn(&ContainerEvent) + 'static;

enum Entry<K> {
    Value(Object),
    PendingSingleton(Callable<K>),
    Factory(Callable<K>),
}

impl<K> Entry<K> {
    fn kind(&self) -> EntryKind {
        match self {
            Entry::Value(_) => EntryKind::Value,
            Entry::PendingSingleton(_) => EntryKind::PendingSingleton,
            Entry::Factory(_) => EntryKind::Factory,
        }
    }
}

impl<K> Clone for Entry<K> {
    fn clone(&self) -> Self {
        match self {
            Entry::Value(value) => Entry::Value(Rc::clone(value)),
            Entry::PendingSingleton(f) => Entry::PendingSingleton(Rc::clone(f)),
            Entry::Factory(f) => Entry::Factory(Rc::clone(f)),
        }
    }
}

/// An ordered registry of services keyed by `K`.
///
/// The container is single-threaded: values are shared through [`Rc`], so it
/// is neither `Send` nor `Sync`.
///
/// Keys need `Hash + Eq` for lookup and `Debug` because every operation
/// renders its key into a [`ContainerEvent`] or a [`ContainerError`].
pub struct Container<K = &'static str> {
    entries: IndexMap<K, Entry<K>>,
    trace: Option<Rc<TraceCallback>>,
}

impl<K> Container<K>
where
    K: Hash + Eq + fmt::Debug + 'static,
{
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            trace: None,
        }
    }

    /// Creates an empty container with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            trace: None,
        }
    }

    /// Creates a container and runs `initializer` on it before returning.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_container::{Container, Service};
    ///
    /// let mut app = Container::with_init(|c| {
    ///     c.set("foo", Service::value("foo"));
    /// });
    /// assert_eq!(*app.fetch::<&str, _>("foo").unwrap(), "foo");
    /// ```
    pub fn with_init(initializer: impl FnOnce(&mut Self)) -> Self {
        let mut container = Self::new();
        initializer(&mut container);
        container
    }

    // -------------------------------------------------------------------------------------------------
    // Tracing
    // -------------------------------------------------------------------------------------------------

    /// Set a tracing callback for this container's operations.
    ///
    /// Replaces any previously installed callback. Events are also logged
    /// through `tracing` regardless of the callback.
    pub fn set_trace_callback(&mut self, callback: impl Fn(&ContainerEvent) + 'static) {
        self.trace = Some(Rc::new(callback));
    }

    /// Clear the tracing callback.
    pub fn clear_trace_callback(&mut self) {
        self.trace = None;
    }

    /// Emits an event to `tracing` and the trace callback.
    ///
    /// The event is only built when someone is listening.
    fn emit_event(&self, event: impl FnOnce() -> ContainerEvent) {
        let logging = tracing::enabled!(target: "service_container", tracing::Level::TRACE);
        if !logging && self.trace.is_none() {
            return;
        }

        let event = event();
        tracing::trace!(target: "service_container", %event);
        if let Some(callback) = self.trace.as_ref() {
            callback(&event);
        }
    }

    // -------------------------------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------------------------------

    /// Register a service.
    ///
    /// A [`Service::Callable`] becomes a singleton: it is invoked with the
    /// container on the first [`get`](Self::get) and its result is cached.
    /// A [`Service::Value`] is stored as-is. Any previous entry for `key` is
    /// replaced.
    pub fn set(&mut self, key: K, service: Service<K>) -> &mut Self {
        let entry = match service {
            Service::Value(value) => Entry::Value(value),
            Service::Callable(f) => Entry::PendingSingleton(f),
        };
        self.register(key, entry)
    }

    /// Register a plain value.
    pub fn set_value<T: 'static>(&mut self, key: K, value: T) -> &mut Self {
        self.set(key, Service::value(value))
    }

    /// Register a singleton built by `f` on first access.
    pub fn set_fn<T, F>(&mut self, key: K, f: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&mut Container<K>) -> T + 'static,
    {
        self.set(key, Service::from_fn(f))
    }

    /// Register a factory.
    ///
    /// A [`Service::Callable`] is invoked on every [`get`](Self::get) and its
    /// result is never cached. A [`Service::Value`] behaves as with
    /// [`set`](Self::set).
    pub fn factory(&mut self, key: K, service: Service<K>) -> &mut Self {
        let entry = match service {
            Service::Value(value) => Entry::Value(value),
            Service::Callable(f) => Entry::Factory(f),
        };
        self.register(key, entry)
    }

    /// Register a factory calling `f` on every access.
    pub fn factory_fn<T, F>(&mut self, key: K, f: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&mut Container<K>) -> T + 'static,
    {
        self.factory(key, Service::from_fn(f))
    }

    /// Register a service exactly as given.
    ///
    /// A [`Service::Callable`] is stored as a value and returned by
    /// [`get`](Self::get) without being invoked; retrieve it with
    /// [`get_protected`](Self::get_protected).
    ///
    /// Ordinary Rust closures and function pointers passed through
    /// [`Service::value`] are values already and need no protection.
    pub fn protect(&mut self, key: K, service: Service<K>) -> &mut Self {
        let value = match service {
            Service::Value(value) => value,
            Service::Callable(f) => Rc::new(f) as Object,
        };
        self.register(key, Entry::Value(value))
    }

    /// Register `f` as a protected callable.
    pub fn protect_fn<T, F>(&mut self, key: K, f: F) -> &mut Self
    where
        T: 'static,
        F: Fn(&mut Container<K>) -> T + 'static,
    {
        self.protect(key, Service::from_fn(f))
    }

    fn register(&mut self, key: K, entry: Entry<K>) -> &mut Self {
        self.emit_event(|| ContainerEvent::Register {
            key: format!("{key:?}"),
            kind: entry.kind(),
        });

        self.entries.insert(key, entry);
        self
    }

    /// Decorate the current service of `key`.
    ///
    /// An [`Extension::Value`] simply overwrites the key like
    /// [`set`](Self::set). An [`Extension::Extender`] replaces the entry with a
    /// new one whose callable computes `extender(container, old_value)`:
    ///
    /// - a factory stays a factory: every access re-runs the old factory and
    ///   then the extender;
    /// - anything else (pending or resolved singleton, plain or protected
    ///   value, absent key) becomes a singleton, so the extender runs once.
    ///
    /// `old_value` is the old singleton's or factory's result, the stored value
    /// as-is, or `None` when `key` was never registered. The current entry is
    /// captured now; computing `old_value` never writes back into it.
    ///
    /// A protected entry is not re-protected: the extender's result is cached as
    /// a singleton value, which returns it verbatim on every access.
    pub fn extend(&mut self, key: K, extension: Extension<K>) -> &mut Self {
        let extender = match extension {
            Extension::Value(value) => return self.set(key, Service::Value(value)),
            Extension::Extender(f) => f,
        };

        let previous = self.entries.get(&key).cloned();
        let decorated: Callable<K> = Rc::new(move |c: &mut Container<K>| {
            let old = match &previous {
                None => None,
                Some(Entry::Value(value)) => Some(Rc::clone(value)),
                Some(Entry::PendingSingleton(f)) | Some(Entry::Factory(f)) => Some(f(c)),
            };
            extender(c, old)
        });

        let entry = match self.entries.get(&key) {
            Some(Entry::Factory(_)) => Entry::Factory(decorated),
            _ => Entry::PendingSingleton(decorated),
        };

        self.emit_event(|| ContainerEvent::Extend {
            key: format!("{key:?}"),
            kind: entry.kind(),
        });

        self.entries.insert(key, entry);
        self
    }

    /// Decorate the current service of `key` with `f`.
    ///
    /// # Examples
    ///
    /// ```
    /// use service_container::Container;
    /// use std::cell::RefCell;
    ///
    /// let mut app = Container::new();
    /// app.set_value("arr", RefCell::new(Vec::<&str>::new()))
    ///     .extend_fn("arr", |_, old| {
    ///         let old = old.expect("registered above");
    ///         if let Some(arr) = old.downcast_ref::<RefCell<Vec<&str>>>() {
    ///             arr.borrow_mut().push("foo");
    ///         }
    ///         old
    ///     });
    ///
    /// let arr = app.fetch::<RefCell<Vec<&str>>, _>("arr").unwrap();
    /// assert_eq!(*arr.borrow(), vec!["foo"]);
    /// ```
    pub fn extend_fn<F>(&mut self, key: K, f: F) -> &mut Self
    where
        F: Fn(&mut Container<K>, Option<Object>) -> Object + 'static,
    {
        self.extend(key, Extension::from_fn(f))
    }

    // -------------------------------------------------------------------------------------------------
    // Access
    // -------------------------------------------------------------------------------------------------

    /// Retrieve the current value of `key`, or `None` if it was never registered.
    ///
    /// Factories are invoked on every call. A pending singleton is invoked once
    /// and its result replaces the entry. Values, including protected
    /// callables, are returned unchanged.
    ///
    /// Panics raised by the invoked callable propagate to the caller.
    pub fn get<Q>(&mut self, key: &Q) -> Option<Object>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let entry = self.entries.get(key).cloned();

        self.emit_event(|| ContainerEvent::Resolve {
            key: format!("{key:?}"),
            kind: entry.as_ref().map(Entry::kind),
        });

        match entry? {
            Entry::Value(value) => Some(value),
            Entry::Factory(f) => Some(f(self)),
            Entry::PendingSingleton(f) => {
                let value = f(self);
                if let Some(slot) = self.entries.get_mut(key) {
                    *slot = Entry::Value(Rc::clone(&value));
                }
                Some(value)
            }
        }
    }

    /// Retrieve the value of `key` as `Rc<T>`.
    ///
    /// # Errors
    ///
    /// - `key` is not registered
    /// - the value is not a `T`
    pub fn fetch<T, Q>(&mut self, key: &Q) -> Result<Rc<T>, ContainerError>
    where
        T: 'static,
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let value = self.get(key).ok_or_else(|| ContainerError::NotFound {
            key: format!("{key:?}"),
        })?;

        value
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                key: format!("{key:?}"),
                expected: type_name::<T>(),
            })
    }

    /// Retrieve a cloned value of `key`.
    ///
    /// # Errors
    ///
    /// Same as [`fetch`](Self::fetch).
    pub fn fetch_cloned<T, Q>(&mut self, key: &Q) -> Result<T, ContainerError>
    where
        T: Clone + 'static,
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let value = self.fetch::<T, Q>(key)?;
        Ok((*value).clone())
    }

    /// Retrieve a callable registered with [`protect`](Self::protect).
    ///
    /// # Errors
    ///
    /// - `key` is not registered
    /// - the value is not a protected callable
    pub fn get_protected<Q>(&mut self, key: &Q) -> Result<Callable<K>, ContainerError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let f = self.fetch::<Callable<K>, Q>(key)?;
        Ok(Rc::clone(&*f))
    }

    // -------------------------------------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------------------------------------

    /// Check if any entry exists for `key`, whatever its kind or resolution state.
    pub fn includes<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + fmt::Debug + ?Sized,
    {
        let found = self.entries.contains_key(key);

        self.emit_event(|| ContainerEvent::Contains {
            key: format!("{key:?}"),
            found,
        });

        found
    }

    /// Activation kind of the entry for `key`. Never resolves anything.
    pub fn kind<Q>(&self, key: &Q) -> Option<EntryKind>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).map(Entry::kind)
    }

    /// Iterate over registered keys in first-registration order.
    ///
    /// Each call starts a fresh traversal. Nothing is resolved.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + DoubleEndedIterator + '_ {
        self.entries.keys()
    }

    /// Call `visitor` with every registered key in first-registration order.
    pub fn each(&self, mut visitor: impl FnMut(&K)) {
        for key in self.entries.keys() {
            visitor(key);
        }
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K> Default for Container<K>
where
    K: Hash + Eq + fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for Container<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field(
                "entries",
                &self
                    .entries
                    .iter()
                    .map(|(key, entry)| (key, entry.kind()))
                    .collect::<Vec<_>>(),
            )
            .field("traced", &self.trace.is_some())
            .finish()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
