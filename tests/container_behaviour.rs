//! Integration tests for the basic activation kinds of the container.
//!
//! Covers plain values, lazy singletons, factories, protected callables,
//! chaining, enumeration and membership.

use service_container::{Container, EntryKind, Object, Service};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

type Map = RefCell<HashMap<&'static str, &'static str>>;

/// Registers `foo`, `bar`, `baz` and `prot` with a mix of kinds.
fn full_app() -> Container {
    let mut app = Container::new();
    app.set_value("foo", 1u32)
        .set_fn("bar", |_| 2u32)
        .factory_fn("baz", |_| 3u32)
        .protect_fn("prot", |_| 4u32);
    app
}

#[test]
fn test_static_value_returns_exact_match() {
    let array: Object = Rc::new(RefCell::new(Vec::<&str>::new()));

    let mut app = Container::new();
    app.set("arr", Service::object(Rc::clone(&array)));

    let first = app.get("arr").unwrap();
    let second = app.get("arr").unwrap();
    assert!(Rc::ptr_eq(&first, &array));
    assert!(Rc::ptr_eq(&second, &array));
}

#[test]
fn test_singleton_returns_same_object() {
    let mut app = Container::new();
    app.set_fn("shared", |_| Map::default());

    let a = app.get("shared").unwrap();
    let b = app.get("shared").unwrap();
    assert!(Rc::ptr_eq(&a, &b));
}

#[test]
fn test_singleton_invoked_exactly_once() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);

    let mut app = Container::new();
    app.set_fn("shared", move |_| counter.set(counter.get() + 1));

    for _ in 0..5 {
        let _ = app.get("shared");
    }
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_singleton_receives_container() {
    let seen = Rc::new(Cell::new(false));
    let flag = Rc::clone(&seen);

    let mut app = Container::new();
    app.set_value("marker", 7u8).set_fn("foo", move |c: &mut Container| {
        flag.set(c.includes("marker"));
    });

    let _ = app.get("foo");
    assert!(seen.get());
}

#[test]
fn test_factory_returns_new_object_each_call() {
    let mut app = Container::new();
    app.factory_fn("obj", |_| Map::default());

    let a = app.get("obj").unwrap();
    let b = app.get("obj").unwrap();
    assert!(!Rc::ptr_eq(&a, &b));
}

#[test]
fn test_factory_receives_container() {
    let mut app = Container::new();
    app.set_value("base", 10u32)
        .factory_fn("next", |c: &mut Container| *c.fetch::<u32, _>("base").unwrap() + 1);

    assert_eq!(app.fetch_cloned::<u32, _>("next"), Ok(11));
    assert_eq!(app.fetch_cloned::<u32, _>("next"), Ok(11));
}

#[test]
fn test_factory_with_value_behaves_like_set() {
    let mut app = Container::new();
    app.factory("fact", Service::value("fact"));

    assert_eq!(app.kind("fact"), Some(EntryKind::Value));
    assert_eq!(app.fetch_cloned::<&str, _>("fact"), Ok("fact"));
}

#[test]
fn test_protected_callable_is_returned_not_invoked() {
    let calls = Rc::new(Cell::new(0u32));
    let counter = Rc::clone(&calls);

    let mut app = Container::new();
    app.protect_fn("protected", move |_| counter.set(counter.get() + 1));

    let first = app.get_protected("protected").unwrap();
    let second = app.get_protected("protected").unwrap();
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_plain_closure_value_is_not_invoked() {
    // A closure wrapped as a value is data, whatever it would do when called.
    let double: fn(i32) -> i32 = |x| x * 2;

    let mut app = Container::new();
    app.set_value("double", double);

    let f = app.fetch::<fn(i32) -> i32, _>("double").unwrap();
    assert_eq!(f(21), 42);
    assert_eq!(app.kind("double"), Some(EntryKind::Value));
}

#[test]
fn test_methods_can_be_chained() {
    let mut app = Container::new();
    let app_ptr: *const Container = &app;

    let chained = app
        .set("static", Service::value("foo"))
        .factory("fact", Service::value("fact"))
        .protect("prot", Service::value("prot"))
        .extend_fn("static", |_, _| Rc::new(()));

    assert!(std::ptr::eq(chained, app_ptr));
}

#[test]
fn test_keys_in_registration_order() {
    let app = full_app();
    let keys: Vec<_> = app.keys().copied().collect();
    assert_eq!(keys, ["foo", "bar", "baz", "prot"]);
}

#[test]
fn test_each_visits_keys_in_order() {
    let app = full_app();
    let mut result = Vec::new();
    app.each(|key| result.push(*key));
    assert_eq!(result, ["foo", "bar", "baz", "prot"]);
}

#[test]
fn test_enumeration_is_restartable_and_lazy() {
    let mut app = full_app();
    let first: Vec<_> = app.keys().copied().collect();
    let second: Vec<_> = app.keys().copied().collect();
    assert_eq!(first, second);
    assert_eq!(app.kind("bar"), Some(EntryKind::PendingSingleton));

    app.extend_fn("foo", |_, old| old.unwrap());
    let _ = app.get("bar");
    app.set_value("foo", 5u32);

    let after: Vec<_> = app.keys().copied().collect();
    assert_eq!(after, ["foo", "bar", "baz", "prot"]);
    assert_eq!(app.keys().len(), 4);
}

#[test]
fn test_includes_key() {
    let mut app = Container::new();
    assert!(!app.includes("foo"));

    app.set_value("foo", "foo");
    assert!(app.includes("foo"));
    assert!(!app.includes("bar"));
}

#[test]
fn test_includes_independent_of_resolution() {
    let mut app = Container::new();
    app.set_fn("lazy", |_| 1u8)
        .factory_fn("fact", |_| 2u8)
        .protect_fn("prot", |_| 3u8);

    assert!(app.includes("lazy"));
    assert!(app.includes("fact"));
    assert!(app.includes("prot"));

    let _ = app.get("lazy");
    assert!(app.includes("lazy"));
}

#[test]
fn test_initialized_with_closure() {
    let mut app = Container::with_init(|a| {
        a.set_value("foo", "foo");
    });

    assert_eq!(app.fetch_cloned::<&str, _>("foo"), Ok("foo"));
}

#[test]
fn test_missing_key_is_none() {
    let mut app: Container = Container::default();
    assert!(app.get("nope").is_none());
}

#[test]
fn test_string_keys() {
    let mut app: Container<String> = Container::with_capacity(2);
    app.set_value("db".to_string(), "postgres://localhost");

    assert!(app.includes("db"));
    assert_eq!(app.fetch_cloned::<&str, _>("db"), Ok("postgres://localhost"));
}

#[test]
#[should_panic(expected = "boom")]
fn test_callable_panic_propagates() {
    let mut app = Container::new();
    app.set_fn("broken", |_| -> u8 { panic!("boom") });
    let _ = app.get("broken");
}
