//! Extending services in place.
//!
//! Demonstrates how `extend()` decorates a service while keeping its
//! activation kind: singletons stay single, factories stay fresh.
//!
//! Run with: `cargo run --example service_extension`

use service_container::{Container, Extension, Object};
use std::cell::RefCell;
use std::rc::Rc;

type Plugins = RefCell<Vec<&'static str>>;

fn add_plugin(name: &'static str) -> Extension<&'static str> {
    Extension::from_fn(move |_, old| {
        let old = old.unwrap_or_else(|| Rc::new(Plugins::default()) as Object);
        if let Some(plugins) = old.downcast_ref::<Plugins>() {
            plugins.borrow_mut().push(name);
        }
        old
    })
}

fn main() {
    println!("=== service-container: Service Extension ===\n");

    let mut app = Container::new();
    app.set_fn("plugins", |_| Plugins::default())
        .extend("plugins", add_plugin("auth"))
        .extend("plugins", add_plugin("metrics"))
        .extend("templates", add_plugin("default"));

    let plugins = app.fetch::<Plugins, _>("plugins").unwrap();
    println!("plugins:   {:?}", plugins.borrow());

    let templates = app.fetch::<Plugins, _>("templates").unwrap();
    println!("templates: {:?}", templates.borrow());

    app.factory_fn("request_id", |_| 0u64).extend_fn("request_id", |_, old| {
        let id = old.and_then(|v| v.downcast::<u64>().ok()).map_or(0, |v| *v);
        Rc::new(id + 1)
    });

    for _ in 0..2 {
        println!("request_id: {}", app.fetch::<u64, _>("request_id").unwrap());
    }

    println!("\nkeys: {:?}", app.keys().collect::<Vec<_>>());
}
