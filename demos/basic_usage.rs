//! Basic usage example for service-container.
//!
//! Demonstrates:
//! - Registering plain values, lazy singletons and factories
//! - Retrieving values with `fetch()` (returns `Rc<T>`)
//! - Storing a helper callable with `protect()`
//! - Enumerating keys and checking membership
//!
//! Run with: `cargo run --example basic_usage`

use service_container::{Container, Service};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
struct AppConfig {
    name: String,
    version: u32,
    debug_mode: bool,
}

struct Connection {
    dsn: String,
}

fn main() {
    println!("=== service-container: Basic Usage ===\n");

    let mut app = Container::with_init(|c| {
        c.set_value(
            "config",
            AppConfig {
                name: "MyApp".to_string(),
                version: 1,
                debug_mode: true,
            },
        );
    });

    // -------------------------------------------------------------------------
    // 1. Lazy singleton depending on another service
    // -------------------------------------------------------------------------
    println!("1. Registering a lazy connection...");

    app.set_fn("db", |c: &mut Container| {
        println!("   (connecting...)");
        let config = c.fetch::<AppConfig, _>("config").unwrap();
        Connection {
            dsn: format!("postgres://localhost/{}", config.name.to_lowercase()),
        }
    });

    let db: Rc<Connection> = app.fetch("db").unwrap();
    let again: Rc<Connection> = app.fetch("db").unwrap();
    println!("   dsn = {}, same instance: {}", db.dsn, Rc::ptr_eq(&db, &again));

    // -------------------------------------------------------------------------
    // 2. Factory
    // -------------------------------------------------------------------------
    println!("\n2. Registering a factory...");

    app.factory_fn("buffer", |_| Vec::<u8>::with_capacity(64));
    let a = app.fetch::<Vec<u8>, _>("buffer").unwrap();
    let b = app.fetch::<Vec<u8>, _>("buffer").unwrap();
    println!("   fresh buffers: {}", !Rc::ptr_eq(&a, &b));

    // -------------------------------------------------------------------------
    // 3. Protected helper
    // -------------------------------------------------------------------------
    println!("\n3. Registering a protected helper...");

    app.protect(
        "describe",
        Service::from_fn(|c: &mut Container| {
            let config = c.fetch::<AppConfig, _>("config").unwrap();
            format!("{} v{} (debug: {})", config.name, config.version, config.debug_mode)
        }),
    );

    match app.get_protected("describe") {
        Ok(describe) => {
            let text = describe(&mut app);
            if let Some(text) = text.downcast_ref::<String>() {
                println!("   {text}");
            }
        }
        Err(err) => println!("   {err}"),
    }

    // -------------------------------------------------------------------------
    // 4. Enumeration
    // -------------------------------------------------------------------------
    println!("\n4. Registered keys:");

    app.each(|key| println!("   - {key}: {:?}", app.kind(key)));
    println!("   includes(\"db\") = {}", app.includes("db"));
    println!("   includes(\"cache\") = {}", app.includes("cache"));

    println!("\n=== Done ===");
}
