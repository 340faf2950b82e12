//! Todo Store
//!
//! This example composes a small application reducer out of independent
//! handler maps and drives it with a sequence of events.
//!
//! Key concepts:
//! - Merging handler maps with overlap detection
//! - Nesting reducers over fields of a larger state
//! - Model arrays with init and upsert
//! - Tracking an async request lifecycle
//!
//! Run with: cargo run --example todo_store

use reducer_kit::builder::create_reducer;
use reducer_kit::core::{Event, HandlerMap};
use reducer_kit::handlers::{async_handler, AsyncTypes, ModelArray, ModelArrayBuilder};
use serde_json::{json, Value};

fn main() {
    println!("=== Todo Store Example ===\n");

    let sync = AsyncTypes::new("sync");

    let todos = ModelArrayBuilder::new()
        .initializer("TODOS_LOADED")
        .updater("TODOS_SAVED")
        .item(|mut todo, event| {
            if event.kind() == Some("TODO_TOGGLE") {
                let done = todo["done"].as_bool().unwrap_or(false);
                todo["done"] = json!(!done);
            }
            Ok(todo)
        })
        .build_reducer()
        .unwrap();

    let filter = create_reducer(
        HandlerMap::new().on("SET_FILTER", |_state, event| {
            Ok(event.get("filter").cloned().unwrap_or_default())
        }),
        json!("all"),
    )
    .unwrap();

    let app = create_reducer(
        vec![
            async_handler("status", &sync),
            HandlerMap::new().nest("todos", todos).nest("filter", filter),
        ],
        json!({}),
    )
    .unwrap();

    println!("Composed reducer: {app:?}\n");

    let events = [
        sync.request(),
        sync.success(json!({ "count": 2 })),
        Event::new("TODOS_LOADED").with(
            "results",
            json!([
                { "id": 1, "title": "Write docs", "done": false },
                { "id": 2, "title": "Ship release", "done": false },
            ]),
        ),
        Event::new("TODOS_SAVED").with("results", json!({ "id": 3, "title": "Celebrate" })),
        Event::new("TODO_TOGGLE").with("index", 0),
        Event::new("SET_FILTER").with("filter", "open"),
    ];

    let mut state = Value::Null;
    for event in &events {
        state = app.reduce(state, event).unwrap();
        println!("After {:?}:", event.kind().unwrap_or_default());
        println!("  {state}");
    }

    println!();
    println!("Todo 1: {:?}", ModelArray::lookup(&state["todos"], 1));
    println!("Todo 3: {:?}", ModelArray::lookup(&state["todos"], 3));
    println!("Filter: {}", state["filter"]);

    println!("\n=== Example Complete ===");
}
