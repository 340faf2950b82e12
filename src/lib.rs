//! Reducer Kit: composable pure state-transition functions
//!
//! A reducer computes the next state snapshot from the current one and an
//! incoming event. Reducer Kit builds reducers out of small, independently
//! written handler maps and nests them over the fields of a larger state.
//! Snapshots are `serde_json::Value`s that are never mutated in place: each
//! transition consumes the previous snapshot and returns the next one.
//!
//! # Core Concepts
//!
//! - **Events**: tagged records whose `type` selects a route
//! - **Handler maps**: routing tables with an optional `DEFAULT` and
//!   per-field `SUBREDUCERS`
//! - **Composition**: merging maps into one [`Reducer`], rejecting
//!   overlapping definitions up front
//! - **Handlers**: ready-made maps for arrays, keyed collections, model
//!   arrays and async request lifecycles
//!
//! # Example
//!
//! ```rust
//! use reducer_kit::builder::create_reducer;
//! use reducer_kit::core::{Event, HandlerMap};
//! use reducer_kit::handlers::{async_handler, AsyncTypes};
//! use serde_json::json;
//!
//! let fetch = AsyncTypes::new("fetch_todos");
//!
//! let filter = create_reducer(
//!     HandlerMap::new().on("SET_FILTER", |_state, event| {
//!         Ok(event.get("filter").cloned().unwrap_or_default())
//!     }),
//!     json!("all"),
//! )
//! .unwrap();
//!
//! let app = create_reducer(
//!     vec![
//!         async_handler("todos", &fetch),
//!         HandlerMap::new().nest("filter", filter),
//!     ],
//!     json!({}),
//! )
//! .unwrap();
//!
//! let state = app.reduce(json!(null), &fetch.success(json!(["write docs"]))).unwrap();
//! let state = app
//!     .reduce(state, &Event::new("SET_FILTER").with("filter", "done"))
//!     .unwrap();
//!
//! assert_eq!(state["todos"], json!(["write docs"]));
//! assert_eq!(state["filter"], json!("done"));
//! ```

pub mod builder;
pub mod core;
pub mod handlers;
mod reducer;

// Re-export commonly used types
pub use builder::{create_reducer, BuildError};
pub use core::{Event, HandlerMap, ReduceError};
pub use reducer::Reducer;
