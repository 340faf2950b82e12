//! Core vocabulary of the transition engine.
//!
//! This module contains the values every reducer works with:
//! - Events and their payload accessors
//! - Handlers and the routing tables that hold them
//! - Record identity helpers
//!
//! Nothing here performs composition; see [`crate::builder`].

mod error;
mod event;
mod handler;
mod identity;

pub use error::ReduceError;
pub use event::{Event, ERROR_FIELD, RESULTS_FIELD};
pub use handler::{Handler, HandlerMap, RouteKey, DEFAULT, SUBREDUCERS};
pub use identity::{identity_key, record_identity, DEFAULT_ID_KEY, DEFAULT_INDEX_KEY};
