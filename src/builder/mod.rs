//! Composition of handler maps into reducers.
//!
//! Composition happens once, while wiring the application. All
//! configuration mistakes, such as two maps routing the same event type,
//! are reported here as a [`BuildError`] rather than at dispatch time.

pub mod compose;
pub mod error;
pub mod macros;
mod overlap;

pub use compose::{create_reducer, Handlers};
pub use error::BuildError;
