//! Errors raised while applying a transition.

use thiserror::Error;

/// Errors that can occur when a reducer processes an event.
///
/// These are fatal for the event that raised them: the caller gets the
/// error instead of a next state, and no partial state is produced.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReduceError {
    #[error("Record {position} of the payload has no identity field '{field}'")]
    MissingIdentity {
        kind: Option<String>,
        field: String,
        position: usize,
    },

    #[error("Handler failed: {0}")]
    Handler(String),
}
