//! Build errors for reducer composition.

use thiserror::Error;

/// Errors that can occur when composing reducers and handler maps.
///
/// All of these are wiring mistakes. They are reported while building,
/// before any event is processed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("Overlapping handlers for: {}", .keys.join(", "))]
    OverlappingHandlers { keys: Vec<String> },

    #[error("Overlapping subreducers for fields: {}", .fields.join(", "))]
    OverlappingSubreducers { fields: Vec<String> },

    #[error("'{kind}' is reserved and cannot be used as an event type")]
    ReservedEventType { kind: String },

    #[error("Initializer action type not specified. Call .initializer(kind) before .build()")]
    MissingInitializer,
}

impl BuildError {
    /// Whether two merged maps defined the same key.
    pub fn is_overlap(&self) -> bool {
        matches!(
            self,
            Self::OverlappingHandlers { .. } | Self::OverlappingSubreducers { .. }
        )
    }
}
