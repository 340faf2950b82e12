//! Ready-made handler maps for common state shapes.
//!
//! - Collections addressed by position or identity
//! - Model arrays: ordered records with an identity index
//! - Request/success/failure lifecycle of an asynchronous call
//!
//! Each factory returns a plain [`HandlerMap`](crate::core::HandlerMap) to be
//! composed with [`create_reducer`](crate::builder::create_reducer), alone or
//! merged with other maps.

mod collection;
mod lifecycle;
mod model_array;

pub use collection::{
    array_handler, object_list_handler, to_index_map, to_object_map, ObjectListKeys,
};
pub use lifecycle::{async_handler, async_handler_with, AsyncTypes};
pub use model_array::{ModelArray, ModelArrayBuilder, MAP_FIELD, OBJECTS_FIELD};
