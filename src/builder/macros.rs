//! Macros for ergonomic handler map construction.

/// Declare a [`HandlerMap`](crate::core::HandlerMap) inline.
///
/// Each entry routes an event type to a transition closure. Use the
/// [`DEFAULT`](crate::core::DEFAULT) constant as the key for the fallback.
///
/// # Example
///
/// ```
/// use reducer_kit::core::DEFAULT;
/// use reducer_kit::handlers;
/// use serde_json::json;
///
/// let map = handlers! {
///     "SHOW" => |_state, _event| Ok(json!(true)),
///     "HIDE" => |_state, _event| Ok(json!(false)),
///     DEFAULT => |state, _event| Ok(state),
/// };
///
/// assert!(map.handles("SHOW"));
/// assert!(map.has_default());
/// ```
#[macro_export]
macro_rules! handlers {
    () => {
        $crate::core::HandlerMap::new()
    };
    (
        $($kind:expr => $handler:expr),+ $(,)?
    ) => {
        $crate::core::HandlerMap::new()
            $(.on($kind, $handler))+
    };
}
