//! End-to-end composition of handler maps into an application reducer.

use reducer_kit::builder::{create_reducer, BuildError};
use reducer_kit::core::{Event, HandlerMap, ReduceError};
use reducer_kit::handlers::{
    array_handler, async_handler, AsyncTypes, ModelArray, ModelArrayBuilder,
};
use reducer_kit::{handlers, Reducer};
use serde_json::{json, Value};

fn users() -> Reducer {
    ModelArrayBuilder::new()
        .initializer("USERS_LOADED")
        .updater("USERS_SAVED")
        .item(|mut user, event| {
            if let Some(role) = event.get("role") {
                user["role"] = role.clone();
            }
            Ok(user)
        })
        .build_reducer()
        .unwrap()
}

fn app(fetch: &AsyncTypes) -> Reducer {
    let tags = create_reducer(
        array_handler(|_tag, event| Ok(event.get("tag").cloned().unwrap_or_default()), "index"),
        json!([]),
    )
    .unwrap();

    create_reducer(
        vec![
            async_handler("report", fetch),
            HandlerMap::new().nest("users", users()).nest("tags", tags),
            handlers! {
                "RESET_TAGS" => |mut state, _event| {
                    state["tags"] = json!([]);
                    Ok(state)
                },
            },
        ],
        json!({ "title": "dashboard" }),
    )
    .unwrap()
}

#[test]
fn application_state_evolves_through_nested_reducers() {
    let fetch = AsyncTypes::new("fetch_report");
    let app = app(&fetch);

    let events = vec![
        Event::new("USERS_LOADED").with("results", json!([{ "id": 10 }, { "id": 20 }, { "id": 30 }])),
        Event::new("USERS_SAVED").with("results", json!([{ "id": 50 }, { "id": 40 }])),
        fetch.request(),
        fetch.success(json!({ "rows": 2 })),
    ];
    let state = app.reduce_all(Value::Null, &events).unwrap();

    assert_eq!(state["title"], json!("dashboard"));
    assert_eq!(
        state["users"]["objects"],
        json!([{ "id": 10 }, { "id": 20 }, { "id": 30 }, { "id": 50 }, { "id": 40 }])
    );
    assert_eq!(
        state["users"]["map"],
        json!({ "10": 0, "20": 1, "30": 2, "50": 3, "40": 4 })
    );
    assert_eq!(state["report"], json!({ "rows": 2 }));
    assert_eq!(state["reportLoading"], json!(false));
    assert_eq!(state["tags"], json!([]));
}

#[test]
fn position_addressed_event_reaches_every_subreducer() {
    let fetch = AsyncTypes::new("fetch_report");
    let app = app(&fetch);

    let state = app
        .reduce(
            json!({ "tags": ["a", "b", "c"] }),
            &Event::new("USERS_LOADED").with("results", json!([{ "id": 1 }, { "id": 2 }])),
        )
        .unwrap();

    let promote = Event::new("PROMOTE")
        .with("index", 1)
        .with("role", "admin")
        .with("tag", "B");
    let state = app.reduce(state, &promote).unwrap();

    assert_eq!(
        ModelArray::lookup(&state["users"], 2),
        Some(&json!({ "id": 2, "role": "admin" }))
    );
    assert_eq!(ModelArray::lookup(&state["users"], 1), Some(&json!({ "id": 1 })));
    assert_eq!(state["tags"], json!(["a", "B", "c"]));
}

#[test]
fn exact_route_wins_over_subreducers() {
    let fetch = AsyncTypes::new("fetch_report");
    let app = app(&fetch);

    let state = app
        .reduce(json!({ "tags": ["x"] }), &Event::new("RESET_TAGS").with("index", 0))
        .unwrap();
    assert_eq!(state["tags"], json!([]));
}

#[test]
fn upsert_overwrites_in_place() {
    let users = users();
    let state = users
        .reduce(
            Value::Null,
            &Event::new("USERS_LOADED").with("results", json!([{ "id": 10 }, { "id": 20 }, { "id": 30 }])),
        )
        .unwrap();

    let state = users
        .reduce(state, &Event::new("USERS_SAVED").with("results", json!({ "id": 20, "val": 600 })))
        .unwrap();

    assert_eq!(state["objects"][1], json!({ "id": 20, "val": 600 }));
    assert_eq!(state["map"], json!({ "10": 0, "20": 1, "30": 2 }));
}

#[test]
fn missing_identity_aborts_the_event() {
    let fetch = AsyncTypes::new("fetch_report");
    let app = app(&fetch);

    let result = app.reduce(
        json!({}),
        &Event::new("USERS_SAVED").with("results", json!([{ "name": "no id" }])),
    );

    assert_eq!(
        result,
        Err(ReduceError::MissingIdentity {
            kind: Some("USERS_SAVED".to_string()),
            field: "id".to_string(),
            position: 0,
        })
    );
}

#[test]
fn overlapping_lifecycles_are_rejected_at_build_time() {
    let fetch = AsyncTypes::new("fetch_report");

    let result = create_reducer(
        vec![async_handler("report", &fetch), async_handler("summary", &fetch)],
        json!({}),
    );

    let err = result.unwrap_err();
    assert_eq!(
        err,
        BuildError::OverlappingHandlers {
            keys: vec![
                "FETCH_REPORT_FAILURE".to_string(),
                "FETCH_REPORT_REQUEST".to_string(),
                "FETCH_REPORT_SUCCESS".to_string(),
            ]
        }
    );
}

#[test]
fn nesting_the_same_field_twice_is_rejected() {
    let result = create_reducer(
        vec![
            HandlerMap::new().nest("users", users()),
            HandlerMap::new().nest("users", users()),
        ],
        json!({}),
    );

    assert!(matches!(
        result,
        Err(BuildError::OverlappingSubreducers { .. })
    ));
}

#[test]
fn model_array_requires_initializer() {
    let result = ModelArrayBuilder::new().updater("USERS_SAVED").build_reducer();
    assert_eq!(result.unwrap_err(), BuildError::MissingInitializer);
}
