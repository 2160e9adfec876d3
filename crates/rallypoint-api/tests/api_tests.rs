//! Integration tests for the Rallypoint API.
//!
//! HTTP tests drive Axum's `Router` directly via `tower::ServiceExt`
//! without starting a TCP server. Subscription tests run against the
//! schema with `execute_stream`, which is what the `WebSocket` transport
//! does per connection.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use futures::{FutureExt, Stream, StreamExt};
use rallypoint_api::router::build_router;
use rallypoint_api::state::AppState;
use rallypoint_types::{User, UserId};
use serde_json::{Value, json};
use tower::ServiceExt;

fn make_app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::default());
    let router = build_router(Arc::clone(&state));
    (state, router)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// POST a GraphQL document and return the full JSON response.
async fn graphql(router: &Router, query: &str) -> Value {
    let request = Request::post("/graphql")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "query": query }).to_string()))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_to_json(response.into_body()).await
}

/// POST a GraphQL document that must succeed and return its `data`.
async fn graphql_ok(router: &Router, query: &str) -> Value {
    let body = graphql(router, query).await;
    assert!(body.get("errors").is_none(), "unexpected errors: {body}");
    body["data"].clone()
}

fn first_error(body: &Value) -> String {
    body["errors"][0]["message"].as_str().unwrap().to_owned()
}

async fn create_user(router: &Router, username: &str, email: &str) -> String {
    let data = graphql_ok(
        router,
        &format!(
            r#"mutation {{ createUser(data: {{ username: "{username}", email: "{email}" }}) {{ id }} }}"#
        ),
    )
    .await;
    data["createUser"]["id"].as_str().unwrap().to_owned()
}

async fn create_participant(router: &Router, user_id: &str, event_id: &str) -> String {
    let data = graphql_ok(
        router,
        &format!(
            r#"mutation {{ createParticipant(data: {{ user_id: "{user_id}", event_id: "{event_id}" }}) {{ id }} }}"#
        ),
    )
    .await;
    data["createParticipant"]["id"].as_str().unwrap().to_owned()
}

async fn add_event(router: &Router, title: &str, user_id: &str, location_id: &str) -> String {
    let data = graphql_ok(
        router,
        &format!(
            r#"mutation {{
                addEvent(data: {{
                    title: "{title}", desc: "d", date: "2024-06-01",
                    from: "10:00", to: "11:00",
                    user_id: "{user_id}", location_id: "{location_id}"
                }}) {{ id }}
            }}"#
        ),
    )
    .await;
    data["addEvent"]["id"].as_str().unwrap().to_owned()
}

/// Poll a subscription once so its resolver runs and registers with the
/// bus. Nothing has been published yet, so no item is expected.
fn prime<S: Stream + Unpin>(stream: &mut S) {
    assert!(stream.next().now_or_never().is_none());
}

// =========================================================================
// Plain HTTP endpoints
// =========================================================================

#[tokio::test]
async fn test_index_returns_html() {
    let (_state, router) = make_app();

    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.contains("Rallypoint"));
    assert!(html.contains("/graphql"));
}

#[tokio::test]
async fn test_health_reports_counts() {
    let (_state, router) = make_app();
    create_user(&router, "ann", "a@x.com").await;

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["users"], 1);
    assert_eq!(json["events"], 0);
    assert_eq!(json["locations"], 0);
    assert_eq!(json["participants"], 0);
}

#[tokio::test]
async fn test_graphiql_is_served() {
    let (_state, router) = make_app();

    let response = router
        .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_to_string(response.into_body()).await;
    assert!(html.to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn test_schema_sdl_keeps_field_names() {
    let (_state, router) = make_app();

    let response = router
        .oneshot(Request::get("/schema.graphql").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let sdl = body_to_string(response.into_body()).await;
    assert!(sdl.contains("user_id: ID!"));
    assert!(sdl.contains("location_id: ID!"));
    assert!(sdl.contains("addEventInput"));
    assert!(sdl.contains("deleteAllUsers: DeleteAllOutput!"));
    assert!(sdl.contains("userCreated(id: ID): User!"));
    assert!(sdl.contains("locationCreated(name: String): Location!"));
}

// =========================================================================
// Queries and mutations
// =========================================================================

#[tokio::test]
async fn test_create_user_assigns_id_and_appends() {
    let (_state, router) = make_app();

    let data = graphql_ok(
        &router,
        r#"mutation { createUser(data: { username: "ann", email: "a@x.com" }) { id username email } }"#,
    )
    .await;
    let created = &data["createUser"];
    assert_eq!(created["username"], "ann");
    assert_eq!(created["email"], "a@x.com");
    let first_id = created["id"].as_str().unwrap().to_owned();
    assert!(!first_id.is_empty());

    let second_id = create_user(&router, "bob", "b@x.com").await;
    assert_ne!(first_id, second_id);

    let data = graphql_ok(&router, "{ users { id username } }").await;
    let users = data["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], first_id.as_str());
    assert_eq!(users[1]["id"], second_id.as_str());
}

#[tokio::test]
async fn test_update_merges_only_supplied_fields() {
    let (_state, router) = make_app();
    let id = create_user(&router, "ann", "a@x.com").await;

    let data = graphql_ok(
        &router,
        &format!(r#"mutation {{ updateUser(id: "{id}", data: {{ email: "ann@y.org" }}) {{ id username email }} }}"#),
    )
    .await;
    assert_eq!(data["updateUser"]["id"], id.as_str());
    assert_eq!(data["updateUser"]["username"], "ann");
    assert_eq!(data["updateUser"]["email"], "ann@y.org");

    let data = graphql_ok(&router, &format!(r#"{{ user(id: "{id}") {{ username email }} }}"#)).await;
    assert_eq!(data["user"]["username"], "ann");
    assert_eq!(data["user"]["email"], "ann@y.org");
}

#[tokio::test]
async fn test_update_event_moves_user_and_location() {
    let (_state, router) = make_app();
    let event = add_event(&router, "Kickoff", "u1", "l1").await;

    let data = graphql_ok(
        &router,
        &format!(
            r#"mutation {{
                updateEvent(id: "{event}", data: {{ user_id: "u2", location_id: "l2", to: "13:00" }}) {{
                    id title from to user_id location_id
                }}
            }}"#
        ),
    )
    .await;
    let updated = &data["updateEvent"];
    assert_eq!(updated["id"], event.as_str());
    assert_eq!(updated["title"], "Kickoff");
    assert_eq!(updated["from"], "10:00");
    assert_eq!(updated["to"], "13:00");
    assert_eq!(updated["user_id"], "u2");
    assert_eq!(updated["location_id"], "l2");
}

#[tokio::test]
async fn test_update_location_moves_event() {
    let (_state, router) = make_app();
    let data = graphql_ok(
        &router,
        r#"mutation { createLocation(data: { name: "HQ", desc: "d", lat: 1.0, lng: 2.0, event_id: "e1" }) { id } }"#,
    )
    .await;
    let location = data["createLocation"]["id"].as_str().unwrap().to_owned();

    let data = graphql_ok(
        &router,
        &format!(
            r#"mutation {{ updateLocation(id: "{location}", data: {{ event_id: "e2", lat: 5.5 }}) {{ name lat lng event_id }} }}"#
        ),
    )
    .await;
    let updated = &data["updateLocation"];
    assert_eq!(updated["name"], "HQ");
    assert_eq!(updated["lat"], 5.5);
    assert_eq!(updated["lng"], 2.0);
    assert_eq!(updated["event_id"], "e2");
}

#[tokio::test]
async fn test_update_participant_moves_user_and_event() {
    let (_state, router) = make_app();
    let participant = create_participant(&router, "u1", "e1").await;

    let data = graphql_ok(
        &router,
        &format!(
            r#"mutation {{ updateParticipant(id: "{participant}", data: {{ user_id: "u9" }}) {{ id user_id event_id }} }}"#
        ),
    )
    .await;
    assert_eq!(data["updateParticipant"]["user_id"], "u9");
    assert_eq!(data["updateParticipant"]["event_id"], "e1");

    let data = graphql_ok(
        &router,
        &format!(
            r#"mutation {{ updateParticipant(id: "{participant}", data: {{ event_id: "e7" }}) {{ user_id event_id }} }}"#
        ),
    )
    .await;
    assert_eq!(data["updateParticipant"]["user_id"], "u9");
    assert_eq!(data["updateParticipant"]["event_id"], "e7");
}

#[tokio::test]
async fn test_update_unknown_id_is_not_found() {
    let (_state, router) = make_app();

    let body = graphql(
        &router,
        r#"mutation { updateUser(id: "ghost", data: { username: "x" }) { id } }"#,
    )
    .await;
    assert_eq!(first_error(&body), "user not found: ghost");

    let body = graphql(&router, r#"mutation { deleteEvent(id: "ghost") { id } }"#).await;
    assert_eq!(first_error(&body), "event not found: ghost");

    let body = graphql(&router, r#"mutation { deleteUser(id: "ghost") { id } }"#).await;
    assert_eq!(first_error(&body), "user not found: ghost");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn test_single_record_query_unknown_id_is_not_found() {
    let (_state, router) = make_app();
    let body = graphql(&router, r#"{ participant(id: "nope") { id } }"#).await;
    assert_eq!(first_error(&body), "participant not found: nope");
}

#[tokio::test]
async fn test_delete_first_record_returns_prior_values() {
    let (_state, router) = make_app();
    let first = create_user(&router, "ann", "a@x.com").await;
    let second = create_user(&router, "bob", "b@x.com").await;

    let data = graphql_ok(
        &router,
        &format!(r#"mutation {{ deleteUser(id: "{first}") {{ id username email }} }}"#),
    )
    .await;
    assert_eq!(data["deleteUser"]["id"], first.as_str());
    assert_eq!(data["deleteUser"]["username"], "ann");

    let data = graphql_ok(&router, "{ users { id } }").await;
    assert_eq!(data["users"], json!([{ "id": second }]));
}

#[tokio::test]
async fn test_delete_all_participants_returns_count() {
    let (_state, router) = make_app();
    for user in ["u1", "u2", "u3"] {
        create_participant(&router, user, "e1").await;
    }

    let data = graphql_ok(&router, "mutation { deleteAllParticipants { count } }").await;
    assert_eq!(data["deleteAllParticipants"]["count"], 3);

    let data = graphql_ok(&router, "{ participants { id } }").await;
    assert_eq!(data["participants"], json!([]));
}

#[tokio::test]
async fn test_event_resolves_location_user_and_participants() {
    let (_state, router) = make_app();
    let user_id = create_user(&router, "ann", "a@x.com").await;

    let data = graphql_ok(
        &router,
        r#"mutation {
            createLocation(data: { name: "HQ", desc: "d", lat: 1.0, lng: 2.0, event_id: "e1" }) {
                id name lat lng event_id
            }
        }"#,
    )
    .await;
    let location = &data["createLocation"];
    assert_eq!(location["name"], "HQ");
    assert_eq!(location["lat"], 1.0);
    assert_eq!(location["lng"], 2.0);
    assert_eq!(location["event_id"], "e1");
    let location_id = location["id"].as_str().unwrap().to_owned();

    let event_id = add_event(&router, "Kickoff", &user_id, &location_id).await;
    let participant_id = create_participant(&router, &user_id, &event_id).await;
    create_participant(&router, &user_id, "some-other-event").await;

    let data = graphql_ok(
        &router,
        &format!(
            r#"{{ event(id: "{event_id}") {{
                title from to user_id location_id
                user {{ username }}
                location {{ id name }}
                participant {{ id }}
            }} }}"#
        ),
    )
    .await;
    let event = &data["event"];
    assert_eq!(event["title"], "Kickoff");
    assert_eq!(event["from"], "10:00");
    assert_eq!(event["to"], "11:00");
    assert_eq!(event["user_id"], user_id.as_str());
    assert_eq!(event["user"]["username"], "ann");
    assert_eq!(event["location"]["id"], location_id.as_str());
    assert_eq!(event["location"]["name"], "HQ");
    assert_eq!(event["participant"], json!([{ "id": participant_id }]));
}

#[tokio::test]
async fn test_user_events_only_lists_owned_events() {
    let (_state, router) = make_app();
    let u1 = create_user(&router, "ann", "a@x.com").await;
    let e1 = add_event(&router, "mine", &u1, "l1").await;
    add_event(&router, "theirs", "other", "l1").await;

    let data = graphql_ok(
        &router,
        &format!(r#"{{ user(id: "{u1}") {{ events {{ id title }} }} }}"#),
    )
    .await;
    assert_eq!(data["user"]["events"], json!([{ "id": e1, "title": "mine" }]));
}

#[tokio::test]
async fn test_dangling_references_resolve_to_null() {
    let (_state, router) = make_app();
    let event_id = add_event(&router, "orphan", "missing-user", "missing-location").await;

    let data = graphql_ok(
        &router,
        &format!(r#"{{ event(id: "{event_id}") {{ user {{ id }} location {{ id }} participant {{ id }} }} }}"#),
    )
    .await;
    assert_eq!(data["event"]["user"], Value::Null);
    assert_eq!(data["event"]["location"], Value::Null);
    assert_eq!(data["event"]["participant"], json!([]));
}

#[tokio::test]
async fn test_numeric_ids_match_string_ids() {
    let (state, router) = make_app();
    state
        .service
        .store()
        .insert(User {
            id: UserId::from("1"),
            username: String::from("seeded"),
            email: String::from("s@x.com"),
        })
        .await
        .unwrap();

    let data = graphql_ok(&router, "{ user(id: 1) { id username } }").await;
    assert_eq!(data["user"]["id"], "1");
    assert_eq!(data["user"]["username"], "seeded");
}

#[tokio::test]
async fn test_missing_required_field_is_rejected() {
    let (state, router) = make_app();
    let body = graphql(
        &router,
        r#"mutation { createUser(data: { username: "ann" }) { id } }"#,
    )
    .await;
    assert!(body.get("errors").is_some());
    assert_eq!(state.service.store().counts().await.users, 0);
}

// =========================================================================
// Subscriptions
// =========================================================================

#[tokio::test]
async fn test_user_created_subscription_receives_record_once() {
    let (state, router) = make_app();
    let mut stream = Box::pin(
        state
            .schema
            .execute_stream("subscription { userCreated { id username email } }"),
    );
    prime(&mut stream);

    let id = create_user(&router, "ann", "a@x.com").await;

    let response = stream.next().await.unwrap();
    assert!(response.errors.is_empty());
    let data = response.data.into_json().unwrap();
    assert_eq!(
        data,
        json!({ "userCreated": { "id": id, "username": "ann", "email": "a@x.com" } })
    );
    assert!(stream.next().now_or_never().is_none());
}

#[tokio::test]
async fn test_user_created_filter_skips_other_ids() {
    let (state, router) = make_app();
    let mut stream = Box::pin(
        state
            .schema
            .execute_stream(r#"subscription { userCreated(id: "X") { id } }"#),
    );
    prime(&mut stream);

    create_user(&router, "ann", "a@x.com").await;
    assert!(stream.next().now_or_never().is_none());
}

#[tokio::test]
async fn test_location_created_filters_by_name() {
    let (state, router) = make_app();
    let mut stream = Box::pin(
        state
            .schema
            .execute_stream(r#"subscription { locationCreated(name: "HQ") { name } }"#),
    );
    prime(&mut stream);

    for name in ["Annex", "HQ"] {
        graphql_ok(
            &router,
            &format!(
                r#"mutation {{ createLocation(data: {{ name: "{name}", desc: "d", lat: 0.0, lng: 0.0, event_id: "e1" }}) {{ id }} }}"#
            ),
        )
        .await;
    }

    let response = stream.next().await.unwrap();
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({ "locationCreated": { "name": "HQ" } })
    );
    assert!(stream.next().now_or_never().is_none());
}

#[tokio::test]
async fn test_user_updated_subscription_delivers_merge() {
    let (state, router) = make_app();
    let id = create_user(&router, "ann", "a@x.com").await;
    let mut stream = Box::pin(
        state
            .schema
            .execute_stream("subscription { userUpdated { id username email } }"),
    );
    prime(&mut stream);

    graphql_ok(
        &router,
        &format!(r#"mutation {{ updateUser(id: "{id}", data: {{ username: "anna" }}) {{ id }} }}"#),
    )
    .await;

    let response = stream.next().await.unwrap();
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({ "userUpdated": { "id": id, "username": "anna", "email": "a@x.com" } })
    );
}

#[tokio::test]
async fn test_subscription_payload_resolves_associations() {
    let (state, router) = make_app();
    let user_id = create_user(&router, "ann", "a@x.com").await;
    let mut stream = Box::pin(
        state
            .schema
            .execute_stream("subscription { eventCreated { title user { username } } }"),
    );
    prime(&mut stream);

    add_event(&router, "Kickoff", &user_id, "l1").await;

    let response = stream.next().await.unwrap();
    assert_eq!(
        response.data.into_json().unwrap(),
        json!({ "eventCreated": { "title": "Kickoff", "user": { "username": "ann" } } })
    );
}

#[tokio::test]
async fn test_delete_all_does_not_notify_deleted_subscribers() {
    let (state, router) = make_app();
    for user in ["u1", "u2", "u3"] {
        create_participant(&router, user, "e1").await;
    }
    let mut stream = Box::pin(
        state
            .schema
            .execute_stream("subscription { participantDeleted { id } }"),
    );
    prime(&mut stream);

    let data = graphql_ok(&router, "mutation { deleteAllParticipants { count } }").await;
    assert_eq!(data["deleteAllParticipants"]["count"], 3);
    assert!(stream.next().now_or_never().is_none());
}
