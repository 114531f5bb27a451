//! Router-level tests for the inventory HTTP API.

use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE, WWW_AUTHENTICATE};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ifinv_core::{InterfaceFields, InterfaceRecord, RecordId, RecordStore, SortMode};
use ifinv_server::{InventoryServer, ServerConfig};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

struct Reply {
    status: StatusCode,
    headers: HeaderMap,
    body: Value,
}

async fn send(app: &Router, request: Request<Body>) -> Reply {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    Reply {
        status,
        headers,
        body,
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with(uri: &str, name: axum::http::HeaderName, value: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn seeded(id: &str, name: &str, vlan: u32) -> InterfaceRecord {
    InterfaceRecord::with_id(
        RecordId::from(id),
        InterfaceFields::new("sw-core-01", name, vlan, 1000, "connected", ""),
    )
}

fn app_with(config: ServerConfig, records: Vec<InterfaceRecord>) -> Router {
    InventoryServer::new(config, RecordStore::with_records(records)).router()
}

fn app(records: Vec<InterfaceRecord>) -> Router {
    app_with(ServerConfig::default(), records)
}

fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

fn new_interface() -> Value {
    json!({
        "switchName": "sw-dist-02",
        "interfaceName": "Te1/1/4",
        "vlanId": 200,
        "speedMbps": 10000,
        "status": "connected",
        "description": "uplink"
    })
}

fn login() -> Value {
    json!({"username": "user", "password": "password"})
}

async fn session_cookie(app: &Router) -> String {
    let reply = send(app, json_request("POST", "/session/login", login())).await;
    assert_eq!(reply.status, StatusCode::OK);
    let set_cookie = reply.headers.get(SET_COOKIE).unwrap().to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

async fn bearer_token(app: &Router) -> String {
    let reply = send(app, json_request("POST", "/token/login", login())).await;
    assert_eq!(reply.status, StatusCode::OK);
    reply.body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn list_returns_envelope() {
    let app = app(vec![seeded("a", "Gi1/0/1", 1), seeded("b", "Gi1/0/2", 2)]);

    let reply = send(&app, get("/interface")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["total"], 2);
    assert_eq!(reply.body["skip"], 0);
    assert_eq!(reply.body["limit"], 0);
    assert_eq!(ids(&reply.body), vec!["a", "b"]);
    assert_eq!(reply.body["data"][0]["interfaceName"], "Gi1/0/1");
}

#[tokio::test]
async fn vlan_sort_is_textual_by_default() {
    let app = app(vec![seeded("B", "x", 9), seeded("A", "y", 10)]);

    let reply = send(&app, get("/interface?sort=vlanId&dir=asc")).await;
    assert_eq!(ids(&reply.body), vec!["A", "B"]);

    let reply = send(&app, get("/interface?sort=vlanId&dir=desc")).await;
    assert_eq!(ids(&reply.body), vec!["B", "A"]);
}

#[tokio::test]
async fn vlan_sort_is_numeric_in_natural_mode() {
    let config = ServerConfig::default().with_sort_mode(SortMode::Natural);
    let app = app_with(config, vec![seeded("A", "y", 10), seeded("B", "x", 9)]);

    let reply = send(&app, get("/interface?sort=vlanId")).await;
    assert_eq!(ids(&reply.body), vec!["B", "A"]);
}

#[tokio::test]
async fn pagination_reports_applied_window() {
    let records = (0..5).map(|i| seeded(&format!("r{i}"), "x", i)).collect();
    let app = app(records);

    let reply = send(&app, get("/interface?skip=1&limit=2")).await;
    assert_eq!(reply.body["total"], 5);
    assert_eq!(reply.body["skip"], 1);
    assert_eq!(reply.body["limit"], 2);
    assert_eq!(ids(&reply.body), vec!["r1", "r2"]);

    let reply = send(&app, get("/interface?skip=10")).await;
    assert_eq!(reply.body["total"], 5);
    assert!(ids(&reply.body).is_empty());

    let reply = send(&app, get("/interface?limit=0")).await;
    assert!(ids(&reply.body).is_empty());
}

#[tokio::test]
async fn invalid_query_is_rejected() {
    let app = app(vec![seeded("a", "x", 1)]);

    for uri in [
        "/interface?sort=speed",
        "/interface?sort=vlanId&dir=up",
        "/interface?skip=abc",
        "/interface?limit=-3",
    ] {
        let reply = send(&app, get(uri)).await;
        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(reply.body["status"], 400);
        assert_eq!(reply.body["message"], "Query parameter invalid!");
    }
}

#[tokio::test]
async fn create_read_update_delete_roundtrip() {
    let app = app(Vec::new());

    let reply = send(&app, json_request("POST", "/interface", new_interface())).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    let id = reply.body["id"].as_str().unwrap().to_string();
    let mut expected = new_interface();
    expected["id"] = json!(id);
    assert_eq!(reply.body, expected);

    let reply = send(&app, get(&format!("/interface/{id}"))).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, expected);

    let changed = json!({
        "switchName": "sw-dist-03",
        "interfaceName": "Te1/1/5",
        "vlanId": 300,
        "speedMbps": 1000,
        "status": "down",
        "description": ""
    });
    let reply = send(&app, json_request("PUT", &format!("/interface/{id}"), changed.clone())).await;
    assert_eq!(reply.status, StatusCode::OK);
    let mut expected = changed;
    expected["id"] = json!(id);
    assert_eq!(reply.body, expected);
    assert_eq!(send(&app, get(&format!("/interface/{id}"))).await.body, expected);

    let reply = send(&app, delete(&format!("/interface/{id}"))).await;
    assert_eq!(reply.status, StatusCode::OK);

    let reply = send(&app, get(&format!("/interface/{id}"))).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_ignores_client_id() {
    let app = app(Vec::new());
    let mut body = new_interface();
    body["id"] = json!("chosen-by-client");

    let reply = send(&app, json_request("POST", "/interface", body)).await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert_ne!(reply.body["id"], "chosen-by-client");
}

#[tokio::test]
async fn invalid_body_is_rejected() {
    let app = app(vec![seeded("a", "x", 1)]);
    let mut body = new_interface();
    body.as_object_mut().unwrap().remove("switchName");

    let reply = send(&app, json_request("POST", "/interface", body.clone())).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.body["message"], "Request body invalid!");

    // Body is checked before the id, so an unknown id still yields 400.
    let reply = send(&app, json_request("PUT", "/interface/unknown", body)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);

    let not_json = Request::builder()
        .method("POST")
        .uri("/interface")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{"))
        .unwrap();
    assert_eq!(send(&app, not_json).await.status, StatusCode::BAD_REQUEST);

    let wrong_type = Request::builder()
        .method("POST")
        .uri("/interface")
        .body(Body::from(new_interface().to_string()))
        .unwrap();
    assert_eq!(send(&app, wrong_type).await.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = app(vec![seeded("a", "x", 1)]);

    let reply = send(&app, delete("/interface/unknown-id")).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.body["status"], 404);
    assert_eq!(reply.body["message"], "Interface with id 'unknown-id' not found");

    let reply = send(&app, json_request("PUT", "/interface/unknown-id", new_interface())).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);

    assert_eq!(send(&app, get("/interface")).await.body["total"], 1);
}

#[tokio::test]
async fn basic_gate() {
    let app = app(vec![seeded("a", "x", 1)]);
    let good = format!("Basic {}", STANDARD.encode("user:password"));
    let bad = format!("Basic {}", STANDARD.encode("user:wrong"));

    let reply = send(&app, get_with("/basic/interface", AUTHORIZATION, &good)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["total"], 1);

    let reply = send(&app, get_with("/basic/interface", AUTHORIZATION, &bad)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["message"], "Unauthorized");
    assert!(reply.headers.contains_key(WWW_AUTHENTICATE));

    let reply = send(&app, get("/basic/interface")).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn basic_gate_ignores_session_cookie() {
    let app = app(Vec::new());
    let cookie = session_cookie(&app).await;
    let bad = format!("Basic {}", STANDARD.encode("user:wrong"));

    let request = Request::builder()
        .uri("/basic/interface")
        .header(AUTHORIZATION, bad)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, request).await.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bearer_gate() {
    let app = app(vec![seeded("a", "x", 1)]);
    let token = bearer_token(&app).await;

    let reply = send(
        &app,
        get_with("/token/interface?sort=id", AUTHORIZATION, &format!("Bearer {token}")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(ids(&reply.body), vec!["a"]);

    let reply = send(&app, get("/token/interface")).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = send(&app, get_with("/token/interface", AUTHORIZATION, "Bearer not.a.token")).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = send(&app, get_with("/token/interface", AUTHORIZATION, &token)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_from_other_process_is_rejected() {
    let app = app(Vec::new());
    let other = app_with(ServerConfig::default(), Vec::new());
    let foreign = bearer_token(&other).await;

    let reply = send(
        &app,
        get_with("/token/interface", AUTHORIZATION, &format!("Bearer {foreign}")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let config = ServerConfig::default().with_token_expiry(Duration::from_secs(0));
    let app = app_with(config, Vec::new());
    let token = bearer_token(&app).await;

    let reply = send(
        &app,
        get_with("/token/interface", AUTHORIZATION, &format!("Bearer {token}")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_login_rejects_bad_credentials() {
    let app = app(Vec::new());

    let reply = send(
        &app,
        json_request("POST", "/token/login", json!({"username": "user", "password": "nope"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["message"], "Unauthorized");

    let reply = send(&app, json_request("POST", "/token/login", json!({"username": "user"}))).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_gate() {
    let app = app(vec![seeded("a", "x", 1)]);
    let cookie = session_cookie(&app).await;
    assert!(cookie.starts_with("sessionId="));

    // Sessions never expire within a process run.
    for _ in 0..3 {
        let reply = send(&app, get_with("/session/interface", COOKIE, &cookie)).await;
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.body["total"], 1);
    }

    let reply = send(&app, get_with("/session/interface", COOKIE, "sessionId=never-issued")).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = send(&app, get("/session/interface")).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_login_rejects_bad_credentials() {
    let app = app(Vec::new());

    let reply = send(
        &app,
        json_request("POST", "/session/login", json!({"username": "admin", "password": "password"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert!(!reply.headers.contains_key(SET_COOKIE));
}

#[tokio::test]
async fn gates_do_not_cross_validate() {
    let app = app(Vec::new());
    let token = bearer_token(&app).await;
    let cookie = session_cookie(&app).await;

    let reply = send(
        &app,
        get_with("/session/interface", AUTHORIZATION, &format!("Bearer {token}")),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = send(&app, get_with("/token/interface", COOKIE, &cookie)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = send(&app, get_with("/basic/interface", COOKIE, &cookie)).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn custom_credentials_apply_to_every_scheme() {
    let config = ServerConfig::default()
        .with_credentials(ifinv_server::Credentials::new("netops", "s3cret"));
    let app = app_with(config, Vec::new());

    let reply = send(&app, json_request("POST", "/token/login", login())).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);

    let reply = send(
        &app,
        json_request("POST", "/session/login", json!({"username": "netops", "password": "s3cret"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);

    let good = format!("Basic {}", STANDARD.encode("netops:s3cret"));
    let reply = send(&app, get_with("/basic/interface", AUTHORIZATION, &good)).await;
    assert_eq!(reply.status, StatusCode::OK);
}

#[tokio::test]
async fn openapi_document_is_served_without_auth() {
    let app = app(Vec::new());

    let response = app.oneshot(get("/docs/openapi.yaml")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[CONTENT_TYPE],
        "application/yaml; charset=utf-8"
    );

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.starts_with("openapi: 3.1.0"));
    for path in [
        "/interface:",
        "/interface/{interfaceId}:",
        "/token/login:",
        "/session/login:",
        "/basic/interface:",
        "/token/interface:",
        "/session/interface:",
    ] {
        assert!(body.contains(path), "missing path {path}");
    }
    for scheme in ["basicAuth:", "bearerAuth:", "sessionAuth:", "bearerFormat: JWT"] {
        assert!(body.contains(scheme), "missing {scheme}");
    }
    assert!(body.contains("name: sessionId"));
    for message in [
        "\"Unauthorized\"",
        "\"Request body invalid!\"",
        "\"Query parameter invalid!\"",
    ] {
        assert!(body.contains(message), "missing {message}");
    }
}
