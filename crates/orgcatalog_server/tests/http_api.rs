use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use orgcatalog_core::{open_db, open_db_in_memory, seed_catalog};
use orgcatalog_server::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

const API_KEY: &str = "test-key";

fn seeded_app() -> Router {
    let mut conn = open_db_in_memory().unwrap();
    seed_catalog(&mut conn).unwrap();
    build_router(AppState::new(conn, API_KEY))
}

struct Reply {
    status: StatusCode,
    request_id: Option<String>,
    body: Value,
}

async fn send(app: Router, uri: &str, key: Option<&str>) -> Reply {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();

    let status = response.status();
    let request_id = response
        .headers()
        .get("x-request-id")
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        request_id,
        body,
    }
}

async fn get(uri: &str) -> Reply {
    send(seeded_app(), uri, Some(API_KEY)).await
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_reports_ok_with_valid_key() {
    let reply = get("/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["health"], "OK");
    assert_eq!(reply.body["service"], "Organization Catalog Api");
    let fields = reply.body.as_object().unwrap();
    assert_eq!(fields.len(), 3);
    assert!(fields.contains_key("version"));
    assert!(reply.request_id.is_some());
}

#[tokio::test]
async fn missing_or_wrong_key_is_forbidden_everywhere() {
    for (uri, key) in [
        ("/", None),
        ("/", Some("nope")),
        ("/organizations/1", Some("TEST-KEY")),
        ("/buildings/nearby?lat=55.7558&lon=37.6176&radius=1000", None),
    ] {
        let reply = send(seeded_app(), uri, key).await;
        assert_eq!(reply.status, StatusCode::FORBIDDEN, "{uri} with {key:?}");
        assert_eq!(reply.body["detail"], "Invalid API Key");
    }
}

#[tokio::test]
async fn incoming_request_id_is_echoed() {
    let app = seeded_app();
    let request = Request::builder()
        .uri("/")
        .header("x-api-key", API_KEY)
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn buildings_nearby_respects_shape() {
    let circle = get("/buildings/nearby?lat=55.7558&lon=37.6176&radius=1000").await;
    assert_eq!(circle.status, StatusCode::OK);
    assert_eq!(ids(&circle.body), vec![1]);
    assert_eq!(circle.body[0]["address"], "ул. Ленина, 1, офис 3");

    let square = get("/buildings/nearby?lat=55.7558&lon=37.6176&radius=1000&shape=square").await;
    assert_eq!(ids(&square.body), vec![1, 2]);
}

#[tokio::test]
async fn organizations_nearby_returns_hydrated_records() {
    let reply = get("/organizations/nearby?lat=55.7558&lon=37.6176&radius=1000").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(ids(&reply.body), vec![1, 11]);

    let first = &reply.body[0];
    assert_eq!(first["building"]["id"], 1);
    assert_eq!(first["phones"][0]["number"], "+7 (495) 123-45-67");
    assert_eq!(first["businesses"][0]["parent_id"], 1);
}

#[tokio::test]
async fn repeated_query_keys_use_the_last_value() {
    let reply = get("/organizations/nearby?lat=10&lon=37.6176&radius=1000&lat=55.7558").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(ids(&reply.body), vec![1, 11]);
}

#[tokio::test]
async fn empty_area_is_ok_and_empty() {
    let reply = get("/organizations/nearby?lat=0&lon=0&radius=10").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body, Value::Array(Vec::new()));
}

#[tokio::test]
async fn invalid_area_parameters_are_unprocessable() {
    for uri in [
        "/buildings/nearby?lat=95&lon=37.6&radius=1000",
        "/buildings/nearby?lat=55.7&lon=-181&radius=1000",
        "/buildings/nearby?lat=55.7&lon=37.6&radius=0",
        "/buildings/nearby?lat=55.7&lon=37.6&radius=100001",
        "/buildings/nearby?lat=55.7&lon=37.6&radius=1000&shape=triangle",
        "/organizations/nearby?lat=abc&lon=37.6&radius=1000",
        "/organizations/nearby?lon=37.6&radius=1000",
    ] {
        let reply = get(uri).await;
        assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert!(reply.body["detail"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn search_matches_case_insensitively() {
    // "софт", percent-encoded.
    let reply = get("/organizations/search?name=%D1%81%D0%BE%D1%84%D1%82").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(ids(&reply.body), vec![9]);

    let latin = get("/organizations/search?name=iT").await;
    assert_eq!(ids(&latin.body), vec![9, 20]);
}

#[tokio::test]
async fn search_requires_two_characters() {
    assert_eq!(
        get("/organizations/search?name=a").await.status,
        StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(
        get("/organizations/search").await.status,
        StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn lookups_by_building_business_and_id() {
    assert_eq!(ids(&get("/organizations/building/1").await.body), vec![1, 11]);
    assert_eq!(ids(&get("/organizations/business/18").await.body), vec![7, 19]);

    let single = get("/organizations/5").await;
    assert_eq!(single.status, StatusCode::OK);
    assert_eq!(single.body["name"], "Автосалон 'Премиум'");
}

#[tokio::test]
async fn business_tree_route_includes_two_levels_of_descendants() {
    let reply = get("/businesses/2/organizations").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(ids(&reply.body), vec![5, 6, 7, 8, 19]);
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    for (uri, detail) in [
        ("/organizations/building/999", "Building not found"),
        ("/organizations/business/999", "Business not found"),
        ("/businesses/999/organizations", "Business not found"),
        ("/organizations/999", "Organization not found"),
    ] {
        let reply = get(uri).await;
        assert_eq!(reply.status, StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(reply.body["detail"], detail);
    }
}

#[tokio::test]
async fn non_numeric_path_id_is_unprocessable() {
    let reply = get("/organizations/building/first").await;
    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn file_backed_state_serves_seeded_rows() {
    let dir = tempfile::tempdir().unwrap();
    let mut conn = open_db(dir.path().join("catalog.sqlite3")).unwrap();
    seed_catalog(&mut conn).unwrap();
    let app = build_router(AppState::new(conn, API_KEY));

    let reply = send(app, "/organizations/20", Some(API_KEY)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["name"], "IT-Академия");
    assert_eq!(reply.body["businesses"].as_array().unwrap().len(), 2);
}
