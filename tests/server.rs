//! HTTP API tests driven through the router without binding a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use venue_dash::data::loader::read_csv_from;
use venue_dash::data::Dataset;
use venue_dash::server::{router, SessionStore};

fn app() -> Router {
    app_with(
        "\
vendor name,sector,price,latitude,longitude
Rose Hall,Banquet Halls,1000,34.05,-118.25
Snap Studio,Photographers,800,34.15,-118.14
Oak Hall,Banquet Halls,2000,34.03,-118.78
",
    )
}

fn app_with(csv: &str) -> Router {
    let ds = Dataset::from_table(read_csv_from(csv.as_bytes()).unwrap()).unwrap();
    router(Arc::new(SessionStore::new(Arc::new(ds), "Banquet Halls", 16)))
}

async fn index_page(app: Router) -> String {
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn open_session(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn sectors_lists_options_and_default() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/sectors", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sectors"], json!(["Banquet Halls", "Photographers"]));
    assert_eq!(body["default"], "Banquet Halls");
    assert_eq!(body["counts"]["Banquet Halls"], 2);
}

#[tokio::test]
async fn new_session_starts_at_default_sector() {
    let app = app();
    let (status, body) = send(&app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["views"]["sector"], "Banquet Halls");
    assert_eq!(body["views"]["table"]["rows"].as_array().unwrap().len(), 2);
    assert_eq!(body["views"]["map"]["points"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn selection_change_returns_new_views() {
    let app = app();
    let id = open_session(&app).await;

    let uri = format!("/api/sessions/{id}/selection");
    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "sector": "Photographers" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert_eq!(body["event"]["kind"], "changed");
    assert_eq!(body["views"]["sector"], "Photographers");
    assert_eq!(body["views"]["histogram"]["values"], json!([800.0]));

    let (_, body) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(body["views"]["sector"], "Photographers");
}

#[tokio::test]
async fn unknown_sector_is_ignored() {
    let app = app();
    let id = open_session(&app).await;

    let uri = format!("/api/sessions/{id}/selection");
    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "sector": "Florists" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], false);
    assert_eq!(body["views"]["sector"], "Banquet Halls");
}

#[tokio::test]
async fn sessions_are_isolated() {
    let app = app();
    let a = open_session(&app).await;
    let b = open_session(&app).await;

    send(
        &app,
        "PUT",
        &format!("/api/sessions/{a}/selection"),
        Some(json!({ "sector": "Photographers" })),
    )
    .await;

    let (_, body) = send(&app, "GET", &format!("/api/sessions/{b}"), None).await;
    assert_eq!(body["views"]["sector"], "Banquet Halls");
}

#[tokio::test]
async fn deleted_session_is_gone() {
    let app = app();
    let id = open_session(&app).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn malformed_session_id_is_bad_request() {
    let app = app();
    let (status, body) = send(&app, "GET", "/api/sessions/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("not-a-uuid"));
}

#[tokio::test]
async fn index_page_is_served() {
    let page = index_page(app()).await;
    assert!(page.contains("Wedding Venue Price Dashboard"));
}

#[tokio::test]
async fn page_never_pastes_data_into_markup() {
    let page = index_page(app()).await;
    assert!(page.contains("new Option(s, s)"));
    assert!(!page.contains("<option value="));
    assert!(page.contains("cell.textContent"));
    assert!(page.contains("escapeHtml(p.vendor_name)"));
    assert!(page.contains("t.page_count"));
}

#[tokio::test]
async fn sector_with_quotes_and_markup_is_selectable() {
    let sector = r#"Bob's "Best" <Halls> & Co"#;
    let app = app_with(
        "\
vendor name,sector,price,latitude,longitude
Rose Hall,Banquet Halls,1000,34.05,-118.25
<b>Bob</b>,\"Bob's \"\"Best\"\" <Halls> & Co\",900,34.10,-118.30
",
    );
    let (_, body) = send(&app, "GET", "/api/sectors", None).await;
    assert_eq!(body["sectors"][1], sector);

    let id = open_session(&app).await;
    let uri = format!("/api/sessions/{id}/selection");
    let (status, body) = send(&app, "PUT", &uri, Some(json!({ "sector": sector }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["accepted"], true);
    assert_eq!(body["views"]["sector"], sector);
    assert_eq!(body["views"]["table"]["rows"][0][0], "<b>Bob</b>");
    assert_eq!(body["views"]["table"]["page_count"], 1);
}
